//! User domain module.
//!
//! - `model`: user profile (display name)
//! - `service`: user service trait and default implementation

mod model;
mod service;

// Re-export public API
pub use model::{DEFAULT_DISPLAY_NAME, UserProfile};
pub use service::{DefaultUserService, FixedUserService, UserService};
