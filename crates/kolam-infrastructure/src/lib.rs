//! Infrastructure layer for Kolam Companion: configuration files on disk.

pub mod config_service;
pub mod paths;
pub mod user_service;

pub use config_service::ConfigService;
pub use paths::KolamPaths;
pub use user_service::ConfigBasedUserService;
