//! Configuration-based user service implementation.
//!
//! Reads the user's nickname from the `[user_profile]` section of the
//! configuration file.

use crate::config_service::ConfigService;
use kolam_core::user::{UserProfile, UserService};

/// User service backed by [`ConfigService`].
///
/// # Example
///
/// ```
/// use kolam_infrastructure::{ConfigService, user_service::ConfigBasedUserService};
/// use kolam_core::user::UserService;
///
/// let service = ConfigBasedUserService::new(ConfigService::with_path("/nonexistent/config.toml"));
/// assert_eq!(service.get_user_name(), "Friend");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBasedUserService {
    config_service: ConfigService,
}

impl ConfigBasedUserService {
    pub fn new(config_service: ConfigService) -> Self {
        Self { config_service }
    }
}

impl Default for ConfigBasedUserService {
    fn default() -> Self {
        Self::new(ConfigService::new())
    }
}

impl UserService for ConfigBasedUserService {
    fn get_user_profile(&self) -> UserProfile {
        self.config_service.get_config().user_profile
    }
}
