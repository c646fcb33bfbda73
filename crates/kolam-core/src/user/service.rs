//! User service for retrieving the display name.

use super::model::UserProfile;

/// Service for retrieving user information.
///
/// Abstracts where the display name comes from (a config file, an auth
/// collaborator, a fixed value in tests).
pub trait UserService: Send + Sync {
    /// Returns the complete user profile.
    fn get_user_profile(&self) -> UserProfile;

    /// Returns the name used when addressing the user.
    fn get_user_name(&self) -> String {
        self.get_user_profile().display_name().to_string()
    }
}

/// Default implementation that returns the placeholder profile.
///
/// # Example
///
/// ```
/// use kolam_core::user::{DefaultUserService, UserService};
///
/// let service = DefaultUserService::default();
/// assert_eq!(service.get_user_name(), "Friend");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultUserService;

impl UserService for DefaultUserService {
    fn get_user_profile(&self) -> UserProfile {
        UserProfile::default()
    }
}

/// A user service returning a profile fixed at construction.
#[derive(Debug, Clone)]
pub struct FixedUserService {
    profile: UserProfile,
}

impl FixedUserService {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            profile: UserProfile::new(nickname),
        }
    }
}

impl UserService for FixedUserService {
    fn get_user_profile(&self) -> UserProfile {
        self.profile.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_service() {
        let service = DefaultUserService;
        assert_eq!(service.get_user_name(), "Friend");
    }

    #[test]
    fn test_fixed_user_service() {
        let service = FixedUserService::new("Asha");
        assert_eq!(service.get_user_name(), "Asha");
        assert_eq!(FixedUserService::new("").get_user_name(), "Friend");
    }
}
