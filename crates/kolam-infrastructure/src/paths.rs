//! Path management for kolam configuration files.
//!
//! ```text
//! ~/.config/kolam/             # Config directory (platform config dir)
//! └── config.toml              # Application configuration
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

const APP_DIR: &str = "kolam";
const CONFIG_FILE: &str = "config.toml";

/// Resolves kolam's well-known paths.
pub struct KolamPaths;

impl KolamPaths {
    /// Returns the kolam configuration directory (e.g. `~/.config/kolam/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }
}
