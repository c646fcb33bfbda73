//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/kolam/config.toml` (or an
//! explicit path) and caches it. A missing file yields defaults; an
//! unreadable or malformed file is logged and also yields defaults, so a bad
//! config never prevents a conversation from starting.

use crate::paths::KolamPaths;
use kolam_core::config::RootConfig;
use kolam_core::error::{KolamError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config path; `None` resolves the platform default.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config location.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> RootConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[Config] Falling back to defaults: {}", e);
                RootConfig::default()
            }
        };

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => KolamPaths::config_file().map_err(|e| KolamError::config(e.to_string())),
        }
    }

    fn load_config(&self) -> Result<RootConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            tracing::debug!("[Config] No config file at {:?}; using defaults", path);
            return Ok(RootConfig::default());
        }
        let config = read_config(&path)?;
        tracing::info!("[Config] Loaded configuration from {:?}", path);
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<RootConfig> {
    let content = fs::read_to_string(path)?;
    RootConfig::from_toml_str(&content)
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
