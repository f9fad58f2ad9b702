//! Configuration management for the file service
//!
//! Loads service settings from `filedock.toml` with environment overrides,
//! validating them before the service starts.

use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Root directory for physical file storage
    pub storage_root: String,

    /// Maximum accepted upload size in MB
    pub max_file_size_mb: u64,

    /// Maximum length of a folder display name
    pub max_folder_name_length: usize,

    /// Maximum length of a file name
    pub max_file_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            storage_root: "./storage".to_string(),
            max_file_size_mb: 100,
            max_folder_name_length: 128,
            max_file_name_length: 255,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from filedock.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("filedock").required(false))
            .add_source(Environment::with_prefix("FILEDOCK").separator("_"))
            .build()?;

        let config: ServiceConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.storage_root.is_empty() {
            return Err(config::ConfigError::Message(
                "storage_root cannot be empty".into(),
            ));
        }

        if self.max_file_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_file_size_mb must be greater than 0".into(),
            ));
        }

        if self.max_folder_name_length == 0 {
            return Err(config::ConfigError::Message(
                "max_folder_name_length must be greater than 0".into(),
            ));
        }

        if self.max_file_name_length == 0 {
            return Err(config::ConfigError::Message(
                "max_file_name_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get storage root as PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    /// Get maximum upload size in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_file_size_bytes(), 100 * 1024 * 1024);
    }

    #[test]
    fn empty_storage_root_is_rejected() {
        let config = ServiceConfig {
            storage_root: String::new(),
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_upload_limit_is_rejected() {
        let config = ServiceConfig {
            max_file_size_mb: 0,
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
