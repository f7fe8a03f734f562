//! Runtime tuning for example resolution, pagination and detached fetching.
//!
//! Values are read from TOML; every key is optional and falls back to the
//! defaults below.
//!
//! ```toml
//! max_depth = 2
//! page_size = 10
//! in_list_limit = 1000
//! ```
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Association hops followed by the example inspector.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Rows per page when a page is requested without a valid size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest IN-list a single detached fetch query may carry.
pub const DEFAULT_IN_LIST_LIMIT: usize = 1000;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

///
/// QbeConfig
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct QbeConfig {
    /// Depth limit for example inspection; the root sits at depth 1.
    pub max_depth: usize,

    pub page_size: usize,

    /// Maximum owner keys per detached fetch batch.
    pub in_list_limit: usize,
}

impl QbeConfig {
    /// Load a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.in_list_limit == 0 {
            return Err(ConfigError::Invalid(
                "in_list_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for QbeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            page_size: DEFAULT_PAGE_SIZE,
            in_list_limit: DEFAULT_IN_LIST_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = QbeConfig::from_toml_str("").expect("empty config is valid");

        assert_eq!(config, QbeConfig::default());
        assert_eq!(config.in_list_limit, 1000);
    }

    #[test]
    fn partial_toml_overrides_named_keys() {
        let config = QbeConfig::from_toml_str("max_depth = 3\nin_list_limit = 2")
            .expect("partial config is valid");

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.in_list_limit, 2);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = QbeConfig::from_toml_str("in_list_limit = 0").expect_err("zero limit");

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = QbeConfig::from_toml_str("max_depth = \"deep\"").expect_err("bad type");

        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = QbeConfig::load("/nonexistent/qbe.toml").expect_err("missing file");

        assert!(matches!(err, ConfigError::Io(_)));
    }
}
