//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Validation
//!
//! Only the display region id is checked. The server value is taken as
//! given: a base URL that does not parse simply produces requests that fail
//! silently, the same as any other failed load.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Contents of a config file.
///
/// # Example
///
/// ```toml
/// server = "https://revert.example.org"
/// region = "changesets"
/// max_changesets = 20
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Server base URL
    pub server: Option<String>,

    /// Display region id
    pub region: Option<String>,

    /// Upper bound on ids accepted by `--normalize`
    pub max_changesets: Option<usize>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(region) = &self.region {
            validate_region(region)?;
        }

        if self.max_changesets == Some(0) {
            return Err(ConfigError::InvalidValue(
                "max_changesets must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Check that a display region id is usable as an element id.
pub fn validate_region(region: &str) -> Result<(), ConfigError> {
    if region.is_empty() {
        return Err(ConfigError::InvalidValue(
            "region cannot be empty".to_string(),
        ));
    }
    if region.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue(format!(
            "invalid region '{}': must not contain whitespace",
            region
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FileConfig::default();
        assert!(config.server.is_none());
        assert!(config.region.is_none());
        assert!(config.max_changesets.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_region_rejected() {
        let config = FileConfig {
            region: Some(String::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn region_with_whitespace_rejected() {
        let config = FileConfig {
            region: Some("change sets".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_changesets_rejected() {
        let config = FileConfig {
            max_changesets: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_server_is_accepted() {
        let config = FileConfig {
            server: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_toml() {
        let config: FileConfig = toml::from_str(
            r#"
            server = "https://revert.example.org"
            region = "results"
            max_changesets = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.server.as_deref(), Some("https://revert.example.org"));
        assert_eq!(config.region.as_deref(), Some("results"));
        assert_eq!(config.max_changesets, Some(5));
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("colour = \"blue\"");
        assert!(result.is_err());
    }
}
