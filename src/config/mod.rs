//! Controller configuration loading

use crate::core::query::DEFAULT_MAX_LIMIT;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Deploy-time configuration for a controller
///
/// Controllers start readonly; deployments that want the mutating verbs
/// flip the flag here and pass the config to `init_with_mode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Keep PUT/POST/DELETE disabled
    pub readonly: bool,

    /// Upper bound for client-supplied list limits
    pub max_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            readonly: true,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_readonly() {
        let config = ControllerConfig::default();
        assert!(config.readonly);
        assert_eq!(config.max_limit, DEFAULT_MAX_LIMIT);
    }

    #[test]
    fn test_from_yaml_str() {
        let config = ControllerConfig::from_yaml_str("readonly: false\nmax_limit: 200\n").unwrap();
        assert!(!config.readonly);
        assert_eq!(config.max_limit, 200);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ControllerConfig::from_yaml_str("readonly: false\n").unwrap();
        assert!(!config.readonly);
        assert_eq!(config.max_limit, DEFAULT_MAX_LIMIT);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "readonly: false").unwrap();
        writeln!(file, "max_limit: 25").unwrap();

        let config = ControllerConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert!(!config.readonly);
        assert_eq!(config.max_limit, 25);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(ControllerConfig::from_yaml_str("readonly: [nonsense").is_err());
        assert!(ControllerConfig::from_yaml_file("/nonexistent/config.yaml").is_err());
    }
}
