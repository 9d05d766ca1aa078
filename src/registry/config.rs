use std::path::Path;

use thiserror::Error;

pub const KEY_ALGORITHM_SHA256: &str = "sha256";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported term key algorithm: {0}")]
    UnsupportedKeyAlgorithm(String),
}

/// How a literal that was never selected or unselected reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSelection {
    #[default]
    Unselected,
    Selected,
}

// Serializable, comparable, explicit defaults via v0()
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegistryConfig {
    pub version: String,
    pub key_algorithm: String,
    #[serde(default)]
    pub default_selection: DefaultSelection,
}

impl RegistryConfig {
    pub fn v0() -> Self {
        Self {
            version: "1".into(),
            key_algorithm: KEY_ALGORITHM_SHA256.into(),
            default_selection: DefaultSelection::Unselected,
        }
    }

    pub fn with_default_selection(mut self, default_selection: DefaultSelection) -> Self {
        self.default_selection = default_selection;
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_algorithm != KEY_ALGORITHM_SHA256 {
            return Err(ConfigError::UnsupportedKeyAlgorithm(self.key_algorithm.clone()));
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::v0()
    }
}
