use super::super::{CompletionConfig, GatewayConfig, LivenessConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the TOML file this config was read from, if any - not serialized
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
    /// Completion service credential. Usually supplied through the environment.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub liveness: LivenessConfig,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            api_key: None,
            log_level: default_log_level(),
            completion: CompletionConfig::default(),
            gateway: GatewayConfig::default(),
            liveness: LivenessConfig::default(),
        }
    }
}

impl Config {
    /// Check the invariants startup depends on.
    ///
    /// A missing credential is fatal: nothing useful can be served without it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            return Err(ConfigError::MissingCredential);
        }

        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(ConfigError::Validation(format!(
                "completion.temperature must be within 0.0..=2.0, got {}",
                self.completion.temperature
            )));
        }

        Ok(())
    }

    /// The credential, once `validate` has passed.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential)
    }
}
