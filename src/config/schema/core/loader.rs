use super::Config;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "MAILROOM_CONFIG";

impl Config {
    /// Build the process configuration.
    ///
    /// Layers, lowest priority first: built-in defaults, the TOML file named
    /// by `MAILROOM_CONFIG`, a `.env` file in the working directory, then
    /// process environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case in production.
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::Load(format!("failed to read .env: {e}"))),
        }

        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file. Environment overrides are not applied.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        config.config_path = Some(PathBuf::from(path));
        Ok(config)
    }
}
