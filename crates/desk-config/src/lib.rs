//! # desk-config
//!
//! Layered configuration loading for the triage desk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DESK_*` prefix, `__` as separator)
//! 2. Project-level `.desk/config.toml`
//! 3. User-level `~/.config/desk/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `DESK_API__BASE_URL` -> `api.base_url`,
//! `DESK_GENERAL__DEFAULT_TONE` -> `general.default_tone`, etc.
//!
//! ```no_run
//! use desk_config::DeskConfig;
//!
//! let config = DeskConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.normalized_base_url());
//! ```

mod api;
mod clipboard;
mod error;
mod general;

pub use api::ApiConfig;
pub use clipboard::ClipboardConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for config overrides.
pub const ENV_PREFIX: &str = "DESK_";

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".desk/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DeskConfig {
    /// Load and validate configuration from TOML files and environment.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file from the current
    /// directory, if one exists.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("desk").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::enums::ReplyTone;

    #[test]
    fn default_config_is_valid() {
        let config = DeskConfig::default();
        assert!(config.api.validate().is_ok());
        assert_eq!(config.clipboard.strategies, vec!["system", "osc52"]);
        assert_eq!(config.general.default_tone, ReplyTone::Empathetic);
    }

    #[test]
    fn figment_extracts_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config: DeskConfig = DeskConfig::figment().extract()?;
            assert_eq!(config.api.timeout_secs, 30);
            assert_eq!(config.general.default_limit, 50);
            Ok(())
        });
    }
}
