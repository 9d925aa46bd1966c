use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use super::currency::CurrencyCode;
use crate::providers::currencylayer::DEFAULT_BASE_URL;

/// Environment variable that overrides the configured access key.
pub const ACCESS_KEY_ENV: &str = "FXCALC_ACCESS_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub access_key: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: default_base_url(),
            access_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Destination currency selected at startup.
    #[serde(default)]
    pub currency: CurrencyCode,
}

impl AppConfig {
    /// Loads the default config file, falling back to defaults when there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxcalc", "fxcalc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Access key from the environment, else from the config file.
    pub fn access_key(&self) -> Result<String> {
        Self::resolve_access_key(
            std::env::var(ACCESS_KEY_ENV).ok(),
            self.provider.access_key.as_deref(),
        )
    }

    fn resolve_access_key(from_env: Option<String>, from_file: Option<&str>) -> Result<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                from_file
                    .filter(|key| !key.trim().is_empty())
                    .map(str::to_string)
            })
            .with_context(|| {
                format!(
                    "No quote provider access key: set {ACCESS_KEY_ENV} or provider.access_key \
                     in the config file (run `fxcalc setup` to create one)"
                )
            })
    }
}
