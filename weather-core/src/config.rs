use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration: the on-disk file overlaid with the environment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [providers.mapbox]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Both provider credentials, known to be present.
///
/// Built once at start-up by [`Config::credentials`] and handed to the
/// provider constructors; clients never read the environment themselves.
#[derive(Clone)]
pub struct Credentials {
    pub mapbox_access_token: String,
    pub openweather_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("mapbox_access_token", &"<redacted>")
            .field("openweather_api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load the config file (if any), then let `MAPBOX_ACCESS_TOKEN` and
    /// `OPENWEATHER_API_KEY` from the process environment override it.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::from_file_and_env(&path, |name| std::env::var(name).ok())
    }

    pub fn from_file_and_env<F>(path: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::read_file(path)?;

        for id in ProviderId::all() {
            if let Some(value) = env(id.env_var()).filter(|v| !v.trim().is_empty()) {
                tracing::debug!(provider = %id, "credential taken from environment");
                cfg.upsert_provider_api_key(*id, value);
            }
        }

        Ok(cfg)
    }

    /// Read a config file, or return an empty default if it doesn't exist yet.
    pub fn read_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or replace a provider API key.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });
    }

    /// Returns API key for a provider, if present and not blank.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers
            .get(provider_id.as_str())
            .map(|cfg| cfg.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }

    /// Validate that every provider has a credential.
    pub fn credentials(&self) -> Result<Credentials> {
        let missing: Vec<&str> = ProviderId::all()
            .iter()
            .filter(|id| !self.is_provider_configured(**id))
            .map(|id| id.env_var())
            .collect();

        if !missing.is_empty() {
            return Err(anyhow!(
                "Missing required configuration: {}.\n\
                 Hint: set the variables in your environment or a .env file, \
                 or run `weather --configure <provider>`.",
                missing.join(", ")
            ));
        }

        let key = |id: ProviderId| self.provider_api_key(id).unwrap_or_default().to_string();

        Ok(Credentials {
            mapbox_access_token: key(ProviderId::Mapbox),
            openweather_api_key: key(ProviderId::OpenWeather),
        })
    }
}
