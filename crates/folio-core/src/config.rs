//! Application configuration management.
//!
//! This module handles loading and saving the content backend settings
//! (project id, dataset, API version, CDN usage). The read token is never
//! written to disk; it only comes from the environment.
//!
//! Configuration is stored at `~/.config/folio/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "folio";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Dataset and API version the site was built against
const DEFAULT_DATASET: &str = "production";
const DEFAULT_API_VERSION: &str = "2024-01-01";

pub const ENV_PROJECT_ID: &str = "SANITY_PROJECT_ID";
pub const ENV_DATASET: &str = "SANITY_DATASET";
pub const ENV_API_VERSION: &str = "SANITY_API_VERSION";
pub const ENV_API_TOKEN: &str = "SANITY_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub project_id: Option<String>,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_dataset() -> String {
    DEFAULT_DATASET.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_use_cdn() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: default_use_cdn(),
            token: None,
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Overlay values from `lookup` (normally the process environment).
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(project_id) = get(ENV_PROJECT_ID) {
            self.project_id = Some(project_id);
        }
        if let Some(dataset) = get(ENV_DATASET) {
            self.dataset = dataset;
        }
        if let Some(version) = get(ENV_API_VERSION) {
            self.api_version = version;
        }
        if let Some(token) = get(ENV_API_TOKEN) {
            self.token = Some(token);
        }
    }

    pub fn is_configured(&self) -> bool {
        self.project_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;

        let mut path = cache_dir.join(APP_NAME);
        if let Some(ref project) = self.project_id {
            path = path.join(project).join(&self.dataset);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dataset, "production");
        assert_eq!(config.api_version, "2024-01-01");
        assert!(config.use_cdn);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_overrides_apply_and_skip_empty_values() {
        let env: HashMap<&str, &str> = [
            (ENV_PROJECT_ID, "abc123"),
            (ENV_DATASET, ""),
            (ENV_API_TOKEN, "sk-read"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.project_id.as_deref(), Some("abc123"));
        assert_eq!(config.dataset, "production");
        assert_eq!(config.token.as_deref(), Some("sk-read"));
        assert!(config.is_configured());
    }

    #[test]
    fn test_token_is_not_serialized() {
        let config = Config {
            token: Some("secret".to_string()),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));

        let parsed: Config = serde_json::from_str(r#"{"project_id":"p"}"#).unwrap();
        assert_eq!(parsed.dataset, "production");
        assert!(parsed.token.is_none());
    }
}
