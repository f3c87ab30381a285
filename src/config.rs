use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::LanguagePreference;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_preferred_languages")]
    pub preferred_languages: Vec<String>,
    #[serde(default = "default_translation_language")]
    pub translation_language: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            preferred_languages: default_preferred_languages(),
            translation_language: default_translation_language(),
            request_timeout_secs: default_request_timeout_secs(),
            accept_language: default_accept_language(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_preferred_languages() -> Vec<String> {
    vec!["en".to_string(), "en-US".to_string(), "en-GB".to_string()]
}

fn default_translation_language() -> String {
    "en".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_accept_language() -> String {
    "en-US".to_string()
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load the config at `config_path`, writing the defaults there first if
    /// the file does not exist yet.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Config::default();
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
            std::fs::write(config_path, serde_json::to_string_pretty(&config)?)
                .context("Failed to write default config file")?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;
        let config: Config = serde_json::from_str(&content)
            .context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn language_preference(&self) -> LanguagePreference {
        LanguagePreference {
            languages: self.preferred_languages.clone(),
            translate_to: self.translation_language.clone(),
        }
    }
}

fn get_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("yt-transcript").join("config.json"))
}
