//! Application configuration management.
//!
//! This module handles loading and saving the client configuration: the
//! backend base URL override and the last email used to sign in.
//!
//! Configuration is stored at `~/.config/quizread/config.json`. The
//! `QUIZREAD_API_URL` environment variable (also read from `.env`) takes
//! precedence over the stored base URL.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "quizread";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Production backend, used when nothing overrides it
const DEFAULT_API_URL: &str = "https://quizread-backend.onrender.com";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
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

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for durable storage and logs
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Resolve the backend base URL: environment override first, then the
    /// config file, then the production default.
    pub fn api_url(&self) -> String {
        std::env::var("QUIZREAD_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }
}
