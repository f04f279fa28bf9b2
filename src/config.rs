//! Configuration management for weighbridge-console
//!
//! Config stored at: ~/.config/weighbridge-console/config.json

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend web-app endpoint URL
    #[serde(default)]
    pub api_url: String,

    /// Records per page in the detail view
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum records a query fetches from the backend
    #[serde(default = "default_query_limit")]
    pub query_limit: u32,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_page_size() -> usize {
    50
}

fn default_query_limit() -> u32 {
    2000
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            page_size: default_page_size(),
            query_limit: default_query_limit(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("config directory not found".to_string()))?
            .join("weighbridge-console");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// The endpoint URL, or an actionable error when it was never set
    pub fn require_api_url(&self) -> Result<&str> {
        if self.api_url.is_empty() {
            Err(Error::Validation(
                "API URL is not set. Run: weighbridge-console config --set-api-url <URL>"
                    .to_string(),
            ))
        } else {
            Ok(&self.api_url)
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Weighbridge Console Configuration")?;
        writeln!(f, "==================================")?;
        writeln!(f)?;
        writeln!(
            f,
            "API URL:       {}",
            if self.api_url.is_empty() {
                "(not set)"
            } else {
                &self.api_url
            }
        )?;
        writeln!(f, "Page size:     {}", self.page_size)?;
        writeln!(f, "Query limit:   {}", self.query_limit)?;
        writeln!(f, "Output format: {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:   {}", path.display())?;
        }

        Ok(())
    }
}
