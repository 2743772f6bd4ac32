//! Configuration loading and management
//!
//! Configuration comes from YAML, every field has a default, and a handful of
//! environment variables override the file:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `CATALOG_BIND_ADDR` | `server.bind_addr` |
//! | `CATALOG_DATABASE_URL` | `database.url` |
//! | `CATALOG_API_BASE_URL` | `client.api_base_url` |
//! | `CATALOG_FETCH_TIMEOUT_SECS` | `client.timeout_secs` |
//! | `CATALOG_PAGE_SIZE` | `view.page_size` |

use crate::core::error::{CatalogResult, ConfigError};
use crate::engine::DEFAULT_PAGE_SIZE;
use crate::layout::{Layout, LayoutPreset};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

/// Database settings; without a URL the in-memory store is used
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

/// API client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the view fetches from, without the `/api/...` path
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Table view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Per-layout presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutsConfig {
    pub table: LayoutPreset,
    pub grid: LayoutPreset,
    pub mobile: LayoutPreset,
}

impl Default for LayoutsConfig {
    fn default() -> Self {
        Self {
            table: Layout::Table.default_preset(),
            grid: Layout::Grid.default_preset(),
            mobile: Layout::Mobile.default_preset(),
        }
    }
}

impl LayoutsConfig {
    pub fn preset(&self, layout: Layout) -> LayoutPreset {
        match layout {
            Layout::Table => self.table,
            Layout::Grid => self.grid,
            Layout::Mobile => self.mobile,
        }
    }
}

/// Complete catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub client: ClientConfig,
    pub view: ViewConfig,
    pub layouts: LayoutsConfig,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        serde_yaml::from_str::<Self>(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> CatalogResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Defaults, then the optional file, then the environment, then validation
    pub fn load(path: Option<&Path>) -> CatalogResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CATALOG_*` overrides read through `lookup`
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(addr) = lookup("CATALOG_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(url) = lookup("CATALOG_DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(url) = lookup("CATALOG_API_BASE_URL") {
            self.client.api_base_url = url;
        }
        if let Some(raw) = lookup("CATALOG_FETCH_TIMEOUT_SECS") {
            self.client.timeout_secs = parse_number("client.timeout_secs", &raw)?;
        }
        if let Some(raw) = lookup("CATALOG_PAGE_SIZE") {
            self.view.page_size = parse_number("view.page_size", &raw)?;
        }
        Ok(())
    }

    /// Reject values the engine or client cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view.page_size == 0 {
            return Err(invalid("view.page_size", "0", "must be at least 1"));
        }
        if self.client.timeout_secs == 0 {
            return Err(invalid("client.timeout_secs", "0", "must be at least 1"));
        }
        for layout in [Layout::Table, Layout::Grid, Layout::Mobile] {
            let preset = self.layouts.preset(layout);
            if let Err(e) = preset.stock.validate() {
                return Err(invalid(
                    &format!("layouts.{}.stock", layout),
                    &format!("{}/{}", preset.stock.high_above, preset.stock.medium_above),
                    &e.to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(field, raw, "expected a non-negative integer"))
}

fn invalid(field: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
