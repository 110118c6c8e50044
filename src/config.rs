//! Planner configuration loaded from a TOML file and environment variables.

use std::env;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error::{PlannerError, Result};
use crate::schedule::DEFAULT_PALETTE_SIZE;

pub const DEFAULT_CONFIG_PATH: &str = "planner.toml";

/// Minimum length accepted by the cookie signing key
const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Address the web server binds to
    pub host: String,
    /// Web server port (default: 8080)
    pub port: u16,
    /// CSV file listing the offered course components
    pub catalog_path: PathBuf,
    /// Number of distinct course colors before the palette wraps
    pub palette_size: usize,
    /// Cookie signing key; a random key is generated when absent
    pub session_key: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            catalog_path: PathBuf::from("data/catalog.csv"),
            palette_size: DEFAULT_PALETTE_SIZE,
            session_key: None,
        }
    }
}

impl PlannerConfig {
    /// Parses configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PlannerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads configuration.
    ///
    /// # Environment Variables
    /// - `PLANNER_CONFIG` (optional): path of the TOML file (default: `planner.toml`)
    /// - `PLANNER_PORT` (optional): overrides `port`
    ///
    /// Falls back to defaults when the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = env::var("PLANNER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = if Path::new(&path).exists() {
            info!("Loading configuration from {}", path);
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(port) = env::var("PLANNER_PORT") {
            config.port = port
                .parse()
                .map_err(|_| PlannerError::InvalidConfig(format!("PLANNER_PORT is not a port: {}", port)))?;
        }

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.palette_size == 0 {
            return Err(PlannerError::InvalidConfig("palette_size must be at least 1".to_string()));
        }
        if let Some(key) = &self.session_key {
            if key.len() < MIN_SESSION_KEY_LEN {
                return Err(PlannerError::InvalidConfig(format!(
                    "session_key must be at least {} bytes",
                    MIN_SESSION_KEY_LEN
                )));
            }
        }
        Ok(())
    }
}
