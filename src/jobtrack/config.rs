use crate::error::{JobtrackError, Result};
use crate::view::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEY_PAGE_SIZE: &str = "page-size";
pub const KEY_LOG_LEVEL: &str = "log-level";

/// Configuration for jobtrack, stored as `config.json` in the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Rows per page in listings
    #[serde(default = "default_page_size")]
    pub page_size: NonZeroUsize,

    /// Tracing filter directive (e.g. "debug", "jobtrack=trace")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_page_size() -> NonZeroUsize {
    DEFAULT_PAGE_SIZE
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            log_level: None,
        }
    }
}

impl TrackerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: TrackerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[KEY_PAGE_SIZE, KEY_LOG_LEVEL]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_PAGE_SIZE => Some(self.page_size.to_string()),
            KEY_LOG_LEVEL => Some(self.log_level.clone().unwrap_or_default()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            KEY_PAGE_SIZE => {
                self.page_size = value.trim().parse().map_err(|_| {
                    JobtrackError::Config(format!(
                        "{} must be a positive whole number, got {:?}",
                        KEY_PAGE_SIZE, value
                    ))
                })?;
            }
            KEY_LOG_LEVEL => {
                let value = value.trim();
                self.log_level = (!value.is_empty()).then(|| value.to_string());
            }
            other => {
                return Err(JobtrackError::Config(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}
