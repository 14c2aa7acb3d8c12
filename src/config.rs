//! Engine configuration and logging setup

use crate::graph::vocab::MAX_LABEL_LENGTH;
use crate::graph::Sort;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Engine configuration
///
/// Every field has a default, so a partial YAML document is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum label length in characters for resources, predicates, classes, lists and literals
    pub max_label_length: usize,
    /// Sort applied to bundles when the caller does not pass one
    pub default_bundle_sort: Sort,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Load the demo data set on startup
    pub seed: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_label_length: MAX_LABEL_LENGTH,
            default_bundle_sort: Sort::unsorted(),
            log_filter: "info".to_string(),
            seed: true,
        }
    }
}

impl GraphConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured filter. Calling this twice is harmless.
pub fn init_logging(config: &GraphConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
