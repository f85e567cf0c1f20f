//! Configuration infrastructure
//!
//! Settings are layered with the `config` crate:
//! 1. Built-in defaults (`AppConfig::default()`)
//! 2. Optional TOML file (`--config`, else `gold-price-feed.toml` in the user config dir)
//! 3. Environment variables, e.g. `GOLD_FEED__HTTP__MAX_ATTEMPTS=5`

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::infrastructure::parsing::profiles;

/// Default configuration values
pub mod defaults {
    pub const APP_DIR_NAME: &str = "gold-price-feed";
    pub const CONFIG_FILE_NAME: &str = "gold-price-feed.toml";
    pub const SNAPSHOT_FILE_NAME: &str = "gold_history.json";

    /// Prefix of overriding environment variables (`GOLD_FEED__...`)
    pub const ENV_PREFIX: &str = "GOLD_FEED";
    pub const ENV_SEPARATOR: &str = "__";

    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
    pub const ACCEPT_LANGUAGE: &str = "vi-VN,vi;q=0.9,en;q=0.8";
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;
    pub const MAX_ATTEMPTS: u32 = 3;
    pub const RETRY_DELAY_MS: u64 = 2000;

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
}

/// Publisher pages
pub mod sources {
    pub const PNJ_URL: &str = "https://giavang.pnj.com.vn/";
    pub const DOJI_URL: &str = "https://giavang.doji.vn/";
    pub const SJC_URL: &str = "https://sjc.com.vn/giavang/textContent.jsp";
    pub const SJC_REFERER: &str = "https://sjc.com.vn/";
}

/// Where one brand's page is fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEndpoint {
    pub brand: String,
    pub url: String,
    #[serde(default)]
    pub referer: Option<String>,
}

impl SourceEndpoint {
    pub fn new(brand: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            url: url.into(),
            referer: None,
        }
    }

    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }
}

/// HTTP fetch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub timeout_seconds: u64,
    /// Total attempts per page, including the first
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            accept: defaults::ACCEPT.to_string(),
            accept_language: defaults::ACCEPT_LANGUAGE.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_attempts: defaults::MAX_ATTEMPTS,
            retry_delay_ms: defaults::RETRY_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: app_data_dir().join(defaults::SNAPSHOT_FILE_NAME),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// JSON formatted file logs
    pub json_format: bool,

    /// Console output (stderr; stdout carries the report)
    pub console_output: bool,

    /// Daily rolling file output
    pub file_output: bool,

    /// Log directory; defaults to `logs/` under the user data dir
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            module_filters: HashMap::new(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sources in aggregation order
    pub sources: Vec<SourceEndpoint>,
    pub http: HttpConfig,
    pub snapshot: SnapshotConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceEndpoint::new(profiles::PNJ, sources::PNJ_URL),
                SourceEndpoint::new(profiles::DOJI, sources::DOJI_URL),
                SourceEndpoint::new(profiles::SJC, sources::SJC_URL).with_referer(sources::SJC_REFERER),
            ],
            http: HttpConfig::default(),
            snapshot: SnapshotConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("at least one source must be configured");
        }
        let mut seen = HashSet::new();
        for endpoint in &self.sources {
            if !seen.insert(endpoint.brand.to_uppercase()) {
                bail!("source '{}' is configured more than once", endpoint.brand);
            }
            if profiles::builtin_profile(&endpoint.brand).is_none() {
                bail!("no extraction profile for source '{}'", endpoint.brand);
            }
            if endpoint.url.trim().is_empty() {
                bail!("source '{}' has an empty url", endpoint.brand);
            }
        }
        if self.http.max_attempts == 0 {
            bail!("http.max_attempts must be at least 1");
        }
        Ok(())
    }
}

/// Application configuration directory
pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR_NAME))
}

/// Application data directory, falling back to the working directory
pub fn app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(defaults::APP_DIR_NAME)
}

/// Load the layered configuration.
///
/// An explicit `path` must exist; the default location is optional.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let defaults = Config::try_from(&AppConfig::default()).context("Failed to encode default configuration")?;
    let mut builder = Config::builder().add_source(defaults);

    match path {
        Some(path) => {
            debug!("Loading configuration from {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            if let Some(dir) = app_config_dir() {
                builder = builder.add_source(File::from(dir.join(defaults::CONFIG_FILE_NAME)).required(false));
            }
        }
    }

    let config: AppConfig = builder
        .add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator(defaults::ENV_SEPARATOR)
                .separator(defaults::ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    config.validate()?;
    Ok(config)
}
