//! Logging system configuration and initialization
//!
//! - Console output on stderr (stdout is reserved for the JSON report)
//! - Optional daily rolling file output, plain or JSON
//! - Vietnam time (ICT, UTC+7) timestamps
//! - `RUST_LOG` overrides the configured level

use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, Utc};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;
use crate::infrastructure::config::app_data_dir;

const LOG_FILE_PREFIX: &str = "gold-price-feed.log";
const ICT_OFFSET_SECONDS: i32 = 7 * 3600;

/// Dependencies that are noisy below `trace`
const QUIET_TARGETS: [(&str, &str); 4] = [
    ("reqwest", "info"),
    ("hyper", "warn"),
    ("html5ever", "warn"),
    ("selectors", "warn"),
];

// File writer guards must outlive the subscriber.
static LOG_GUARDS: Lazy<Mutex<Vec<WorkerGuard>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Timestamps in Indochina Time (UTC+7)
struct IctTimeFormatter;

impl FormatTime for IctTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now();
        match FixedOffset::east_opt(ICT_OFFSET_SECONDS) {
            Some(offset) => write!(w, "{}", now.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S%.3f %:z")),
            None => write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f UTC")),
        }
    }
}

/// Directory for log files
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    config
        .log_dir
        .clone()
        .unwrap_or_else(|| app_data_dir().join("logs"))
}

/// Build the level filter: `RUST_LOG` wins, else the configured level with
/// dependency noise lowered and per-module overrides applied.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    if !config.level.to_lowercase().contains("trace") {
        for (target, level) in QUIET_TARGETS {
            filter = filter.add_directive(format!("{target}={level}").parse()?);
        }
    }

    for (module, level) in &config.module_filters {
        let directive = format!("{module}={level}");
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("Invalid module filter '{directive}'"))?,
        );
    }

    Ok(filter)
}

/// Initialize logging with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    if !config.console_output && !config.file_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = build_env_filter(config)?;

    let console_layer = config.console_output.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(IctTimeFormatter)
            .with_target(false)
    });

    let mut plain_file_layer = None;
    let mut json_file_layer = None;
    let log_dir = get_log_directory(config);

    if config.file_output {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let (file_writer, file_guard) = non_blocking(rolling::daily(&log_dir, LOG_FILE_PREFIX));
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(file_guard);

        if config.json_format {
            json_file_layer = Some(
                fmt::Layer::new()
                    .json()
                    .with_writer(file_writer)
                    .with_timer(IctTimeFormatter)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false),
            );
        } else {
            plain_file_layer = Some(
                fmt::Layer::new()
                    .with_writer(file_writer)
                    .with_timer(IctTimeFormatter)
                    .with_target(false)
                    .with_ansi(false),
            );
        }
    }

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(plain_file_layer)
        .with(json_file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    if config.file_output {
        info!("Log directory: {:?} (json: {})", log_dir, config.json_format);
    }

    Ok(())
}

/// Log system information for diagnostics
pub fn log_system_info() {
    info!("=== Gold Price Feed ===");
    info!("Application version: {}", env!("CARGO_PKG_VERSION"));
    info!("Operating system: {}", std::env::consts::OS);
    info!("Architecture: {}", std::env::consts::ARCH);
    info!("=======================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.console_output);
        assert!(!config.file_output);
    }

    #[test]
    fn test_log_directory_override() {
        let config = LoggingConfig {
            log_dir: Some(PathBuf::from("/var/log/gold")),
            ..LoggingConfig::default()
        };
        assert_eq!(get_log_directory(&config), PathBuf::from("/var/log/gold"));
        assert!(get_log_directory(&LoggingConfig::default()).ends_with("logs"));
    }

    #[test]
    fn test_module_filters_parse() {
        let mut config = LoggingConfig::default();
        config.module_filters.insert("gold_price_feed_lib".into(), "debug".into());
        assert!(build_env_filter(&config).is_ok());
    }

    #[test]
    fn test_no_output_is_rejected() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..LoggingConfig::default()
        };
        assert!(init_logging_with_config(&config).is_err());
    }
}
