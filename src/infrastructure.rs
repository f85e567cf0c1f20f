//! Infrastructure layer: table extraction, fetching, persistence, configuration
//! and logging.

pub mod config;
pub mod html_parser;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod snapshot_store;

pub use config::{AppConfig, HttpConfig, LoggingConfig, SnapshotConfig, SourceEndpoint, load_config};
pub use html_parser::{HtmlTableExtractor, TableExtractorConfig};
pub use http_client::{DocumentFetcher, FetchError, HttpClient, PrefetchedTables, collect_tables, fetch_with_retry};
pub use logging::{get_log_directory, init_logging, init_logging_with_config, log_system_info};
pub use parsing::{ExtractionError, ExtractionResult, SourceAdapter, SourceProfile};
pub use snapshot_store::{JsonFileSnapshotStore, SnapshotError};
