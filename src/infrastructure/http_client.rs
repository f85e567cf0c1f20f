//! HTTP fetch collaborator
//!
//! Pages are fetched with browser-like headers and a bounded retry, then turned
//! into candidate tables up front. The extraction core only ever sees the
//! resulting [`PrefetchedTables`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{RawTable, TableProvider};
use crate::infrastructure::config::{HttpConfig, SourceEndpoint};
use crate::infrastructure::html_parser::HtmlTableExtractor;
use crate::domain::{ExtractionError, ExtractionResult};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("invalid header value for {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} still failing after {attempts} attempt(s): {last_error}")]
    Exhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

impl FetchError {
    pub fn request(url: &str, error: impl std::fmt::Display) -> Self {
        Self::Request {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }

    /// Client errors other than throttling are not worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Seam between the pipeline and the network
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, endpoint: &SourceEndpoint) -> Result<String, FetchError>;
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}

/// reqwest-backed fetcher with retry
pub struct HttpClient {
    client: Client,
    config: HttpConfig,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user-agent", &config.user_agent)?);
        headers.insert(ACCEPT, header_value("accept", &config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value("accept-language", &config.accept_language)?);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &HttpConfig {
        &self.config
    }

    async fn fetch_once(&self, endpoint: &SourceEndpoint) -> Result<String, FetchError> {
        let mut request = self.client.get(&endpoint.url);
        if let Some(referer) = &endpoint.referer {
            request = request.header(REFERER, header_value("referer", referer)?);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::request(&endpoint.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: endpoint.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::request(&endpoint.url, e))?;
        debug!("Fetched {} ({} chars)", endpoint.url, text.len());
        Ok(text)
    }
}

/// Run `attempt` until it succeeds, fails with a non-retryable error or
/// `max_attempts` tries are spent.
pub async fn fetch_with_retry<F, Fut>(
    url: &str,
    max_attempts: u32,
    retry_delay: Duration,
    mut attempt: F,
) -> Result<String, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, FetchError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut tried = 0;

    loop {
        tried += 1;
        info!("Fetching {} ({}/{})", url, tried, max_attempts);

        let error = match attempt().await {
            Ok(body) => return Ok(body),
            Err(e) => e,
        };

        if !error.is_retryable() {
            return Err(error);
        }
        if tried >= max_attempts {
            return Err(FetchError::Exhausted {
                url: url.to_string(),
                attempts: tried,
                last_error: error.to_string(),
            });
        }

        warn!("🔄 {} failed: {}, retrying in {}ms", url, error, retry_delay.as_millis());
        tokio::time::sleep(retry_delay).await;
    }
}

#[async_trait]
impl DocumentFetcher for HttpClient {
    async fn fetch(&self, endpoint: &SourceEndpoint) -> Result<String, FetchError> {
        fetch_with_retry(
            &endpoint.url,
            self.config.max_attempts,
            Duration::from_millis(self.config.retry_delay_ms),
            || self.fetch_once(endpoint),
        )
        .await
    }
}

/// Tables gathered before extraction, keyed by brand (case-insensitive).
///
/// A brand whose fetch failed keeps the failure text; a brand never fetched is
/// reported as unavailable too.
#[derive(Debug, Clone, Default)]
pub struct PrefetchedTables {
    by_brand: HashMap<String, Result<Vec<RawTable>, String>>,
}

impl PrefetchedTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tables(&mut self, brand: &str, tables: Vec<RawTable>) {
        self.by_brand.insert(brand.to_uppercase(), Ok(tables));
    }

    pub fn insert_failure(&mut self, brand: &str, reason: impl Into<String>) {
        self.by_brand.insert(brand.to_uppercase(), Err(reason.into()));
    }

    #[must_use]
    pub fn with_tables(mut self, brand: &str, tables: Vec<RawTable>) -> Self {
        self.insert_tables(brand, tables);
        self
    }

    #[must_use]
    pub fn with_failure(mut self, brand: &str, reason: impl Into<String>) -> Self {
        self.insert_failure(brand, reason);
        self
    }

    pub fn len(&self) -> usize {
        self.by_brand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_brand.is_empty()
    }
}

impl TableProvider for PrefetchedTables {
    fn tables_for(&self, brand: &str) -> ExtractionResult<Vec<RawTable>> {
        match self.by_brand.get(&brand.to_uppercase()) {
            Some(Ok(tables)) => Ok(tables.clone()),
            Some(Err(reason)) => Err(ExtractionError::source_unavailable(reason.clone())),
            None => Err(ExtractionError::source_unavailable(format!("{brand} was not fetched"))),
        }
    }
}

/// Fetch every endpoint in order and parse its tables.
///
/// Failures are recorded per brand; one bad page never stops the others.
pub async fn collect_tables(
    fetcher: &dyn DocumentFetcher,
    extractor: &HtmlTableExtractor,
    endpoints: &[SourceEndpoint],
) -> PrefetchedTables {
    let mut prefetched = PrefetchedTables::new();

    for endpoint in endpoints {
        match fetcher.fetch(endpoint).await {
            Ok(html) => {
                let tables = extractor.parse_tables(&html);
                debug!("{}: {} candidate table(s)", endpoint.brand, tables.len());
                prefetched.insert_tables(&endpoint.brand, tables);
            }
            Err(e) => {
                warn!("❌ {}: fetch failed: {}", endpoint.brand, e);
                prefetched.insert_failure(&endpoint.brand, e.to_string());
            }
        }
    }

    prefetched
}
