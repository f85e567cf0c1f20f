//! One feed run: aggregate, link against the previous snapshot, persist

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::aggregation::AggregationEngine;
use super::trend::link_headline;
use crate::domain::{AggregateReport, BrandTrend, HistorySnapshot, SnapshotStore, TableProvider};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::html_parser::HtmlTableExtractor;
use crate::infrastructure::http_client::{HttpClient, collect_tables};
use crate::infrastructure::snapshot_store::JsonFileSnapshotStore;

/// Everything a report consumer receives from one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub generated_at: DateTime<Utc>,
    pub report: AggregateReport,
    pub trends: Vec<BrandTrend>,
    /// Snapshot to persist for the next run; brands without a headline are absent.
    #[serde(skip)]
    pub next_snapshot: HistorySnapshot,
}

impl RunOutcome {
    pub fn has_headlines(&self) -> bool {
        !self.next_snapshot.is_empty()
    }

    pub fn trend(&self, brand: &str) -> Option<&BrandTrend> {
        self.trends.iter().find(|trend| trend.brand == brand)
    }
}

/// Pure core of a run. `prior` is the previous snapshot, if any; the snapshot
/// to persist comes back in [`RunOutcome::next_snapshot`].
pub fn run_once(
    engine: &AggregationEngine,
    provider: &dyn TableProvider,
    prior: Option<&HistorySnapshot>,
    now: DateTime<Utc>,
) -> RunOutcome {
    let report = engine.run(provider);

    let trends: Vec<BrandTrend> = engine
        .adapters()
        .iter()
        .map(|adapter| {
            let brand = adapter.brand();
            let quotes = report.get(brand).map_or(&[][..], |result| result.quotes.as_slice());
            let prior_entry = prior.and_then(|snapshot| snapshot.entry(brand));
            link_headline(brand, &adapter.profile().headline_priorities, prior_entry, quotes)
        })
        .collect();

    let next_snapshot = HistorySnapshot::new(now, trends.iter().filter_map(|trend| trend.headline.clone()));

    RunOutcome {
        generated_at: now,
        report,
        trends,
        next_snapshot,
    }
}

/// Previous snapshot; read failures count as no history.
pub fn load_prior(store: &dyn SnapshotStore) -> Option<HistorySnapshot> {
    match store.load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("⚠️ Ignoring unreadable snapshot: {}", e);
            None
        }
    }
}

/// Save the outcome's snapshot when it carries at least one headline.
/// Returns whether a snapshot was written; failures are logged only.
pub fn persist(store: &dyn SnapshotStore, outcome: &RunOutcome) -> bool {
    if !outcome.has_headlines() {
        info!("No headline this run, keeping the previous snapshot");
        return false;
    }

    match store.save(&outcome.next_snapshot) {
        Ok(()) => true,
        Err(e) => {
            error!("❌ Failed to save snapshot: {}", e);
            false
        }
    }
}

/// Fetch every configured source, run the pipeline and persist the snapshot
/// unless `dry_run`.
pub async fn execute(config: &AppConfig, dry_run: bool) -> Result<RunOutcome> {
    let client = HttpClient::new(config.http.clone()).context("Failed to create HTTP client")?;
    let extractor = HtmlTableExtractor::new().context("Failed to create table extractor")?;
    let engine = AggregationEngine::for_endpoints(&config.sources);
    let store = JsonFileSnapshotStore::new(&config.snapshot.path);

    let prefetched = collect_tables(&client, &extractor, &config.sources).await;
    let prior = load_prior(&store);
    let outcome = run_once(&engine, &prefetched, prior.as_ref(), Utc::now());

    if dry_run {
        info!("Dry run, snapshot not saved");
    } else {
        persist(&store, &outcome);
    }
    Ok(outcome)
}
