//! Runs every source adapter in isolation

use tracing::{info, warn};

use crate::domain::{AggregateReport, TableProvider};
use crate::infrastructure::config::SourceEndpoint;
use crate::infrastructure::parsing::profiles::builtin_profile;
use crate::infrastructure::parsing::{SourceAdapter, SourceProfile};

#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    adapters: Vec<SourceAdapter>,
}

impl AggregationEngine {
    pub const fn new(adapters: Vec<SourceAdapter>) -> Self {
        Self { adapters }
    }

    pub fn from_profiles(profiles: impl IntoIterator<Item = SourceProfile>) -> Self {
        Self::new(profiles.into_iter().map(SourceAdapter::new).collect())
    }

    /// One adapter per configured endpoint, in configuration order.
    /// Endpoints without a built-in profile are skipped.
    pub fn for_endpoints(endpoints: &[SourceEndpoint]) -> Self {
        Self::from_profiles(endpoints.iter().filter_map(|endpoint| {
            let profile = builtin_profile(&endpoint.brand);
            if profile.is_none() {
                warn!("No extraction profile for '{}', skipping", endpoint.brand);
            }
            profile
        }))
    }

    pub fn adapters(&self) -> &[SourceAdapter] {
        &self.adapters
    }

    /// Find the adapter for `brand` (case-insensitive).
    pub fn adapter(&self, brand: &str) -> Option<&SourceAdapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.brand().eq_ignore_ascii_case(brand))
    }

    /// Every adapter runs, whatever its siblings did.
    pub fn run(&self, provider: &dyn TableProvider) -> AggregateReport {
        let mut report = AggregateReport::new();
        for adapter in &self.adapters {
            report.insert(adapter.run(provider));
        }

        info!(
            "Aggregation finished: {}/{} source(s) succeeded",
            report.success_count(),
            report.len()
        );
        report
    }
}
