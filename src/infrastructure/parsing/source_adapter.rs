//! Source adapter: prefilter → select → extract → row filter

use tracing::{debug, info, warn};

use super::profiles::SourceProfile;
use super::record_extractor::extract;
use super::table_selector::select;
use crate::domain::{BrandResult, Quote, RawTable, TableProvider};
use crate::domain::{ExtractionError, ExtractionResult};

#[derive(Debug, Clone)]
pub struct SourceAdapter {
    profile: SourceProfile,
}

impl SourceAdapter {
    pub const fn new(profile: SourceProfile) -> Self {
        Self { profile }
    }

    pub fn brand(&self) -> &str {
        &self.profile.brand
    }

    pub const fn profile(&self) -> &SourceProfile {
        &self.profile
    }

    /// Turn the candidate tables of one document into this brand's quotes.
    pub fn extract(&self, tables: &[RawTable]) -> ExtractionResult<Vec<Quote>> {
        let profile = &self.profile;
        if tables.is_empty() {
            return Err(ExtractionError::UnparsableTable);
        }

        let candidates: Vec<&RawTable> = match &profile.table_prefilter {
            Some(prefilter) => tables.iter().filter(|table| prefilter.accepts(table)).collect(),
            None => tables.iter().collect(),
        };
        if candidates.is_empty() {
            debug!("{}: prefilter rejected all {} table(s)", profile.brand, tables.len());
            return Err(ExtractionError::no_matching_table(tables.len(), &profile.required_roles));
        }

        let selection = select(candidates, &profile.rules, &profile.required_roles)?;
        let extracted = extract(
            selection.table,
            &selection.role_map,
            &profile.brand,
            profile.default_region.as_deref(),
        );

        let quotes: Vec<Quote> = match &profile.row_filter {
            Some(filter) => extracted.into_iter().filter(|quote| filter.keeps(quote)).collect(),
            None => extracted,
        };

        if quotes.is_empty() {
            return Err(ExtractionError::EmptyExtraction {
                rows: selection.table.row_count(),
            });
        }

        info!(
            "{}: extracted {} quote(s) from table #{}",
            profile.brand,
            quotes.len(),
            selection.index
        );
        Ok(quotes)
    }

    /// Fetch through `provider` and extract, folding any failure into the
    /// brand's diagnostic.
    pub fn run(&self, provider: &dyn TableProvider) -> BrandResult {
        let outcome = provider
            .tables_for(self.brand())
            .and_then(|tables| self.extract(&tables));

        match outcome {
            Ok(quotes) => BrandResult::success(self.brand(), quotes),
            Err(e) => {
                warn!(
                    "❌ {}: extraction failed ({}recoverable): {}",
                    self.brand(),
                    if e.is_recoverable() { "" } else { "not " },
                    e
                );
                BrandResult::failure(self.brand(), e)
            }
        }
    }
}
