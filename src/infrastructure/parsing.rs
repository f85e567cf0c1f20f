//! Schema-resilient extraction of gold price tables
//!
//! Leaves first: price normalization, header classification, table selection,
//! record extraction, then the per-source adapter that strings them together.

pub mod column_classifier;
pub mod error;
pub mod price_normalizer;
pub mod profiles;
pub mod record_extractor;
pub mod source_adapter;
pub mod table_selector;

// Re-export public types
pub use column_classifier::{ClassifierRule, KeywordPredicate, classify};
pub use error::{ExtractionError, ExtractionResult};
pub use price_normalizer::normalize;
pub use profiles::{HeadlinePreference, RowFilter, SourceProfile, TablePrefilter, builtin_profiles};
pub use record_extractor::extract;
pub use source_adapter::SourceAdapter;
pub use table_selector::{TableSelection, select};
