//! Application layer
//!
//! Orchestrates the extraction adapters, headline selection and cross-run
//! trend linkage into one feed run.

pub mod aggregation;
pub mod headline_selector;
pub mod run;
pub mod trend;

pub use aggregation::AggregationEngine;
pub use headline_selector::{select_headline, select_headline_quote};
pub use run::{RunOutcome, execute, load_prior, persist, run_once};
pub use trend::{compute_trend, link_headline};
