//! Domain module - price tables, quotes, headlines and trends
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod column_role;
pub mod extraction_error;
pub mod quote;
pub mod raw_table;
pub mod repositories;
pub mod snapshot;
pub mod trend;

pub use column_role::{ColumnRole, ColumnRoleMap};
pub use extraction_error::{ExtractionError, ExtractionResult};
pub use quote::{AggregateReport, BrandResult, HeadlineEntry, Quote};
pub use raw_table::{RawRow, RawTable};
pub use repositories::{SnapshotStore, TableProvider};
pub use snapshot::HistorySnapshot;
pub use trend::{BrandTrend, Direction, LinkKind, NoComparisonReason, Trend};
