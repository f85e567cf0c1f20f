//! Collaborator seams used by the extraction core
//!
//! The core never reaches into the network or the file system itself: candidate
//! tables arrive through a `TableProvider`, the previous headlines through a
//! `SnapshotStore`.

use anyhow::Result;

use super::extraction_error::ExtractionResult;
use super::raw_table::RawTable;
use super::snapshot::HistorySnapshot;

/// Supplies the candidate tables of one source's current document.
///
/// A fetch failure and an empty document are both reported through the
/// returned result; the source adapter turns either into a brand diagnostic.
pub trait TableProvider {
    fn tables_for(&self, brand: &str) -> ExtractionResult<Vec<RawTable>>;
}

/// Persistence for the previous run's headline entries.
pub trait SnapshotStore {
    /// `Ok(None)` when no snapshot has been written yet.
    fn load(&self) -> Result<Option<HistorySnapshot>>;

    /// Full overwrite of any existing snapshot
    fn save(&self, snapshot: &HistorySnapshot) -> Result<()>;
}
