//! First-qualifying-table selection
//!
//! Candidates are scanned in discovery order and the first one whose headers
//! cover every required role wins. Qualifying tables are not ranked, so a
//! document that reorders its tables can change the pick.

use tracing::debug;

use super::column_classifier::{ClassifierRule, classify};
use crate::domain::{ColumnRole, ColumnRoleMap, RawTable};
use crate::domain::{ExtractionError, ExtractionResult};

#[derive(Debug, Clone)]
pub struct TableSelection<'a> {
    pub table: &'a RawTable,
    pub role_map: ColumnRoleMap,
    /// Position among the scanned candidates
    pub index: usize,
}

pub fn select<'a, I>(
    candidates: I,
    rules: &[ClassifierRule],
    required: &[ColumnRole],
) -> ExtractionResult<TableSelection<'a>>
where
    I: IntoIterator<Item = &'a RawTable>,
{
    let mut scanned = 0;

    for (index, table) in candidates.into_iter().enumerate() {
        scanned += 1;
        let role_map = classify(rules, table.headers());

        if role_map.covers(required) {
            debug!(
                "Selected table #{} ({} rows) with headers {:?}",
                index,
                table.row_count(),
                table.headers()
            );
            return Ok(TableSelection {
                table,
                role_map,
                index,
            });
        }

        debug!(
            "Table #{} rejected, missing {:?} (headers: {:?})",
            index,
            role_map.missing(required),
            table.headers()
        );
    }

    Err(ExtractionError::no_matching_table(scanned, required))
}
