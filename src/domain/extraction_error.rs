//! Extraction error types
//!
//! Every variant is caught at the source adapter boundary and turned into the
//! brand's diagnostic string; none of them aborts an aggregation run.

use thiserror::Error;

use super::column_role::ColumnRole;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("no tables found in document")]
    UnparsableTable,

    #[error("scanned {candidates} table(s) but none carried columns [{}]", join_roles(.required))]
    NoMatchingTable {
        candidates: usize,
        required: Vec<ColumnRole>,
    },

    #[error("table matched but all {rows} row(s) were filtered out")]
    EmptyExtraction { rows: usize },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },
}

fn join_roles(roles: &[ColumnRole]) -> String {
    roles
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ExtractionError {
    pub fn source_unavailable(reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            reason: reason.to_string(),
        }
    }

    pub fn no_matching_table(candidates: usize, required: &[ColumnRole]) -> Self {
        Self::NoMatchingTable {
            candidates,
            required: required.to_vec(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the next scheduled run may succeed without a code change.
    /// Layout-shaped failures need a rule update; fetch failures usually pass.
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::SourceUnavailable { .. } => true,
            Self::UnparsableTable => true,
            Self::NoMatchingTable { .. } => false,
            Self::EmptyExtraction { .. } => false,
            Self::InvalidSelector { .. } => false,
        }
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_table_message_lists_roles() {
        let err = ExtractionError::no_matching_table(
            3,
            &[ColumnRole::ItemName, ColumnRole::BuyPrice, ColumnRole::SellPrice],
        );
        assert_eq!(
            err.to_string(),
            "scanned 3 table(s) but none carried columns [item_name, buy_price, sell_price]"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_source_unavailable_is_recoverable() {
        let err = ExtractionError::source_unavailable("connection reset");
        assert_eq!(err.to_string(), "source unavailable: connection reset");
        assert!(err.is_recoverable());
    }
}
