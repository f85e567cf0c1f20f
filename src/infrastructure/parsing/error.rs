//! Error module re-export
//!
//! Extraction errors live in the domain; re-exported here for the parsing modules.

pub use crate::domain::{ExtractionError, ExtractionResult};
