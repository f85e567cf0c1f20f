//! Previous-run headline snapshot
//!
//! Read once at the start of a run and replaced wholesale at the end of a
//! successful one. Never merged with an older snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::quote::HeadlineEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub timestamp: DateTime<Utc>,
    pub headline_entries: BTreeMap<String, HeadlineEntry>,
}

impl HistorySnapshot {
    pub fn new<I>(timestamp: DateTime<Utc>, entries: I) -> Self
    where
        I: IntoIterator<Item = HeadlineEntry>,
    {
        Self {
            timestamp,
            headline_entries: entries
                .into_iter()
                .map(|entry| (entry.brand.clone(), entry))
                .collect(),
        }
    }

    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            headline_entries: BTreeMap::new(),
        }
    }

    pub fn entry(&self, brand: &str) -> Option<&HeadlineEntry> {
        self.headline_entries.get(brand)
    }

    pub fn is_empty(&self) -> bool {
        self.headline_entries.is_empty()
    }
}
