//! Canonical column roles and the per-table role map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic meaning of a price-table column, independent of its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Region,
    ItemName,
    BuyPrice,
    SellPrice,
}

impl ColumnRole {
    pub const ALL: [Self; 4] = [Self::Region, Self::ItemName, Self::BuyPrice, Self::SellPrice];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::ItemName => "item_name",
            Self::BuyPrice => "buy_price",
            Self::SellPrice => "sell_price",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role → exact header text for one table. A role is bound at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoleMap {
    columns: BTreeMap<ColumnRole, String>,
}

impl ColumnRoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `role` to `header`. Returns `false` and leaves the map untouched
    /// when the role is already bound.
    pub fn bind(&mut self, role: ColumnRole, header: impl Into<String>) -> bool {
        if self.columns.contains_key(&role) {
            return false;
        }
        self.columns.insert(role, header.into());
        true
    }

    pub fn header_for(&self, role: ColumnRole) -> Option<&str> {
        self.columns.get(&role).map(String::as_str)
    }

    pub fn contains(&self, role: ColumnRole) -> bool {
        self.columns.contains_key(&role)
    }

    /// True when every role in `required` is bound
    pub fn covers(&self, required: &[ColumnRole]) -> bool {
        required.iter().all(|role| self.contains(*role))
    }

    pub fn missing(&self, required: &[ColumnRole]) -> Vec<ColumnRole> {
        required
            .iter()
            .copied()
            .filter(|role| !self.contains(*role))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnRole, &str)> + '_ {
        self.columns.iter().map(|(role, header)| (*role, header.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_keeps_first_header() {
        let mut map = ColumnRoleMap::new();
        assert!(map.bind(ColumnRole::BuyPrice, "Giá mua"));
        assert!(!map.bind(ColumnRole::BuyPrice, "Mua vào"));
        assert_eq!(map.header_for(ColumnRole::BuyPrice), Some("Giá mua"));
    }

    #[test]
    fn test_covers_and_missing() {
        let mut map = ColumnRoleMap::new();
        map.bind(ColumnRole::ItemName, "Loại vàng");
        map.bind(ColumnRole::SellPrice, "Bán");

        let required = [ColumnRole::ItemName, ColumnRole::BuyPrice, ColumnRole::SellPrice];
        assert!(!map.covers(&required));
        assert_eq!(map.missing(&required), vec![ColumnRole::BuyPrice]);
        assert!(map.covers(&[ColumnRole::ItemName]));
    }
}
