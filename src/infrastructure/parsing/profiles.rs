//! Per-source extraction profiles
//!
//! A profile carries everything that differs between sources: header rules,
//! required roles, optional table prefilter and row filter, default region and
//! headline priorities. One [`SourceAdapter`](super::SourceAdapter) type runs
//! any of them.

use super::column_classifier::{ClassifierRule, KeywordPredicate};
use crate::domain::{ColumnRole, Quote, RawTable};

pub const PNJ: &str = "PNJ";
pub const DOJI: &str = "DOJI";
pub const SJC: &str = "SJC";

/// Cheap lexical check applied to every candidate before table selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablePrefilter {
    /// The space-joined, lower-cased header labels must satisfy every predicate
    JoinedHeaders(Vec<KeywordPredicate>),
}

impl TablePrefilter {
    pub fn accepts(&self, table: &RawTable) -> bool {
        match self {
            Self::JoinedHeaders(predicates) => {
                let joined = table.headers().join(" ").to_lowercase();
                predicates.iter().all(|predicate| predicate.matches(&joined))
            }
        }
    }
}

/// Post-extraction row filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// Keep quotes whose item name contains the marker (case-insensitive)
    ItemNameContains(String),
}

impl RowFilter {
    pub fn item_name_contains(marker: &str) -> Self {
        Self::ItemNameContains(marker.to_lowercase())
    }

    pub fn keeps(&self, quote: &Quote) -> bool {
        match self {
            Self::ItemNameContains(marker) => quote.item_name.to_lowercase().contains(marker.as_str()),
        }
    }
}

/// One step of the headline priority list: the item name must contain every
/// keyword (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlinePreference {
    keywords: Vec<String>,
}

impl HeadlinePreference {
    pub fn name_contains(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        let name = quote.item_name.to_lowercase();
        self.keywords.iter().all(|k| name.contains(k.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct SourceProfile {
    pub brand: String,
    pub rules: Vec<ClassifierRule>,
    pub required_roles: Vec<ColumnRole>,
    pub table_prefilter: Option<TablePrefilter>,
    pub row_filter: Option<RowFilter>,
    pub default_region: Option<String>,
    pub headline_priorities: Vec<HeadlinePreference>,
}

impl SourceProfile {
    pub fn new(brand: impl Into<String>, rules: Vec<ClassifierRule>, required_roles: &[ColumnRole]) -> Self {
        Self {
            brand: brand.into(),
            rules,
            required_roles: required_roles.to_vec(),
            table_prefilter: None,
            row_filter: None,
            default_region: None,
            headline_priorities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_table_prefilter(mut self, prefilter: TablePrefilter) -> Self {
        self.table_prefilter = Some(prefilter);
        self
    }

    #[must_use]
    pub fn with_row_filter(mut self, filter: RowFilter) -> Self {
        self.row_filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_headline_priorities(mut self, priorities: Vec<HeadlinePreference>) -> Self {
        self.headline_priorities = priorities;
        self
    }
}

const PRICE_ROLES: [ColumnRole; 3] = [ColumnRole::ItemName, ColumnRole::BuyPrice, ColumnRole::SellPrice];

fn price_rules() -> [ClassifierRule; 2] {
    [
        ClassifierRule::new(KeywordPredicate::any_of(&["mua"]), ColumnRole::BuyPrice),
        ClassifierRule::new(KeywordPredicate::any_of(&["bán"]), ColumnRole::SellPrice),
    ]
}

/// PNJ serves one table with a region column; every row is kept.
pub fn pnj() -> SourceProfile {
    let mut rules = vec![
        ClassifierRule::new(KeywordPredicate::all_of(&["khu", "vực"]), ColumnRole::Region),
        ClassifierRule::new(
            KeywordPredicate::either(vec![
                KeywordPredicate::all_of(&["loại", "vàng"]),
                KeywordPredicate::any_of(&["sản phẩm"]),
            ]),
            ColumnRole::ItemName,
        ),
    ];
    rules.extend(price_rules());

    SourceProfile::new(PNJ, rules, &ColumnRole::ALL).with_headline_priorities(vec![
        HeadlinePreference::name_contains(&["nhẫn", "pnj"]),
        HeadlinePreference::name_contains(&["pnj"]),
    ])
}

/// DOJI's page mixes its own lines with other brands' lines in one table.
pub fn doji() -> SourceProfile {
    let mut rules = vec![ClassifierRule::new(
        KeywordPredicate::any_of(&["loại", "giá vàng trong nước"]),
        ColumnRole::ItemName,
    )];
    rules.extend(price_rules());

    SourceProfile::new(DOJI, rules, &PRICE_ROLES)
        .with_row_filter(RowFilter::item_name_contains(DOJI))
        .with_default_region("Trong nước")
        .with_headline_priorities(vec![
            HeadlinePreference::name_contains(&["hn"]),
            HeadlinePreference::name_contains(&["doji"]),
        ])
}

/// SJC's page carries ad and currency tables next to the price table.
pub fn sjc() -> SourceProfile {
    let mut rules = vec![ClassifierRule::new(
        KeywordPredicate::any_of(&["loại"]),
        ColumnRole::ItemName,
    )];
    rules.extend(price_rules());

    SourceProfile::new(SJC, rules, &PRICE_ROLES)
        .with_table_prefilter(TablePrefilter::JoinedHeaders(vec![
            KeywordPredicate::any_of(&["loại vàng", "loại"]),
            KeywordPredicate::all_of(&["mua", "bán"]),
        ]))
        .with_headline_priorities(vec![
            HeadlinePreference::name_contains(&["1l"]),
            HeadlinePreference::name_contains(&["sjc"]),
        ])
}

pub fn builtin_profiles() -> Vec<SourceProfile> {
    vec![pnj(), doji(), sjc()]
}

/// Case-insensitive lookup among the built-in profiles
pub fn builtin_profile(brand: &str) -> Option<SourceProfile> {
    builtin_profiles()
        .into_iter()
        .find(|profile| profile.brand.eq_ignore_ascii_case(brand))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sjc_prefilter_needs_item_and_both_prices() {
        let prefilter = sjc().table_prefilter.unwrap();

        assert!(prefilter.accepts(&RawTable::new(["Loại vàng", "Mua vào", "Bán ra"])));
        assert!(!prefilter.accepts(&RawTable::new(["Loại vàng", "Mua vào"])));
        assert!(!prefilter.accepts(&RawTable::new(["Ngoại tệ", "Mua", "Bán"])));
    }

    #[test]
    fn test_doji_row_filter_is_case_insensitive() {
        let filter = doji().row_filter.unwrap();

        assert!(filter.keeps(&Quote::new(DOJI, "DOJI HN lẻ")));
        assert!(filter.keeps(&Quote::new(DOJI, "Nhẫn doji 9999")));
        assert!(!filter.keeps(&Quote::new(DOJI, "SJC - Bán Lẻ")));
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin_profile("sjc").unwrap().brand, SJC);
        assert_eq!(builtin_profile("PNJ").unwrap().required_roles.len(), 4);
        assert!(builtin_profile("BTMC").is_none());
    }
}
