//! Header text → canonical column role
//!
//! Each source owns an ordered rule table. Classification is deliberately
//! permissive; the table selector's "all required roles present" gate is what
//! keeps unrelated tables out.

use tracing::{debug, trace};

use crate::domain::{ColumnRole, ColumnRoleMap};

/// Substring test against a lower-cased header label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordPredicate {
    /// Every keyword must occur
    AllOf(Vec<String>),
    /// At least one keyword must occur
    AnyOf(Vec<String>),
    /// At least one nested predicate must hold
    Either(Vec<KeywordPredicate>),
}

impl KeywordPredicate {
    pub fn all_of(keywords: &[&str]) -> Self {
        Self::AllOf(lowered(keywords))
    }

    pub fn any_of(keywords: &[&str]) -> Self {
        Self::AnyOf(lowered(keywords))
    }

    pub const fn either(alternatives: Vec<Self>) -> Self {
        Self::Either(alternatives)
    }

    /// `text` must already be lower-cased.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::AllOf(keywords) => keywords.iter().all(|k| text.contains(k.as_str())),
            Self::AnyOf(keywords) => keywords.iter().any(|k| text.contains(k.as_str())),
            Self::Either(alternatives) => alternatives.iter().any(|p| p.matches(text)),
        }
    }
}

fn lowered(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRule {
    pub predicate: KeywordPredicate,
    pub role: ColumnRole,
}

impl ClassifierRule {
    pub const fn new(predicate: KeywordPredicate, role: ColumnRole) -> Self {
        Self { predicate, role }
    }
}

/// Map header labels (in declared column order) to roles.
///
/// A label takes the role of the first rule it matches. If that role is
/// already bound to an earlier column, the label is ignored.
pub fn classify<S: AsRef<str>>(rules: &[ClassifierRule], labels: &[S]) -> ColumnRoleMap {
    let mut role_map = ColumnRoleMap::new();

    for label in labels {
        let label = label.as_ref();
        let lower = label.to_lowercase();

        let Some(rule) = rules.iter().find(|rule| rule.predicate.matches(&lower)) else {
            trace!("Header '{}' matched no rule", label);
            continue;
        };

        if !role_map.bind(rule.role, label) {
            debug!(
                "Header '{}' ignored: {} already bound to '{}'",
                label,
                rule.role,
                role_map.header_for(rule.role).unwrap_or_default()
            );
        }
    }

    role_map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::profiles;
    use rstest::rstest;

    fn pnj_rules() -> Vec<ClassifierRule> {
        profiles::pnj().rules
    }

    #[rstest]
    #[case("Khu vực", Some(ColumnRole::Region))]
    #[case("KHU VỰC", Some(ColumnRole::Region))]
    #[case("Loại vàng", Some(ColumnRole::ItemName))]
    #[case("Sản phẩm", Some(ColumnRole::ItemName))]
    #[case("Giá mua", Some(ColumnRole::BuyPrice))]
    #[case("Giá bán", Some(ColumnRole::SellPrice))]
    #[case("Loại", None)]
    #[case("Cập nhật", None)]
    fn test_pnj_single_header(#[case] label: &str, #[case] expected: Option<ColumnRole>) {
        let role_map = classify(&pnj_rules(), &[label]);
        let bound = role_map.iter().next().map(|(role, _)| role);
        assert_eq!(bound, expected);
    }

    #[test]
    fn test_full_pnj_header_row() {
        let role_map = classify(&pnj_rules(), &["Khu vực", "Loại vàng", "Giá mua", "Giá bán"]);

        assert_eq!(role_map.len(), 4);
        assert_eq!(role_map.header_for(ColumnRole::Region), Some("Khu vực"));
        assert_eq!(role_map.header_for(ColumnRole::ItemName), Some("Loại vàng"));
        assert_eq!(role_map.header_for(ColumnRole::BuyPrice), Some("Giá mua"));
        assert_eq!(role_map.header_for(ColumnRole::SellPrice), Some("Giá bán"));
    }

    #[test]
    fn test_earlier_column_wins_role() {
        let rules = profiles::sjc().rules;
        let role_map = classify(&rules, &["Loại vàng", "Mua vào", "Bán ra", "Mua (USD)"]);

        assert_eq!(role_map.header_for(ColumnRole::BuyPrice), Some("Mua vào"));
        assert_eq!(role_map.len(), 3);
    }

    #[test]
    fn test_first_matching_rule_decides_label() {
        // "mua" also appears in the item header; the item rule comes first.
        let rules = profiles::doji().rules;
        let role_map = classify(&rules, &["Giá vàng trong nước (mua/bán)", "Mua", "Bán"]);

        assert_eq!(
            role_map.header_for(ColumnRole::ItemName),
            Some("Giá vàng trong nước (mua/bán)")
        );
        assert_eq!(role_map.header_for(ColumnRole::BuyPrice), Some("Mua"));
        assert_eq!(role_map.header_for(ColumnRole::SellPrice), Some("Bán"));
    }

    #[test]
    fn test_no_role_bound_twice() {
        let labels = ["Mua", "Giá mua", "Bán", "Giá bán", "Loại", "Loại vàng"];
        let role_map = classify(&profiles::sjc().rules, &labels);

        let headers: std::collections::HashSet<&str> =
            role_map.iter().map(|(_, header)| header).collect();
        assert_eq!(headers.len(), role_map.len());
        assert_eq!(role_map.header_for(ColumnRole::BuyPrice), Some("Mua"));
        assert_eq!(role_map.header_for(ColumnRole::ItemName), Some("Loại"));
    }
}
