//! Trend value objects produced by identity linkage

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::quote::HeadlineEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
    Unchanged,
}

impl Direction {
    pub fn from_diff(diff: i64) -> Self {
        match diff.cmp(&0) {
            Ordering::Greater => Self::Increase,
            Ordering::Less => Self::Decrease,
            Ordering::Equal => Self::Unchanged,
        }
    }
}

/// How the previous headline was found among the current quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    ExactName,
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoComparisonReason {
    /// First observation of this brand
    NoPriorEntry,
    /// Previous item name has no exact or substring match in this run
    BrokenIdentityLink,
    /// Previous sell price was zero, percentage undefined
    ZeroBaseline,
    /// Previous sell price negative, or the difference overflows
    InvalidBaseline,
    /// No quote with a sell price this run
    NoCurrentHeadline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Trend {
    Compared {
        link: LinkKind,
        previous: i64,
        current: i64,
        diff: i64,
        direction: Direction,
        percent: f64,
    },
    NoComparisonData {
        reason: NoComparisonReason,
    },
}

impl Trend {
    pub const fn no_comparison(reason: NoComparisonReason) -> Self {
        Self::NoComparisonData { reason }
    }

    pub const fn is_compared(&self) -> bool {
        matches!(self, Self::Compared { .. })
    }

    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Self::Compared { direction, .. } => Some(*direction),
            Self::NoComparisonData { .. } => None,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compared {
                diff,
                direction,
                percent,
                ..
            } => {
                let label = match direction {
                    Direction::Increase => "increase",
                    Direction::Decrease => "decrease",
                    Direction::Unchanged => "unchanged",
                };
                write!(f, "{label} {diff:+} ({percent:+.2}%)")
            }
            Self::NoComparisonData { .. } => f.write_str("no comparison data"),
        }
    }
}

/// Headline and trend for one brand in one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandTrend {
    pub brand: String,
    pub headline: Option<HeadlineEntry>,
    pub previous: Option<HeadlineEntry>,
    pub trend: Trend,
    pub description: String,
}

impl BrandTrend {
    pub fn new(
        brand: impl Into<String>,
        headline: Option<HeadlineEntry>,
        previous: Option<HeadlineEntry>,
        trend: Trend,
    ) -> Self {
        let description = trend.to_string();
        Self {
            brand: brand.into(),
            headline,
            previous,
            trend,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::from_diff(500_000), Direction::Increase);
        assert_eq!(Direction::from_diff(-1), Direction::Decrease);
        assert_eq!(Direction::from_diff(0), Direction::Unchanged);
    }

    #[test]
    fn test_trend_description() {
        let trend = Trend::Compared {
            link: LinkKind::ExactName,
            previous: 100_000_000,
            current: 101_500_000,
            diff: 1_500_000,
            direction: Direction::Increase,
            percent: 1.5,
        };
        assert_eq!(trend.to_string(), "increase +1500000 (+1.50%)");
        assert_eq!(
            Trend::no_comparison(NoComparisonReason::NoPriorEntry).to_string(),
            "no comparison data"
        );
    }
}
