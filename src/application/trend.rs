//! Cross-run identity linkage and trend calculation
//!
//! The previous headline is looked up among the current quotes by exact item
//! name, then by case-insensitive containment of the previous name in a
//! current name. Without either link the headline is reselected from scratch
//! and no comparison is reported.

use tracing::{debug, info};

use super::headline_selector::select_headline;
use crate::domain::{BrandTrend, Direction, HeadlineEntry, LinkKind, NoComparisonReason, Quote, Trend};
use crate::infrastructure::parsing::HeadlinePreference;

/// Signed delta of `current` against `previous`.
pub fn compute_trend(previous: i64, current: i64, link: LinkKind) -> Trend {
    if previous == 0 {
        return Trend::no_comparison(NoComparisonReason::ZeroBaseline);
    }
    if previous < 0 {
        return Trend::no_comparison(NoComparisonReason::InvalidBaseline);
    }

    let Some(diff) = current.checked_sub(previous) else {
        return Trend::no_comparison(NoComparisonReason::InvalidBaseline);
    };
    #[allow(clippy::cast_precision_loss)]
    let percent = diff as f64 / previous as f64 * 100.0;

    Trend::Compared {
        link,
        previous,
        current,
        diff,
        direction: Direction::from_diff(diff),
        percent,
    }
}

/// First eligible quote continuing the previous headline's identity.
fn find_linked<'a>(prior: &HeadlineEntry, quotes: &'a [Quote]) -> Option<(&'a Quote, LinkKind)> {
    let mut eligible = quotes.iter().filter(|quote| quote.sell_price.is_some());

    if let Some(exact) = eligible.clone().find(|quote| quote.item_name == prior.item_name) {
        return Some((exact, LinkKind::ExactName));
    }

    let needle = prior.item_name.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    eligible
        .find(|quote| quote.item_name.to_lowercase().contains(&needle))
        .map(|quote| (quote, LinkKind::Substring))
}

/// Link this run's quotes of `brand` to its previous headline.
pub fn link_headline(
    brand: &str,
    priorities: &[HeadlinePreference],
    prior: Option<&HeadlineEntry>,
    quotes: &[Quote],
) -> BrandTrend {
    let Some(prior) = prior else {
        let headline = select_headline(brand, priorities, quotes);
        let reason = if headline.is_some() {
            NoComparisonReason::NoPriorEntry
        } else {
            NoComparisonReason::NoCurrentHeadline
        };
        return BrandTrend::new(brand, headline, None, Trend::no_comparison(reason));
    };

    if let Some((quote, link)) = find_linked(prior, quotes) {
        if let Some(headline) = HeadlineEntry::from_quote(quote) {
            let trend = compute_trend(prior.sell_price, headline.sell_price, link);
            info!("{}: '{}' linked by {:?}: {}", brand, headline.item_name, link, trend);
            return BrandTrend::new(brand, Some(headline), Some(prior.clone()), trend);
        }
    }

    debug!("{}: previous headline '{}' not found, reselecting", brand, prior.item_name);
    let headline = select_headline(brand, priorities, quotes);
    let reason = if headline.is_some() {
        NoComparisonReason::BrokenIdentityLink
    } else {
        NoComparisonReason::NoCurrentHeadline
    };
    info!("{}: identity link broken, no comparison data", brand);
    BrandTrend::new(brand, headline, None, Trend::no_comparison(reason))
}
