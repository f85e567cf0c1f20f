//! Representative ("headline") quote per brand

use tracing::debug;

use crate::domain::{HeadlineEntry, Quote};
use crate::infrastructure::parsing::HeadlinePreference;

/// Pick the headline quote among `quotes`.
///
/// Only quotes with a sell price are eligible. Preferences are tried left to
/// right and the first one with any match wins, taking its first match in
/// original order. With no preference matching, the first eligible quote wins.
pub fn select_headline_quote<'a>(priorities: &[HeadlinePreference], quotes: &'a [Quote]) -> Option<&'a Quote> {
    let mut eligible = quotes.iter().filter(|quote| quote.sell_price.is_some());

    let preferred = priorities
        .iter()
        .find_map(|preference| eligible.clone().find(|quote| preference.matches(quote)));

    preferred.or_else(|| eligible.next())
}

pub fn select_headline(brand: &str, priorities: &[HeadlinePreference], quotes: &[Quote]) -> Option<HeadlineEntry> {
    let headline = select_headline_quote(priorities, quotes).and_then(HeadlineEntry::from_quote);
    match &headline {
        Some(entry) => debug!("{}: headline '{}' at {}", brand, entry.item_name, entry.sell_price),
        None => debug!("{}: no quote with a sell price, no headline", brand),
    }
    headline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::profiles;
    use rstest::rstest;

    fn quote(brand: &str, name: &str, sell: Option<i64>) -> Quote {
        Quote::new(brand, name).with_prices(None, sell)
    }

    #[rstest]
    #[case::pnj_ring_first(
        profiles::pnj(),
        vec![("PNJ", "Vàng miếng SJC", 100), ("PNJ", "Nhẫn Trơn PNJ 999.9", 200), ("PNJ", "PNJ 24K", 300)],
        "Nhẫn Trơn PNJ 999.9"
    )]
    #[case::pnj_second_preference(
        profiles::pnj(),
        vec![("PNJ", "Vàng miếng SJC", 100), ("PNJ", "Vàng 24K PNJ", 300)],
        "Vàng 24K PNJ"
    )]
    #[case::doji_hanoi(
        profiles::doji(),
        vec![("DOJI", "DOJI HCM lẻ", 100), ("DOJI", "DOJI HN lẻ", 200)],
        "DOJI HN lẻ"
    )]
    #[case::sjc_one_tael(
        profiles::sjc(),
        vec![("SJC", "Vàng nhẫn SJC 99,99 1 chỉ", 100), ("SJC", "SJC 1L, 10L, 1KG", 200)],
        "SJC 1L, 10L, 1KG"
    )]
    #[case::fallback_first(
        profiles::sjc(),
        vec![("SJC", "Nữ trang 99,99%", 100), ("SJC", "Nữ trang 75%", 200)],
        "Nữ trang 99,99%"
    )]
    fn test_priority_order(
        #[case] profile: profiles::SourceProfile,
        #[case] rows: Vec<(&str, &str, i64)>,
        #[case] expected: &str,
    ) {
        let quotes: Vec<Quote> = rows
            .into_iter()
            .map(|(brand, name, sell)| quote(brand, name, Some(sell)))
            .collect();

        let headline = select_headline(&profile.brand, &profile.headline_priorities, &quotes).unwrap();
        assert_eq!(headline.item_name, expected);
    }

    #[test]
    fn test_quotes_without_sell_price_are_skipped() {
        let profile = profiles::sjc();
        let quotes = vec![
            quote("SJC", "SJC 1L, 10L, 1KG", None),
            quote("SJC", "SJC 5 chỉ", Some(154_820_000)),
        ];

        let headline = select_headline("SJC", &profile.headline_priorities, &quotes).unwrap();
        assert_eq!(headline.item_name, "SJC 5 chỉ");
        assert_eq!(headline.sell_price, 154_820_000);
    }

    #[test]
    fn test_no_headline_without_sell_prices() {
        assert!(select_headline("SJC", &[], &[]).is_none());
        assert!(select_headline("SJC", &[], &[quote("SJC", "SJC 1L", None)]).is_none());
    }
}
