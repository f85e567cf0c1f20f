//! Cross-run identity linkage through the snapshot file

use chrono::{Duration, Utc};
use gold_price_feed_lib::application::{AggregationEngine, link_headline, load_prior, persist, run_once};
use gold_price_feed_lib::domain::{
    Direction, HeadlineEntry, HistorySnapshot, LinkKind, NoComparisonReason, Quote, RawTable, SnapshotStore, Trend,
};
use gold_price_feed_lib::infrastructure::parsing::profiles;
use gold_price_feed_lib::infrastructure::{JsonFileSnapshotStore, PrefetchedTables};
use tempfile::TempDir;

fn sjc_prior() -> HeadlineEntry {
    HeadlineEntry {
        brand: "SJC".into(),
        item_name: "SJC 1L/10L/1KG".into(),
        sell_price: 154_800_000,
    }
}

fn sjc_tables(rows: &[(&str, &str, &str)]) -> Vec<RawTable> {
    let table = rows.iter().fold(RawTable::new(["Loại vàng", "Mua vào", "Bán ra"]), |table, (name, buy, sell)| {
        table.with_row([*name, *buy, *sell])
    });
    vec![table]
}

#[test]
fn renamed_line_links_by_containment() {
    let quotes = vec![
        Quote::new("SJC", "Vàng nhẫn SJC 99,99").with_prices(Some(148_500_000), Some(151_000_000)),
        Quote::new("SJC", "SJC 1L/10L/1KG - Bán lẻ").with_prices(Some(153_000_000), Some(155_300_000)),
    ];
    let prior = sjc_prior();

    let result = link_headline("SJC", &profiles::sjc().headline_priorities, Some(&prior), &quotes);

    assert_eq!(result.headline.as_ref().unwrap().item_name, "SJC 1L/10L/1KG - Bán lẻ");
    assert_eq!(result.previous, Some(prior));
    match result.trend {
        Trend::Compared {
            link, diff, direction, ..
        } => {
            assert_eq!(link, LinkKind::Substring);
            assert_eq!(diff, 155_300_000 - 154_800_000);
            assert_eq!(direction, Direction::Increase);
        }
        Trend::NoComparisonData { .. } => panic!("expected a comparison"),
    }
}

#[test]
fn unlinkable_line_reselects_without_comparison() {
    let quotes = vec![
        Quote::new("SJC", "Vàng miếng 1 lượng").with_prices(Some(153_000_000), Some(155_300_000)),
        Quote::new("SJC", "Vàng 1L SJC").with_prices(Some(153_000_000), Some(155_500_000)),
    ];

    let result = link_headline("SJC", &profiles::sjc().headline_priorities, Some(&sjc_prior()), &quotes);

    assert_eq!(result.trend, Trend::no_comparison(NoComparisonReason::BrokenIdentityLink));
    assert_eq!(result.description, "no comparison data");
    assert!(result.previous.is_none());
    assert_eq!(result.headline.unwrap().item_name, "Vàng 1L SJC");
}

#[test]
fn snapshot_file_carries_headlines_between_runs() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileSnapshotStore::new(dir.path().join("gold_history.json"));
    let engine = AggregationEngine::from_profiles([profiles::sjc(), profiles::doji()]);
    let start = Utc::now();

    // Run 1: SJC only, DOJI unreachable.
    let first_tables = PrefetchedTables::new()
        .with_tables(profiles::SJC, sjc_tables(&[("SJC 1L, 10L, 1KG", "152.300", "154.800")]))
        .with_failure(profiles::DOJI, "503");
    let first = run_once(&engine, &first_tables, load_prior(&store).as_ref(), start);
    assert!(persist(&store, &first));

    let saved = store.load().unwrap().unwrap();
    assert_eq!(saved.headline_entries.len(), 1);
    assert_eq!(saved.entry("SJC").unwrap().sell_price, 154_800_000);

    // Run 2: price drops.
    let second_tables =
        PrefetchedTables::new().with_tables(profiles::SJC, sjc_tables(&[("SJC 1L, 10L, 1KG", "151.800", "154.300")]));
    let prior = load_prior(&store);
    let second = run_once(&engine, &second_tables, prior.as_ref(), start + Duration::hours(1));

    let sjc = second.trend("SJC").unwrap();
    assert_eq!(sjc.trend.direction(), Some(Direction::Decrease));
    assert!(matches!(sjc.trend, Trend::Compared { link: LinkKind::ExactName, diff: -500_000, .. }));
    assert_eq!(
        second.trend("DOJI").unwrap().trend,
        Trend::no_comparison(NoComparisonReason::NoCurrentHeadline)
    );

    assert!(persist(&store, &second));
    let replaced: HistorySnapshot = store.load().unwrap().unwrap();
    assert_eq!(replaced.timestamp, start + Duration::hours(1));
    assert_eq!(replaced.entry("SJC").unwrap().sell_price, 154_300_000);
}

#[test]
fn run_without_headlines_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileSnapshotStore::new(dir.path().join("gold_history.json"));
    let before = HistorySnapshot::new(Utc::now(), [sjc_prior()]);
    store.save(&before).unwrap();

    let engine = AggregationEngine::from_profiles([profiles::sjc()]);
    let outcome = run_once(&engine, &PrefetchedTables::new(), load_prior(&store).as_ref(), Utc::now());

    assert!(!persist(&store, &outcome));
    assert_eq!(store.load().unwrap(), Some(before));
}
