//! Selected table → canonical quotes

use tracing::debug;

use super::price_normalizer::normalize;
use crate::domain::{ColumnRole, ColumnRoleMap, Quote, RawTable};

/// Cell texts that stand for "no value" (pandas renders missing cells as `nan`)
const MISSING_SENTINELS: [&str; 4] = ["nan", "none", "null", "n/a"];

pub fn is_missing(text: &str) -> bool {
    let text = text.trim();
    text.is_empty()
        || MISSING_SENTINELS
            .iter()
            .any(|sentinel| text.eq_ignore_ascii_case(sentinel))
}

/// Build one quote per usable row, preserving row order.
///
/// Rows without an item name, or without any parsable price, are dropped.
/// `default_region` fills in when the table has no region column or the cell
/// is blank.
pub fn extract(
    table: &RawTable,
    role_map: &ColumnRoleMap,
    brand: &str,
    default_region: Option<&str>,
) -> Vec<Quote> {
    let Some(item_header) = role_map.header_for(ColumnRole::ItemName) else {
        debug!("{}: no item column bound, nothing to extract", brand);
        return Vec::new();
    };
    let buy_header = role_map.header_for(ColumnRole::BuyPrice);
    let sell_header = role_map.header_for(ColumnRole::SellPrice);
    let region_header = role_map.header_for(ColumnRole::Region);

    let mut quotes = Vec::with_capacity(table.row_count());

    for (index, row) in table.rows().enumerate() {
        let item_name = row.get(item_header).unwrap_or_default().trim();
        if is_missing(item_name) {
            debug!("{}: row {} dropped, empty item name", brand, index);
            continue;
        }

        let buy_price = buy_header.and_then(|header| normalize(row.get(header)));
        let sell_price = sell_header.and_then(|header| normalize(row.get(header)));
        if buy_price.is_none() && sell_price.is_none() {
            debug!("{}: row {} ('{}') dropped, no price", brand, index, item_name);
            continue;
        }

        let region = region_header
            .and_then(|header| row.get(header))
            .map(str::trim)
            .filter(|cell| !is_missing(cell))
            .or(default_region)
            .map(str::to_string);

        quotes.push(
            Quote::new(brand, item_name)
                .with_prices(buy_price, sell_price)
                .with_region(region),
        );
    }

    quotes
}
