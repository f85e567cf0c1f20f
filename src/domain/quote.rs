//! Quotes, per-brand results and the aggregate report

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One normalized price line for a brand.
///
/// Prices are whole VND. A retained quote always has a non-empty item name and
/// at least one of `buy_price` / `sell_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub brand: String,
    pub item_name: String,
    pub buy_price: Option<i64>,
    pub sell_price: Option<i64>,
    pub region: Option<String>,
}

impl Quote {
    pub fn new(brand: impl Into<String>, item_name: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            item_name: item_name.into(),
            buy_price: None,
            sell_price: None,
            region: None,
        }
    }

    #[must_use]
    pub const fn with_prices(mut self, buy_price: Option<i64>, sell_price: Option<i64>) -> Self {
        self.buy_price = buy_price;
        self.sell_price = sell_price;
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub const fn has_price(&self) -> bool {
        self.buy_price.is_some() || self.sell_price.is_some()
    }
}

/// Extraction outcome for one brand. `error` is set exactly when extraction
/// failed, in which case `quotes` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandResult {
    pub brand: String,
    pub quotes: Vec<Quote>,
    pub error: Option<String>,
}

impl BrandResult {
    pub fn success(brand: impl Into<String>, quotes: Vec<Quote>) -> Self {
        Self {
            brand: brand.into(),
            quotes,
            error: None,
        }
    }

    pub fn failure(brand: impl Into<String>, error: impl ToString) -> Self {
        Self {
            brand: brand.into(),
            quotes: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-run mapping of brand to result, in adapter order. Never persisted.
///
/// Serializes as a JSON object keyed by brand; keys are written in adapter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    results: Vec<BrandResult>,
}

impl Serialize for AggregateReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.results.iter().map(|result| (&result.brand, result)))
    }
}

impl AggregateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result, replacing any earlier result for the same brand.
    pub fn insert(&mut self, result: BrandResult) {
        match self.results.iter_mut().find(|existing| existing.brand == result.brand) {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
    }

    pub fn get(&self, brand: &str) -> Option<&BrandResult> {
        self.results.iter().find(|result| result.brand == brand)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrandResult> + '_ {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// `(brand, error)` for every failed brand
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.results
            .iter()
            .filter_map(|result| result.error.as_deref().map(|error| (result.brand.as_str(), error)))
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|result| result.is_success()).count()
    }
}

/// The single line per brand used for trend reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineEntry {
    pub brand: String,
    pub item_name: String,
    pub sell_price: i64,
}

impl HeadlineEntry {
    /// `None` when the quote carries no sell price.
    pub fn from_quote(quote: &Quote) -> Option<Self> {
        quote.sell_price.map(|sell_price| Self {
            brand: quote.brand.clone(),
            item_name: quote.item_name.clone(),
            sell_price,
        })
    }
}
