//! HTML document → candidate tables
//!
//! Every `<table>` in the document becomes one [`RawTable`], in document order.
//! Header row: the first row inside `<thead>`, else the first row of the table.
//! Rows belonging to nested tables are attributed to the nested table only.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::RawTable;
use crate::domain::{ExtractionError, ExtractionResult};

/// Configuration for table discovery
#[derive(Debug, Clone)]
pub struct TableExtractorConfig {
    pub table_selector: String,
    pub row_selector: String,
    /// Tables with fewer body rows are dropped
    pub min_body_rows: usize,
}

impl Default for TableExtractorConfig {
    fn default() -> Self {
        Self {
            table_selector: "table".to_string(),
            row_selector: "tr".to_string(),
            min_body_rows: 1,
        }
    }
}

pub struct HtmlTableExtractor {
    table_selector: Selector,
    row_selector: Selector,
    min_body_rows: usize,
}

impl HtmlTableExtractor {
    /// Create an extractor with the default configuration
    pub fn new() -> ExtractionResult<Self> {
        Self::with_config(&TableExtractorConfig::default())
    }

    pub fn with_config(config: &TableExtractorConfig) -> ExtractionResult<Self> {
        Ok(Self {
            table_selector: compile(&config.table_selector)?,
            row_selector: compile(&config.row_selector)?,
            min_body_rows: config.min_body_rows,
        })
    }

    /// Extract every table of `html`, in document order.
    pub fn parse_tables(&self, html: &str) -> Vec<RawTable> {
        let document = Html::parse_document(html);
        let tables: Vec<RawTable> = document
            .select(&self.table_selector)
            .filter_map(|table| self.table_from_element(table))
            .collect();

        debug!("Extracted {} table(s) from document", tables.len());
        tables
    }

    fn table_from_element(&self, table: ElementRef<'_>) -> Option<RawTable> {
        let rows: Vec<(ElementRef<'_>, bool)> = table
            .select(&self.row_selector)
            .filter(|row| belongs_to(*row, table))
            .map(|row| (row, in_thead(row)))
            .collect();

        let header_index = rows
            .iter()
            .position(|(_, thead)| *thead)
            .or((!rows.is_empty()).then_some(0))?;

        let headers = cell_texts(rows[header_index].0);
        if headers.is_empty() {
            return None;
        }

        let mut raw = RawTable::new(headers);
        for (index, (row, thead)) in rows.iter().enumerate() {
            if index == header_index || *thead {
                continue;
            }
            let cells = cell_texts(*row);
            if cells.iter().all(String::is_empty) {
                continue;
            }
            raw.push_row(cells);
        }

        if raw.row_count() < self.min_body_rows {
            debug!("Skipping table with headers {:?}: no body rows", raw.headers());
            return None;
        }
        Some(raw)
    }
}

fn compile(selector: &str) -> ExtractionResult<Selector> {
    Selector::parse(selector).map_err(|e| ExtractionError::invalid_selector(selector, e))
}

fn element_name<'a>(node: &'a scraper::Node) -> Option<&'a str> {
    node.as_element().map(|element| element.name())
}

/// Whether `table` is the nearest enclosing `<table>` of `row`
fn belongs_to(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.ancestors()
        .find(|node| element_name(node.value()) == Some("table"))
        .is_some_and(|node| node.id() == table.id())
}

/// Whether the row sits in a `<thead>` of its own table
fn in_thead(row: ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(|node| element_name(node.value()))
        .find(|name| matches!(*name, "thead" | "table"))
        == Some("thead")
}

/// Whitespace-collapsed text of the row's direct `td` / `th` cells
fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| cell.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" "))
        .collect()
}
