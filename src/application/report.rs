//! Export of stored optimization runs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{IngredientShortage, OptimizationRun, PricingMethod, RunId};
use crate::error::{Error, Result};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::Parse(format!(
                "unknown export format '{other}', expected csv or json"
            ))),
        }
    }
}

/// Render `run` in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(run: &OptimizationRun, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => render_csv(run),
        ExportFormat::Json => render_json(run),
    }
}

#[derive(Serialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum RowType {
    Item,
    Total,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    run_id: RunId,
    method: PricingMethod,
    created_at: String,
    row_type: RowType,
    item: Option<&'a str>,
    current_price: Option<Decimal>,
    optimized_price: Option<Decimal>,
    price_change: Option<Decimal>,
    expected_demand: Option<Decimal>,
    profit: Decimal,
}

/// One `item` row per menu item followed by a `total` row carrying the run's
/// total profit. The total row leaves the item cell empty.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn render_csv(run: &OptimizationRun) -> Result<String> {
    let created_at = run.created_at.to_rfc3339();
    let mut writer = csv::Writer::from_writer(Vec::new());

    for item in &run.outcome.items {
        writer.serialize(CsvRow {
            run_id: run.id,
            method: run.outcome.method,
            created_at: created_at.clone(),
            row_type: RowType::Item,
            item: Some(&item.name),
            current_price: item.current_price,
            optimized_price: Some(item.price),
            price_change: item.price_change(),
            expected_demand: Some(item.demand),
            profit: item.profit,
        })?;
    }
    writer.serialize(CsvRow {
        run_id: run.id,
        method: run.outcome.method,
        created_at,
        row_type: RowType::Total,
        item: None,
        current_price: None,
        optimized_price: None,
        price_change: None,
        expected_demand: None,
        profit: run.outcome.total_profit,
    })?;

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::Parse(e.to_string()))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    run_id: RunId,
    method: PricingMethod,
    created_at: DateTime<Utc>,
    items: Vec<JsonItem<'a>>,
    total_profit: Decimal,
    shortages: &'a [IngredientShortage],
}

#[derive(Serialize)]
struct JsonItem<'a> {
    name: &'a str,
    current_price: Option<Decimal>,
    optimized_price: Decimal,
    price_change: Option<Decimal>,
    expected_demand: Decimal,
    profit: Decimal,
}

/// Pretty-printed JSON document for `run`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(run: &OptimizationRun) -> Result<String> {
    let report = JsonReport {
        run_id: run.id,
        method: run.outcome.method,
        created_at: run.created_at,
        items: run
            .outcome
            .items
            .iter()
            .map(|item| JsonItem {
                name: &item.name,
                current_price: item.current_price,
                optimized_price: item.price,
                price_change: item.price_change(),
                expected_demand: item.demand,
                profit: item.profit,
            })
            .collect(),
        total_profit: run.outcome.total_profit,
        shortages: &run.outcome.shortages,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
