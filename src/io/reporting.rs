// src/io/reporting.rs

use crate::error::Result;
use crate::model::history::SalesHistory;
use crate::planning::engine::ProductReport;
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct HistoryRow<'a> {
    product: &'a str,
    date: NaiveDate,
    quantity: u32,
}

/// Writes one CSV row per product recommendation.
///
/// # Arguments
/// * `path` - Destination file (e.g., "reports/reorder.csv").
/// * `reports` - Output of `ReorderPlanner::recommend_all`.
pub fn write_recommendations(path: &Path, reports: &[ProductReport]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for report in reports {
        wtr.serialize(report)?;
    }
    wtr.flush()?;

    info!("Exported {} recommendation(s) to '{}'", reports.len(), path.display());
    Ok(())
}

/// Writes a product's sales history, newest first, as `product,date,quantity`.
pub fn write_history(path: &Path, product: &str, history: &SalesHistory) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in history.records() {
        wtr.serialize(HistoryRow {
            product,
            date: record.date,
            quantity: record.quantity,
        })?;
    }
    wtr.flush()?;

    info!("Exported {} sale(s) of '{}' to '{}'", history.len(), product, path.display());
    Ok(())
}
