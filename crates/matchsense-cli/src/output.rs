//! Result CSV and summary JSON writers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use matchsense_core::ResultRow;

use crate::report::{classify, RunSummary};

/// Output column order. A trailing `color` column carries the row
/// classification for downstream styling consumers.
const HEADERS: &[&str] = &[
    "item_name_raw",
    "quantity",
    "status",
    "matched_identity_text",
    "matched_dosage_text",
    "manufacturer",
    "purchase_price",
    "known_threshold_price",
    "client_price",
    "match_score",
    "price_difference",
    "potential_saving",
    "color",
];

/// Write the flat result table as CSV.
pub fn write_rows(path: &Path, rows: &[ResultRow], delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;

    writer.write_record(HEADERS)?;
    for row in rows {
        let color = classify(&row.status, row.potential_saving);
        let record = [
            row.item_name_raw.clone(),
            row.quantity.to_string(),
            row.status.clone(),
            row.matched_identity_text.clone(),
            row.matched_dosage_text.clone(),
            row.manufacturer.clone(),
            format!("{:.2}", row.purchase_price),
            format!("{:.2}", row.known_threshold_price),
            format!("{:.2}", row.client_price),
            format!("{:.2}", row.match_score),
            format!("{:.2}", row.price_difference),
            format!("{:.2}", row.potential_saving),
            color.as_str().to_string(),
        ];
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the run summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}
