//! CSV ingest for the registry and the purchase list.
//!
//! Both tables are semicolon-separated by default. Required columns are
//! looked up by header name after trimming and BOM-stripping; missing
//! required columns are the one fatal load condition, reported with the
//! expected schema. Everything else degrades: optional cells fall back
//! to sentinels, malformed numerics coerce to zero.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use thiserror::Error;
use tracing::debug;

use matchsense_core::numeric::{parse_decimal, parse_quantity};
use matchsense_core::{PurchaseRow, RegisterEntry};

/// Required registry columns, in expected-schema reporting order.
pub const REGISTER_REQUIRED: &[&str] = &["identity", "trade_name", "dosage"];

/// Required purchase columns.
pub const PURCHASE_REQUIRED: &[&str] = &["item_name_raw", "quantity"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path} is missing required column '{column}' (expected columns: {expected})")]
    MissingColumn {
        path: String,
        column: String,
        expected: String,
    },
}

/// Header index resolved against a cleaned header row.
struct Header {
    columns: Vec<String>,
}

impl Header {
    fn new(record: &StringRecord) -> Self {
        Self {
            columns: record.iter().map(clean_header).collect(),
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col == name)
    }

    fn require(
        &self,
        name: &str,
        required: &[&str],
        path: &Path,
    ) -> Result<usize, IngestError> {
        self.find(name).ok_or_else(|| IngestError::MissingColumn {
            path: path.display().to_string(),
            column: name.to_string(),
            expected: required.join(", "),
        })
    }
}

/// Trim surrounding whitespace and a leading UTF-8 BOM from a header cell.
fn clean_header(cell: &str) -> String {
    cell.trim_start_matches('\u{feff}').trim().to_string()
}

fn open_reader(path: &Path, delimiter: u8) -> Result<csv::Reader<File>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.display().to_string(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file))
}

fn cell<'r>(record: &'r StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or("")
}

fn optional_cell<'r>(record: &'r StringRecord, index: Option<usize>) -> &'r str {
    index.map_or("", |i| cell(record, i))
}

/// Load and canonicalize the product registry.
pub fn load_register(path: &Path, delimiter: u8) -> Result<Vec<RegisterEntry>, IngestError> {
    let mut reader = open_reader(path, delimiter)?;
    let header = Header::new(reader.headers().map_err(|source| IngestError::Csv {
        path: path.display().to_string(),
        source,
    })?);

    let identity = header.require("identity", REGISTER_REQUIRED, path)?;
    let trade_name = header.require("trade_name", REGISTER_REQUIRED, path)?;
    let dosage = header.require("dosage", REGISTER_REQUIRED, path)?;
    let manufacturer = header.find("manufacturer");
    let purchase_price = header.find("purchase_price");
    let threshold_price = header.find("known_threshold_price");
    let client_price = header.find("client_price");

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.display().to_string(),
            source,
        })?;
        entries.push(RegisterEntry::from_raw(
            cell(&record, identity),
            cell(&record, trade_name),
            cell(&record, dosage),
            optional_cell(&record, manufacturer),
            parse_decimal(optional_cell(&record, purchase_price)),
            parse_decimal(optional_cell(&record, threshold_price)),
            parse_decimal(optional_cell(&record, client_price)),
        ));
    }
    debug!(path = %path.display(), entries = entries.len(), "loaded registry");
    Ok(entries)
}

/// Load the purchase list.
pub fn load_purchases(path: &Path, delimiter: u8) -> Result<Vec<PurchaseRow>, IngestError> {
    let mut reader = open_reader(path, delimiter)?;
    let header = Header::new(reader.headers().map_err(|source| IngestError::Csv {
        path: path.display().to_string(),
        source,
    })?);

    let item_name = header.require("item_name_raw", PURCHASE_REQUIRED, path)?;
    let quantity = header.require("quantity", PURCHASE_REQUIRED, path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.display().to_string(),
            source,
        })?;
        rows.push(PurchaseRow::new(
            cell(&record, item_name),
            parse_quantity(cell(&record, quantity)),
        ));
    }
    debug!(path = %path.display(), rows = rows.len(), "loaded purchases");
    Ok(rows)
}
