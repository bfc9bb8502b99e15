//! Flattening of match results into the final output table.

use serde::{Deserialize, Serialize};

use crate::models::{MatchRecord, MatchResult, PurchaseLine, FIELD_NA, NO_MATCH_NAME};

/// One flat output row, one per (purchase line, match record) pair.
///
/// Field order is the output column contract and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRow {
    pub item_name_raw: String,
    pub quantity: u32,
    pub status: String,
    pub matched_identity_text: String,
    pub matched_dosage_text: String,
    pub manufacturer: String,
    pub purchase_price: f64,
    pub known_threshold_price: f64,
    pub client_price: f64,
    pub match_score: f64,
    pub price_difference: f64,
    pub potential_saving: f64,
}

/// Flatten the one-line-to-many-records relationship into a flat table.
///
/// Original purchase-line order is preserved, and within a line the
/// cascade's emission order.
pub fn flatten(results: &[MatchResult]) -> Vec<ResultRow> {
    results
        .iter()
        .flat_map(|result| {
            result
                .records
                .iter()
                .map(move |record| project(&result.line, record))
        })
        .collect()
}

fn project(line: &PurchaseLine, record: &MatchRecord) -> ResultRow {
    let status = record.tier.status().to_string();

    match &record.entry {
        Some(entry) => ResultRow {
            item_name_raw: line.raw_name.clone(),
            quantity: line.quantity,
            status,
            matched_identity_text: entry.trade_name.clone(),
            matched_dosage_text: entry.dosage_raw.clone(),
            manufacturer: entry.manufacturer.clone(),
            purchase_price: entry.purchase_price,
            known_threshold_price: entry.threshold_price,
            client_price: entry.client_price,
            match_score: record.score,
            price_difference: record.price_delta,
            potential_saving: record.potential_saving,
        },
        None => ResultRow {
            item_name_raw: line.raw_name.clone(),
            quantity: line.quantity,
            status,
            matched_identity_text: NO_MATCH_NAME.to_string(),
            matched_dosage_text: FIELD_NA.to_string(),
            manufacturer: FIELD_NA.to_string(),
            purchase_price: 0.0,
            known_threshold_price: 0.0,
            client_price: 0.0,
            match_score: 0.0,
            price_difference: 0.0,
            potential_saving: 0.0,
        },
    }
}
