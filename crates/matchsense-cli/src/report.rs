//! Row classification and run summary.

use serde::{Deserialize, Serialize};

use matchsense_core::{MatchTier, ResultRow};

/// Presentation class for one output row, consumed by downstream
/// styling tools. Red takes precedence over the tier colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowColor {
    Neutral,
    Green,
    Yellow,
    Blue,
    Red,
}

impl RowColor {
    pub fn as_str(self) -> &'static str {
        match self {
            RowColor::Neutral => "neutral",
            RowColor::Green => "green",
            RowColor::Yellow => "yellow",
            RowColor::Blue => "blue",
            RowColor::Red => "red",
        }
    }
}

/// Classify a row from its status and potential saving.
///
/// Any matched row with a positive potential saving is flagged red
/// regardless of tier; an unparseable status is treated as NotFound.
pub fn classify(status: &str, potential_saving: f64) -> RowColor {
    let tier = status.parse::<MatchTier>().unwrap_or(MatchTier::NotFound);
    if tier != MatchTier::NotFound && potential_saving > 0.0 {
        return RowColor::Red;
    }
    match tier {
        MatchTier::Exact => RowColor::Green,
        MatchTier::FuzzyDosage => RowColor::Yellow,
        MatchTier::PartialIdentity => RowColor::Blue,
        MatchTier::NotFound => RowColor::Neutral,
    }
}

/// Aggregate figures for one run, exported as JSON next to the CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_rows: usize,
    pub matched_rows: usize,
    pub overpaid_rows: usize,
    pub total_potential_saving: f64,
    pub full_matches: usize,
    pub potential_matches: usize,
    pub partial_identity_matches: usize,
    pub not_found: usize,
}

pub fn summarize(rows: &[ResultRow]) -> RunSummary {
    let mut summary = RunSummary {
        total_rows: rows.len(),
        matched_rows: 0,
        overpaid_rows: 0,
        total_potential_saving: 0.0,
        full_matches: 0,
        potential_matches: 0,
        partial_identity_matches: 0,
        not_found: 0,
    };

    for row in rows {
        let tier = row.status.parse::<MatchTier>().unwrap_or(MatchTier::NotFound);
        match tier {
            MatchTier::Exact => summary.full_matches += 1,
            MatchTier::FuzzyDosage => summary.potential_matches += 1,
            MatchTier::PartialIdentity => summary.partial_identity_matches += 1,
            MatchTier::NotFound => summary.not_found += 1,
        }
        if tier != MatchTier::NotFound {
            summary.matched_rows += 1;
            summary.total_potential_saving += row.potential_saving;
            if row.potential_saving > 0.0 {
                summary.overpaid_rows += 1;
            }
        }
    }
    summary
}
