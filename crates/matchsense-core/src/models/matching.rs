//! Match outcome models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PurchaseLine, RegisterEntry};

/// Text shown in place of a trade name when nothing matched.
pub const NO_MATCH_NAME: &str = "no match";

/// Confidence tier of a match record, ordered from strongest to weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    /// Identity and dosage signature both matched precisely.
    #[serde(rename = "FullMatch")]
    Exact,
    /// Identity matched; dosage matched fuzzily above the threshold.
    #[serde(rename = "PotentialMatch")]
    FuzzyDosage,
    /// Only the identity matched.
    #[serde(rename = "PartialIdentityMatch")]
    PartialIdentity,
    /// No registry candidate.
    #[serde(rename = "NotFound")]
    NotFound,
}

impl MatchTier {
    /// Status literal used in the output table.
    ///
    /// These four values are a wire contract for downstream consumers
    /// and round-trip exactly through [`FromStr`].
    pub fn status(&self) -> &'static str {
        match self {
            MatchTier::Exact => "FullMatch",
            MatchTier::FuzzyDosage => "PotentialMatch",
            MatchTier::PartialIdentity => "PartialIdentityMatch",
            MatchTier::NotFound => "NotFound",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}

/// Error for an unrecognized status literal.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized match status: {0}")]
pub struct ParseTierError(pub String);

impl FromStr for MatchTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FullMatch" => Ok(MatchTier::Exact),
            "PotentialMatch" => Ok(MatchTier::FuzzyDosage),
            "PartialIdentityMatch" => Ok(MatchTier::PartialIdentity),
            "NotFound" => Ok(MatchTier::NotFound),
            other => Err(ParseTierError(other.to_string())),
        }
    }
}

/// A single cascade outcome for one purchase line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    /// Confidence tier
    pub tier: MatchTier,
    /// Matched registry entry; `None` only for `NotFound`
    pub entry: Option<RegisterEntry>,
    /// 0-100; exactness, dosage similarity or identity confidence
    /// depending on the tier
    pub score: f64,
    /// client_price - threshold_price (positive = overpayment)
    pub price_delta: f64,
    /// price_delta * quantity
    pub potential_saving: f64,
}

impl MatchRecord {
    /// The fixed NotFound record: no entry, all metrics zero.
    pub fn not_found() -> Self {
        Self {
            tier: MatchTier::NotFound,
            entry: None,
            score: 0.0,
            price_delta: 0.0,
            potential_saving: 0.0,
        }
    }
}

/// One purchase line paired with its cascade outcomes.
///
/// `records` is never empty: the cascade's NotFound fallback guarantees
/// at least one record per line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    /// The prepared purchase line
    pub line: PurchaseLine,
    /// Match records in cascade emission order
    pub records: Vec<MatchRecord>,
}
