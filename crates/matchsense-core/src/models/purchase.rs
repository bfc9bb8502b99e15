//! Purchase list models.

use serde::{Deserialize, Serialize};

/// Identity assigned when resolution falls below the cutoff.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// A raw purchase input row, as produced by the loading collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRow {
    /// Free-text item name as typed by the buyer
    pub raw_name: String,
    /// Ordered quantity; malformed input coerces to 0 at load time
    pub quantity: u32,
}

impl PurchaseRow {
    /// Convenience constructor.
    pub fn new(raw_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            raw_name: raw_name.into(),
            quantity,
        }
    }
}

/// A canonical purchase line with all derived matching fields.
///
/// Derived fields are computed once during preparation and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseLine {
    /// Original free-text item name
    pub raw_name: String,
    /// Ordered quantity
    pub quantity: u32,
    /// Normalized name text
    pub clean_name: String,
    /// Canonical dosage signature extracted from the raw name
    pub dosage_signature: String,
    /// Resolved registry identity, `UNKNOWN_IDENTITY` when below cutoff
    pub resolved_identity: String,
    /// Identity resolution confidence, 0-100
    pub identity_score: f64,
}

impl PurchaseLine {
    /// Whether identity resolution produced a usable registry identity.
    pub fn is_resolved(&self) -> bool {
        self.resolved_identity != UNKNOWN_IDENTITY
    }
}
