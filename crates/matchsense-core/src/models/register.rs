//! Registry (reference catalog) models.

use serde::{Deserialize, Serialize};

use crate::dosage;
use crate::normalize::normalize;

/// Sentinel for derived text that could not be computed (empty name,
/// no recognizable dosage).
pub const NOT_AVAILABLE: &str = "n/a";

/// Sentinel for absent source fields carried into the output table
/// (manufacturer, dosage text of a NotFound row).
pub const FIELD_NA: &str = "N/A";

/// A single entry in the canonical product registry.
///
/// Multiple entries may share an `identity` and/or a `dosage_signature`
/// (different manufacturers or trade names); all of them are valid
/// alternative matches. Entries are immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterEntry {
    /// Canonical active-ingredient identity (historically "MNN")
    pub identity: String,
    /// Commercial trade name
    pub trade_name: String,
    /// Dosage text exactly as it appears in the registry
    pub dosage_raw: String,
    /// Canonical dosage signature derived from `dosage_raw`
    pub dosage_signature: String,
    /// Manufacturer, `FIELD_NA` when absent
    pub manufacturer: String,
    /// Registry purchase price per unit
    pub purchase_price: f64,
    /// Known threshold price per unit
    pub threshold_price: f64,
    /// Client price per unit
    pub client_price: f64,
}

impl RegisterEntry {
    /// Build an entry from raw registry cells, deriving the canonical
    /// identity and the dosage signature.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        identity: &str,
        trade_name: &str,
        dosage: &str,
        manufacturer: &str,
        purchase_price: f64,
        threshold_price: f64,
        client_price: f64,
    ) -> Self {
        let manufacturer = manufacturer.trim();
        Self {
            identity: normalize(identity),
            trade_name: trade_name.trim().to_string(),
            dosage_raw: dosage.trim().to_string(),
            dosage_signature: dosage::extract_signature(dosage),
            manufacturer: if manufacturer.is_empty() {
                FIELD_NA.to_string()
            } else {
                manufacturer.to_string()
            },
            purchase_price,
            threshold_price,
            client_price,
        }
    }

    /// Whether the entry carries a usable dosage signature.
    pub fn has_dosage_signature(&self) -> bool {
        self.dosage_signature != NOT_AVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_derives_identity_and_signature() {
        let entry = RegisterEntry::from_raw(
            "  Ibuprofen ",
            "Nurofen",
            "400 MG tablets",
            "Reckitt",
            1.0,
            3.0,
            5.0,
        );

        assert_eq!(entry.identity, "ibuprofen");
        assert_eq!(entry.dosage_signature, "400 mg");
        assert_eq!(entry.dosage_raw, "400 MG tablets");
        assert!(entry.has_dosage_signature());
    }

    #[test]
    fn test_from_raw_missing_fields_fall_back_to_sentinels() {
        let entry = RegisterEntry::from_raw("", "Something", "", "", 0.0, 0.0, 0.0);

        assert_eq!(entry.identity, NOT_AVAILABLE);
        assert_eq!(entry.dosage_signature, NOT_AVAILABLE);
        assert_eq!(entry.manufacturer, FIELD_NA);
        assert!(!entry.has_dosage_signature());
    }
}
