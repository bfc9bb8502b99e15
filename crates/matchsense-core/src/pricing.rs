//! Price variance metrics.

use crate::models::RegisterEntry;

/// Per-unit price delta and total potential saving for a match.
///
/// `price_delta = client_price - threshold_price` (positive means the
/// client overpays relative to the known threshold);
/// `potential_saving = price_delta * quantity`. A missing entry (the
/// NotFound case) yields fixed zeros and never reads registry data.
pub fn compute(entry: Option<&RegisterEntry>, quantity: u32) -> (f64, f64) {
    let Some(entry) = entry else {
        return (0.0, 0.0);
    };

    let price_delta = entry.client_price - entry.threshold_price;
    (price_delta, price_delta * f64::from(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(client: f64, threshold: f64) -> RegisterEntry {
        RegisterEntry::from_raw("ibuprofen", "Nurofen", "400 mg", "Acme", 1.0, threshold, client)
    }

    #[test]
    fn test_positive_delta_is_overpayment() {
        let e = entry(5.0, 3.0);
        assert_eq!(compute(Some(&e), 10), (2.0, 20.0));
    }

    #[test]
    fn test_negative_delta_is_saving() {
        let e = entry(2.0, 2.5);
        let (delta, saving) = compute(Some(&e), 4);
        assert_eq!(delta, -0.5);
        assert_eq!(saving, -2.0);
    }

    #[test]
    fn test_zero_quantity_zeroes_saving() {
        let e = entry(5.0, 3.0);
        let (delta, saving) = compute(Some(&e), 0);
        assert_eq!(delta, 2.0);
        assert_eq!(saving, 0.0);
    }

    #[test]
    fn test_missing_entry_is_all_zeros() {
        assert_eq!(compute(None, 10), (0.0, 0.0));
    }
}
