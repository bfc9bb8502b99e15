//! Lenient numeric coercion for price and quantity cells.
//!
//! Every "parse or fall back to zero" decision lives here, so no
//! loading or pricing site carries its own ad hoc handling.

/// Parse a decimal that may use a comma separator.
///
/// `"2,5"`, `"2.5"` and `" 2.5 "` all parse; anything else (including
/// an empty cell) falls back to `0.0`. Never panics, never errors.
pub fn parse_decimal(text: &str) -> f64 {
    text.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Parse a quantity that may arrive as `"10"`, `"10,0"` or `"10.0"`.
///
/// Fractional parts truncate; malformed or negative input falls back
/// to `0`.
pub fn parse_quantity(text: &str) -> u32 {
    let value = text.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        value.trunc() as u32
    } else {
        0
    }
}
