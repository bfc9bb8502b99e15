//! Dosage signature extraction.
//!
//! Parses dosage, concentration and fixed-dose-combination tokens out of
//! free text into a canonical, order-independent signature string. The
//! same extraction runs on registry dosage text and on purchase free
//! text, so both sides are directly comparable.
//!
//! Extraction runs on the raw text (matched case-insensitively), before
//! punctuation stripping: full normalization destroys the `/`, `%` and
//! `+` characters the concentration and combination tiers rely on.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::NOT_AVAILABLE;

/// `value unit / volume-unit`, e.g. "5 мг/мл", "100 IU/ml".
static CONCENTRATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+[,.]?\d*)\s*(мг|ед|г|мкг|мо|ме|%|mg|g|mcg|iu)\s*/\s*(мл|доза|ml|l|mcl)")
        .expect("invalid concentration pattern")
});

/// `value unit [+|/|—] value unit`, fixed-dose combination products.
static COMBINATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+[,.]?\d*)\s*(мг|ед|мл|г|мкг|мо|ме|%|mg|ml|g|mcg|iu)\s*[+/—]\s*(\d+[,.]?\d*)\s*(мг|ед|мл|г|мкг|мо|ме|%|mg|ml|g|mcg|iu)",
    )
    .expect("invalid combination pattern")
});

/// A single `value unit` pair; fallback tier only.
static SIMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+[,.]?\d*)\s*(мкг/доза|мг|ед|мл|г|мкг|мо|ме|%|mg|ml|g|mcg|iu)")
        .expect("invalid simple dosage pattern")
});

/// Dosage token runs inside an already-normalized name, for stripping.
static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d+[,.]?\d*\s*(?:мкг/доза|мг|ед|мл|г|мкг|мо|ме|%|mg|ml|g|mcg|iu)\s*[+/—]?\s*(?:\d+[,.]?\d*)?\s*(?:мг|ед|мл|г|мкг|мо|ме|%|mg|ml|g|mcg|iu)?",
    )
    .expect("invalid dosage strip pattern")
});

/// Extract the canonical dosage signature from free text.
///
/// Tiers apply in strict priority order, each only when the higher tiers
/// found nothing: concentration, then combination, then a simple
/// `value unit` pair. All matches of the applicable tier are collected
/// as a set, sorted lexicographically and joined with `", "`. Numeric
/// values are rendered with the registry's comma decimal convention.
/// Returns `"n/a"` when nothing matches.
pub fn extract_signature(text: &str) -> String {
    let mut found: BTreeSet<String> = BTreeSet::new();

    for cap in CONCENTRATION_RE.captures_iter(text) {
        found.insert(format!(
            "{} {}/{}",
            canonical_value(&cap[1]),
            cap[2].to_lowercase(),
            cap[3].to_lowercase()
        ));
    }

    if found.is_empty() {
        for cap in COMBINATION_RE.captures_iter(text) {
            found.insert(format!(
                "{} {} + {} {}",
                canonical_value(&cap[1]),
                cap[2].to_lowercase(),
                canonical_value(&cap[3]),
                cap[4].to_lowercase()
            ));
        }
    }

    if found.is_empty() {
        for cap in SIMPLE_RE.captures_iter(text) {
            found.insert(format!(
                "{} {}",
                canonical_value(&cap[1]),
                cap[2].to_lowercase()
            ));
        }
    }

    if found.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        found.into_iter().collect::<Vec<_>>().join(", ")
    }
}

/// Remove dosage and quantity token runs from a normalized name,
/// leaving the fragment used for identity resolution.
pub fn strip_dosage(clean_name: &str) -> String {
    let stripped = STRIP_RE.replace_all(clean_name, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a numeric token with a comma decimal separator.
fn canonical_value(value: &str) -> String {
    value.replace('.', ",")
}
