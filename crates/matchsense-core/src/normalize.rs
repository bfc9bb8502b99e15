//! Free-text canonicalizer.
//!
//! Every identity string and purchase name passes through here before
//! any comparison. The transform is total and idempotent.

use crate::models::NOT_AVAILABLE;

/// Canonicalize free text for identity comparison.
///
/// Lowercases, drops byte-order marks and control/invisible characters,
/// replaces punctuation with single spaces, collapses whitespace runs
/// and trims. An input with nothing left maps to the `"n/a"` sentinel,
/// which is itself a fixed point of the transform.
pub fn normalize(text: &str) -> String {
    if text == NOT_AVAILABLE {
        return NOT_AVAILABLE.to_string();
    }

    let lowered = text.to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { ' ' })
        .collect();
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        collapsed
    }
}
