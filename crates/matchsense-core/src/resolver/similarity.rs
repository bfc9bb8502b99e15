//! String similarity primitives on a 0-100 scale.

use std::collections::BTreeSet;

use strsim::{jaro_winkler, normalized_levenshtein};

/// Combined base ratio: Jaro-Winkler weighted toward shared prefixes
/// plus normalized Levenshtein for overall shape.
fn base_ratio(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}

/// Weighted ratio of two strings.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    base_ratio(a, b) * 100.0
}

/// Weighted ratio after sorting whitespace tokens on both sides, which
/// makes the comparison insensitive to word order.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    weighted_ratio(&sort_tokens(a), &sort_tokens(b))
}

/// Set-based, order-insensitive token similarity.
///
/// Compares the shared-token core against each side's full token string
/// and keeps the best agreement, so a signature that is a subset of
/// another still scores highly and token order never matters. Tokens
/// split on whitespace and commas, so `"400 мг, 30 мл"` and
/// `"30 мл, 400 мг"` compare equal.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let set_a: BTreeSet<&str> = tokens(a).collect();
    let set_b: BTreeSet<&str> = tokens(b).collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let shared = join(set_a.intersection(&set_b).copied());
    let only_a = join(set_a.difference(&set_b).copied());
    let only_b = join(set_b.difference(&set_a).copied());

    let full_a = concat(&shared, &only_a);
    let full_b = concat(&shared, &only_b);

    let best = normalized_levenshtein(&shared, &full_a)
        .max(normalized_levenshtein(&shared, &full_b))
        .max(normalized_levenshtein(&full_a, &full_b));

    best * 100.0
}

fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

fn sort_tokens(s: &str) -> String {
    let mut parts: Vec<&str> = s.split_whitespace().collect();
    parts.sort_unstable();
    parts.join(" ")
}
