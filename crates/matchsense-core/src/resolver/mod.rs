//! Fuzzy identity resolution against the registry identity catalog.

pub mod similarity;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{RegisterEntry, NOT_AVAILABLE, UNKNOWN_IDENTITY};

/// Pluggable identity scorer.
///
/// Two legitimate choices exist with materially different behavior on
/// reordered words; one is selected per run and call sites never mix
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Combined Jaro-Winkler + normalized Levenshtein weighted ratio.
    #[default]
    WeightedRatio,
    /// The same ratio after sorting whitespace tokens; insensitive to
    /// word order.
    TokenSortRatio,
}

impl Scorer {
    /// Score two strings, 0-100.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            Scorer::WeightedRatio => similarity::weighted_ratio(a, b),
            Scorer::TokenSortRatio => similarity::token_sort_ratio(a, b),
        }
    }
}

/// Immutable, deduplicated snapshot of registry identities.
///
/// Built once per run, before any purchase line is processed; first-seen
/// order is preserved so resolution ties are deterministic.
#[derive(Debug, Clone, Default)]
pub struct IdentityCatalog {
    identities: Vec<String>,
}

impl IdentityCatalog {
    /// Build from already-normalized identity strings, dropping
    /// duplicates and sentinel values.
    pub fn new(identities: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let identities = identities
            .into_iter()
            .filter(|id| !id.is_empty() && id != NOT_AVAILABLE)
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self { identities }
    }

    /// Snapshot the identities of a loaded registry.
    pub fn from_registry(entries: &[RegisterEntry]) -> Self {
        Self::new(entries.iter().map(|e| e.identity.clone()))
    }

    /// Number of distinct identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether the catalog holds no identities.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Iterate the catalog in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identities.iter().map(String::as_str)
    }

    /// Resolve a name fragment to the best-scoring identity.
    ///
    /// Returns `("unknown", 0.0)` when the fragment or the catalog is
    /// empty, or when no candidate reaches the cutoff.
    pub fn resolve(&self, fragment: &str, scorer: Scorer, cutoff: f64) -> (String, f64) {
        if fragment.is_empty() || fragment == NOT_AVAILABLE || self.identities.is_empty() {
            return (UNKNOWN_IDENTITY.to_string(), 0.0);
        }

        let mut best: Option<(&str, f64)> = None;
        for identity in &self.identities {
            let score = scorer.score(fragment, identity);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((identity, score));
            }
        }

        match best {
            Some((identity, score)) if score >= cutoff => (identity.to_string(), score),
            _ => (UNKNOWN_IDENTITY.to_string(), 0.0),
        }
    }
}
