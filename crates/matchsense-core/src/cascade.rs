//! The tiered matching cascade.
//!
//! Tiers form an explicit ranked table evaluated in order; the first
//! tier that produces records terminates the cascade for that line.
//! The cascade is a read-only query over the registry: it never mutates
//! anything and never errors on data shape, so every purchase line ends
//! with at least one record.

use serde::{Deserialize, Serialize};

use crate::dosage;
use crate::models::{
    MatchRecord, MatchResult, MatchTier, PurchaseLine, PurchaseRow, RegisterEntry, NOT_AVAILABLE,
    UNKNOWN_IDENTITY,
};
use crate::normalize::normalize;
use crate::pricing;
use crate::resolver::{similarity, IdentityCatalog, Scorer};

/// Tunable matching parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Minimum token-set similarity for a FuzzyDosage match (0-100)
    pub dosage_threshold: f64,
    /// Minimum identity-resolution score (0-100)
    pub identity_cutoff: f64,
    /// Identity scorer variant
    pub scorer: Scorer,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            dosage_threshold: 80.0,
            identity_cutoff: 65.0,
            scorer: Scorer::default(),
        }
    }
}

/// A tier step: inspects one prepared line against the registry and
/// either produces the line's records or defers to the next tier.
type TierFn<'a> = fn(&Matcher<'a>, &PurchaseLine) -> Option<Vec<MatchRecord>>;

/// Matches purchase lines against an immutable registry snapshot.
///
/// The registry must be fully loaded and normalized before construction;
/// afterwards every line is matched independently, so batch order never
/// affects per-line outcomes.
pub struct Matcher<'a> {
    registry: &'a [RegisterEntry],
    catalog: IdentityCatalog,
    config: MatchConfig,
}

impl<'a> Matcher<'a> {
    /// Create a matcher over a loaded registry.
    pub fn new(registry: &'a [RegisterEntry], config: MatchConfig) -> Self {
        let catalog = IdentityCatalog::from_registry(registry);
        Self {
            registry,
            catalog,
            config,
        }
    }

    /// The identity catalog snapshot in use.
    pub fn catalog(&self) -> &IdentityCatalog {
        &self.catalog
    }

    /// The active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Derive the canonical purchase line from a raw row.
    ///
    /// Computes the clean name, the dosage signature, and the resolved
    /// identity with its confidence; all derived exactly once.
    pub fn prepare(&self, row: &PurchaseRow) -> PurchaseLine {
        let clean_name = normalize(&row.raw_name);
        let dosage_signature = dosage::extract_signature(&row.raw_name);
        let fragment = dosage::strip_dosage(&clean_name);
        let (resolved_identity, identity_score) =
            self.catalog
                .resolve(&fragment, self.config.scorer, self.config.identity_cutoff);

        PurchaseLine {
            raw_name: row.raw_name.clone(),
            quantity: row.quantity,
            clean_name,
            dosage_signature,
            resolved_identity,
            identity_score,
        }
    }

    /// Run the cascade for one prepared line.
    ///
    /// Tier order is the contract: unknown identity short-circuits
    /// everything, exact wins over fuzzy dosage, fuzzy dosage over
    /// partial identity, and the NotFound fallback is total.
    pub fn match_line(&self, line: &PurchaseLine) -> MatchResult {
        let tiers: [TierFn<'a>; 5] = [
            Self::tier_unknown_identity,
            Self::tier_exact,
            Self::tier_fuzzy_dosage,
            Self::tier_partial_identity,
            Self::tier_not_found,
        ];
        let records = tiers
            .iter()
            .find_map(|tier| tier(self, line))
            .unwrap_or_else(|| vec![MatchRecord::not_found()]);

        MatchResult {
            line: line.clone(),
            records,
        }
    }

    /// Prepare and match a whole batch, preserving input order.
    pub fn run(&self, rows: &[PurchaseRow]) -> Vec<MatchResult> {
        rows.iter()
            .map(|row| {
                let line = self.prepare(row);
                self.match_line(&line)
            })
            .collect()
    }

    /// Registry entries sharing an identity, in registry order.
    fn identity_group<'m>(
        &'m self,
        identity: &'m str,
    ) -> impl Iterator<Item = &'a RegisterEntry> + 'm {
        self.registry.iter().filter(move |e| e.identity == identity)
    }

    /// Tier 0: an unresolved identity ends the cascade immediately.
    fn tier_unknown_identity(&self, line: &PurchaseLine) -> Option<Vec<MatchRecord>> {
        (line.resolved_identity == UNKNOWN_IDENTITY).then(|| vec![MatchRecord::not_found()])
    }

    /// Tier 1: identity and dosage signature both equal. First entry in
    /// registry order wins; exactly one record, score 100.
    fn tier_exact(&self, line: &PurchaseLine) -> Option<Vec<MatchRecord>> {
        let entry = self
            .identity_group(&line.resolved_identity)
            .find(|e| e.dosage_signature == line.dosage_signature)?;

        Some(vec![self.record(MatchTier::Exact, entry, 100.0, line.quantity)])
    }

    /// Tier 2: best token-set dosage similarity within the identity
    /// group. Comparisons where either side is the `"n/a"` sentinel are
    /// skipped; ties keep the first-seen maximum. When the maximum
    /// reaches the threshold, every entry carrying the winning signature
    /// is emitted with that one score.
    fn tier_fuzzy_dosage(&self, line: &PurchaseLine) -> Option<Vec<MatchRecord>> {
        let mut best_score = 0.0_f64;
        let mut best_signature: Option<&str> = None;

        for entry in self.identity_group(&line.resolved_identity) {
            if line.dosage_signature == NOT_AVAILABLE || entry.dosage_signature == NOT_AVAILABLE {
                continue;
            }
            let score = similarity::token_set_ratio(&line.dosage_signature, &entry.dosage_signature);
            if score > best_score {
                best_score = score;
                best_signature = Some(&entry.dosage_signature);
            }
        }

        let winning = best_signature.filter(|_| best_score >= self.config.dosage_threshold)?;

        let records: Vec<MatchRecord> = self
            .identity_group(&line.resolved_identity)
            .filter(|e| e.dosage_signature == winning)
            .map(|e| self.record(MatchTier::FuzzyDosage, e, best_score, line.quantity))
            .collect();

        (!records.is_empty()).then_some(records)
    }

    /// Tier 3: the identity matched but no dosage tier qualified. All
    /// identity-sharing entries are emitted with the identity score.
    fn tier_partial_identity(&self, line: &PurchaseLine) -> Option<Vec<MatchRecord>> {
        let records: Vec<MatchRecord> = self
            .identity_group(&line.resolved_identity)
            .map(|e| self.record(MatchTier::PartialIdentity, e, line.identity_score, line.quantity))
            .collect();

        (!records.is_empty()).then_some(records)
    }

    /// Tier 4: defensive fallback when nothing shares the identity.
    fn tier_not_found(&self, _line: &PurchaseLine) -> Option<Vec<MatchRecord>> {
        Some(vec![MatchRecord::not_found()])
    }

    fn record(
        &self,
        tier: MatchTier,
        entry: &RegisterEntry,
        score: f64,
        quantity: u32,
    ) -> MatchRecord {
        let (price_delta, potential_saving) = pricing::compute(Some(entry), quantity);
        MatchRecord {
            tier,
            entry: Some(entry.clone()),
            score,
            price_delta,
            potential_saving,
        }
    }
}
