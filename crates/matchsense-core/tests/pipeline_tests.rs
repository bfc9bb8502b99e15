//! End-to-end tests for the matching pipeline.
//!
//! These exercise the full prepare → cascade → pricing → assemble chain
//! against small in-memory registries with known expected outcomes.

use matchsense_core::models::UNKNOWN_IDENTITY;
use matchsense_core::{
    flatten, MatchConfig, MatchTier, Matcher, PurchaseRow, RegisterEntry, Scorer,
};

fn entry(
    identity: &str,
    trade_name: &str,
    dosage: &str,
    client: f64,
    threshold: f64,
) -> RegisterEntry {
    RegisterEntry::from_raw(identity, trade_name, dosage, "Acme Pharma", 1.0, threshold, client)
}

/// Expected outcome for one purchase line against a fixed registry.
struct GoldenCase {
    id: &'static str,
    purchase: &'static str,
    quantity: u32,
    expected_status: &'static str,
    expected_records: usize,
    expected_saving: f64,
}

fn golden_registry() -> Vec<RegisterEntry> {
    vec![
        entry("ibuprofen", "Nurofen", "400 mg", 5.0, 3.0),
        entry("amoxicillin", "Amoxil Susp", "500 mg 30 ml", 2.0, 1.5),
        entry("amoxicillin", "Ospamox Susp", "500 mg 30 ml", 2.2, 1.5),
        entry("amoxicillin", "Amoxil Forte", "250 mg", 1.0, 1.2),
        entry("paracetamol", "Panadol", "500 mg", 1.0, 1.5),
    ]
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "exact-match-overpayment",
            purchase: "Ibuprofen 400mg",
            quantity: 10,
            expected_status: "FullMatch",
            expected_records: 1,
            expected_saving: 20.0,
        },
        GoldenCase {
            id: "fuzzy-dosage-multiple-entries",
            purchase: "Amoxicillin 500 mg",
            quantity: 2,
            expected_status: "PotentialMatch",
            expected_records: 2,
            expected_saving: 1.0, // first record: (2.0 - 1.5) * 2
        },
        GoldenCase {
            id: "partial-identity-no-dosage",
            purchase: "Paracetamol tablets",
            quantity: 3,
            expected_status: "PartialIdentityMatch",
            expected_records: 1,
            expected_saving: -1.5, // (1.0 - 1.5) * 3, client pays below threshold
        },
        GoldenCase {
            id: "unknown-identity",
            purchase: "UnknownDrugXYZ",
            quantity: 5,
            expected_status: "NotFound",
            expected_records: 1,
            expected_saving: 0.0,
        },
    ]
}

#[test]
fn golden_cases_match_expected_tiers_and_savings() {
    let registry = golden_registry();
    let matcher = Matcher::new(&registry, MatchConfig::default());

    for case in golden_cases() {
        let line = matcher.prepare(&PurchaseRow::new(case.purchase, case.quantity));
        let result = matcher.match_line(&line);

        assert_eq!(
            result.records.len(),
            case.expected_records,
            "record count for case {}",
            case.id
        );
        for record in &result.records {
            assert_eq!(
                record.tier.status(),
                case.expected_status,
                "status for case {}",
                case.id
            );
        }
        assert!(
            (result.records[0].potential_saving - case.expected_saving).abs() < 1e-9,
            "saving for case {}: got {}",
            case.id,
            result.records[0].potential_saving
        );
    }
}

// Spec scenario A: single-entry registry, exact match, overpayment metrics.
#[test]
fn exact_match_scores_100_and_prices_out() {
    let registry = vec![entry("ibuprofen", "Nurofen", "400 mg", 5.0, 3.0)];
    let matcher = Matcher::new(&registry, MatchConfig::default());

    let results = matcher.run(&[PurchaseRow::new("Ibuprofen 400mg", 10)]);
    let rows = flatten(&results);

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.status, "FullMatch");
    assert_eq!(row.match_score, 100.0);
    assert_eq!(row.price_difference, 2.0);
    assert_eq!(row.potential_saving, 20.0);
}

// Spec scenario B: nothing matches, everything zero.
#[test]
fn unmatched_line_produces_not_found_row_with_zeros() {
    let registry = vec![entry("ibuprofen", "Nurofen", "400 mg", 5.0, 3.0)];
    let matcher = Matcher::new(&registry, MatchConfig::default());

    let results = matcher.run(&[PurchaseRow::new("UnknownDrugXYZ", 5)]);
    assert_eq!(results[0].line.resolved_identity, UNKNOWN_IDENTITY);

    let rows = flatten(&results);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.status, "NotFound");
    assert_eq!(row.client_price, 0.0);
    assert_eq!(row.known_threshold_price, 0.0);
    assert_eq!(row.purchase_price, 0.0);
    assert_eq!(row.potential_saving, 0.0);
}

// Spec scenario C: the fuzzy dosage tier returns only the winning
// signature's entries and excludes the rest of the identity group.
#[test]
fn fuzzy_dosage_excludes_non_winning_signatures() {
    let registry = vec![
        entry("amoxicillin", "Amoxil Susp", "500 mg 30 ml", 2.0, 1.5),
        entry("amoxicillin", "Amoxil Forte", "250 mg", 1.0, 1.2),
    ];
    let matcher = Matcher::new(&registry, MatchConfig::default());

    let results = matcher.run(&[PurchaseRow::new("Amoxicillin 500mg", 4)]);
    let records = &results[0].records;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tier, MatchTier::FuzzyDosage);
    assert!(records[0].score >= 80.0);
    assert_eq!(
        records[0].entry.as_ref().map(|e| e.trade_name.as_str()),
        Some("Amoxil Susp")
    );
}

#[test]
fn fuzzy_dosage_records_share_one_score_and_signature() {
    let registry = golden_registry();
    let matcher = Matcher::new(&registry, MatchConfig::default());

    let results = matcher.run(&[PurchaseRow::new("Amoxicillin 500 mg", 2)]);
    let records = &results[0].records;

    assert!(records.len() > 1);
    let score = records[0].score;
    let signature = records[0]
        .entry
        .as_ref()
        .map(|e| e.dosage_signature.clone())
        .expect("fuzzy record has an entry");
    for record in records {
        assert_eq!(record.score, score);
        assert_eq!(
            record.entry.as_ref().map(|e| e.dosage_signature.as_str()),
            Some(signature.as_str())
        );
    }
}

#[test]
fn every_purchase_line_yields_at_least_one_output_row() {
    let registry = golden_registry();
    let matcher = Matcher::new(&registry, MatchConfig::default());

    let rows_in = vec![
        PurchaseRow::new("Ibuprofen 400mg", 1),
        PurchaseRow::new("Amoxicillin 500 mg", 2),
        PurchaseRow::new("", 0),
        PurchaseRow::new("???", 7),
    ];
    let results = matcher.run(&rows_in);
    let rows_out = flatten(&results);

    assert!(rows_out.len() >= rows_in.len());
    for result in &results {
        assert!(!result.records.is_empty());
    }
}

#[test]
fn case_and_spacing_variants_match_identically() {
    let registry = vec![entry("ibuprofen", "Nurofen", "400 mg", 5.0, 3.0)];
    let matcher = Matcher::new(&registry, MatchConfig::default());

    let a = matcher.prepare(&PurchaseRow::new("Ibuprofen 400mg", 1));
    let b = matcher.prepare(&PurchaseRow::new("IBUPROFEN 400 MG", 1));

    assert_eq!(a.dosage_signature, b.dosage_signature);
    assert_eq!(a.resolved_identity, b.resolved_identity);
    assert_eq!(
        matcher.match_line(&a).records[0].tier,
        matcher.match_line(&b).records[0].tier
    );
}

#[test]
fn token_sort_scorer_resolves_reordered_names() {
    let registry = vec![entry("acetylsalicylic acid", "Aspirin", "500 mg", 1.0, 1.0)];
    let config = MatchConfig {
        scorer: Scorer::TokenSortRatio,
        ..MatchConfig::default()
    };
    let matcher = Matcher::new(&registry, config);

    let line = matcher.prepare(&PurchaseRow::new("Acid acetylsalicylic 500mg", 1));
    assert_eq!(line.resolved_identity, "acetylsalicylic acid");

    let result = matcher.match_line(&line);
    assert_eq!(result.records[0].tier, MatchTier::Exact);
}

#[test]
fn partial_identity_score_is_the_identity_score() {
    let registry = vec![
        entry("paracetamol", "Panadol", "500 mg", 1.0, 1.5),
        entry("paracetamol", "Efferalgan", "1 g", 2.0, 1.5),
    ];
    let matcher = Matcher::new(&registry, MatchConfig::default());

    // Misspelled identity plus a dosage the registry does not carry.
    let line = matcher.prepare(&PurchaseRow::new("Paracetamoll 75 мкг", 1));
    let result = matcher.match_line(&line);

    for record in &result.records {
        assert_eq!(record.tier, MatchTier::PartialIdentity);
        assert_eq!(record.score, line.identity_score);
        assert_ne!(record.score, 100.0);
    }
}
