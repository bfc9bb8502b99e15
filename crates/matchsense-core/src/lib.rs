//! MatchSense Core Library
//!
//! Reconciles free-text purchase line items against a canonical registry
//! of pharmaceutical products, producing tiered candidate matches and
//! price-variance metrics.
//!
//! # Pipeline
//!
//! ```text
//! raw registry rows ──► Normalizer + Dosage Extractor ──► canonical registry
//!                                                              │ (immutable)
//! raw purchase rows ──► Normalizer + Dosage Extractor          │
//!                       + Identity Resolver ──► purchase lines │
//!                                                    │         │
//!                                         ┌──────────▼─────────▼─────────┐
//!                                         │     Match Cascade Engine     │
//!                                         │ unknown → exact → fuzzy      │
//!                                         │ dosage → partial → not found │
//!                                         └──────────────┬───────────────┘
//!                                                        │ match records
//!                                              Price Metrics + Assembler
//!                                                        │
//!                                                 flat result table
//! ```
//!
//! # Guarantees
//!
//! - Every purchase line maps to at least one match record.
//! - The registry is an immutable snapshot; per-line matching is
//!   independent, so results never depend on batch order.
//! - The core is total downstream of a well-formed table: malformed
//!   values coerce to zero, resolution misses become NotFound records.
//!
//! # Modules
//!
//! - [`models`]: domain types (RegisterEntry, PurchaseLine, MatchRecord)
//! - [`normalize`]: free-text canonicalizer
//! - [`dosage`]: dosage signature extraction
//! - [`resolver`]: fuzzy identity resolution
//! - [`cascade`]: the tiered matching engine
//! - [`pricing`]: price delta and potential saving
//! - [`numeric`]: lenient numeric coercion
//! - [`assemble`]: flat output table assembly

pub mod assemble;
pub mod cascade;
pub mod dosage;
pub mod models;
pub mod normalize;
pub mod numeric;
pub mod pricing;
pub mod resolver;

// Re-export commonly used types
pub use assemble::{flatten, ResultRow};
pub use cascade::{MatchConfig, Matcher};
pub use models::{
    MatchRecord, MatchResult, MatchTier, PurchaseLine, PurchaseRow, RegisterEntry,
};
pub use resolver::{IdentityCatalog, Scorer};
