//! Deterministic bucketing: seed hashing and weighted selection.
//!
//! A visitor is bucketed by hashing `"{experiment}.{anonymous_id}"` into a
//! fraction and walking the cumulative weights until that fraction's share of
//! the total is used up. Nothing here touches storage.

pub mod hashing;
pub mod weighting;

pub use hashing::{seed, seeded_fraction, FRACTION_BITS, FRACTION_DENOMINATOR};
pub use weighting::select_index;
