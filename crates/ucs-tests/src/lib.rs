//! # ucs-tests
//!
//! Accuracy and property testing for ucs-core.
//!
//! This crate provides:
//! - Deterministic color patterns (grids, ramps, seeded random samples)
//! - Jab-distance statistics for inversion accuracy
//! - Golden forward-transform values
//!
//! The integration tests under `tests/` exercise the public API only.

pub mod accuracy;
pub mod patterns;
pub mod reference;

pub use accuracy::{DeltaStats, inversion_stats};
pub use patterns::{TestPattern, generate_pattern};
pub use reference::{GOLDEN, GoldenCase, HUE_COMPOSITION_GOLDEN};
