//! Mathematical building blocks for the appearance model
//!
//! This module provides:
//! - 3x3 matrix operations and the model's fixed matrices
//! - The gamma-2.2 display decode
//! - CAT02 chromatic adaptation
//! - Forward-mode automatic differentiation (`Real`, `Dual3`)
//! - Local minimizers (L-BFGS, scalar golden-section search)

pub mod chromatic_adaptation;
pub mod dual;
pub mod gamma;
pub mod matrix;
pub mod optimize;

pub use chromatic_adaptation::{FULL_DISCOUNT, adapt, degree_of_adaptation, von_kries_gains};
pub use dual::{Dual3, Real};
pub use gamma::{EPS, GAMMA, gamma_decode};
pub use matrix::{CAT02, HPE_PUBLISHED, Matrix3x3, SRGB_TO_XYZ, hpe};
pub use optimize::{
    Bounds, LbfgsOptions, Minimum, ScalarMinimum, ScalarOptions, Termination, lbfgs,
    minimize_scalar,
};
