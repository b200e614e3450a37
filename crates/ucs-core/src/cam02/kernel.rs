//! Process-wide matrix kernel
//!
//! The products of the model's fixed matrices are computed on first use and
//! shared read-only afterwards.

use std::sync::OnceLock;

use tracing::debug;

use crate::math::{CAT02, Matrix3x3, hpe};

static KERNEL: OnceLock<Kernel> = OnceLock::new();

/// Matrices derived from the model constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    /// CAT02 cone space → HPE cone space (`HPE × CAT02⁻¹`)
    pub cat02_to_hpe: Matrix3x3,
}

impl Kernel {
    fn build() -> Self {
        let cat02_inverse = CAT02.inverse().expect("CAT02 matrix is non-singular");
        let hpe = hpe();
        debug!(hpe_row_sum = hpe.row_sum(0), "Built CAM02-UCS forward kernel");
        Self {
            cat02_to_hpe: hpe.multiply(&cat02_inverse),
        }
    }
}

/// The shared kernel, built on first call
pub fn kernel() -> &'static Kernel {
    KERNEL.get_or_init(Kernel::build)
}
