//! # ucs-core - CIECAM02 / CAM02-UCS color appearance
//!
//! A forward transform from display RGB to the CAM02-UCS uniform color
//! space of Luo, Cui & Li (2006), plus its numerical inverse.
//!
//! ## Features
//!
//! - **Forward**: gamma-2.2 RGB → XYZ → CIECAM02 → CAM02-UCS (J', a', b')
//! - **Differentiable**: exact Jacobians by forward-mode automatic
//!   differentiation
//! - **Inverse**: L-BFGS search for the RGB matching a Jab target,
//!   unbounded or limited to the sRGB gamut
//! - **Hue composition**: hue angle h ↔ hue quadrature H
//! - **Batch**: slice, interleaved and 8-bit buffers, parallel with `rayon`
//!
//! ## Quick Start
//!
//! ```
//! use ucs_core::{Rgb, ViewingConditions, delta_e, srgb_to_ucs, ucs_to_srgb_b};
//!
//! let vc = ViewingConditions::default();
//! let orange = srgb_to_ucs(Rgb::new(1.0, 0.5, 0.0), &vc);
//! let red = srgb_to_ucs(Rgb::RED, &vc);
//! assert!(delta_e(orange, red) > 0.0);
//!
//! let back = ucs_to_srgb_b(orange, &vc);
//! assert!(back.is_in_gamut());
//! ```

pub mod batch;
pub mod cam02;
pub mod color;
pub mod conditions;
pub mod error;
pub mod hue;
pub mod inverse;
pub mod math;

pub use batch::{
    jab_to_jmh_batch, jmh_to_jab_batch, srgb8_to_ucs, srgb_to_ucs_batch, srgb_to_ucs_interleaved,
    srgb_to_ucs_into, ucs_to_srgb_batch,
};
pub use cam02::{UcsTransform, srgb_to_ucs, srgb_to_ucs_jacobian};
pub use color::{Jab, Jmh, Rgb, Xyz, delta_e, jab_to_jmh, jmh_to_jab, srgb_to_xyz};
pub use conditions::{Adaptation, Surround, SurroundCoefficients, ViewingConditions};
pub use error::{Error, Result};
pub use hue::{
    HUE_LANDMARKS, HueLandmark, UniqueHue, composition_to_hue, composition_to_hue_batch,
    hue_to_composition, hue_to_composition_batch,
};
pub use inverse::{InverseSolver, Inversion, invert, inversion_loss, ucs_to_srgb, ucs_to_srgb_b};

/// Version of ucs-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
