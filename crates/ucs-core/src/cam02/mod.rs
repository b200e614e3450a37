//! CIECAM02 / CAM02-UCS forward transform
//!
//! Display RGB → XYZ → CAT02 cone space → von Kries adaptation →
//! Hunt-Pointer-Estevez space → post-adaptation compression → opponent
//! axes, lightness, colorfulness → CAM02-UCS (J', a', b').
//!
//! References:
//! - CIE 159:2004, A colour appearance model for colour management systems
//! - Luo, Cui & Li (2006), Uniform colour spaces based on CIECAM02 colour
//!   appearance model

pub mod forward;
pub mod kernel;

pub use forward::{C1, C2, K_L, UcsTransform, srgb_to_ucs, srgb_to_ucs_jacobian};
pub use kernel::{Kernel, kernel};
