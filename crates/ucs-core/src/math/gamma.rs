//! Display transfer function
//!
//! CAM02-UCS reference inputs are display-referred sRGB treated as a pure
//! 2.2 power law, not the piecewise IEC 61966-2-1 curve.

use crate::math::dual::Real;

/// Display gamma exponent
pub const GAMMA: f64 = 2.2;

/// Floor applied before the fractional power
///
/// Zero and negative channels would otherwise give NaN (negative base) or
/// an infinite derivative (zero base).
pub const EPS: f64 = f64::EPSILON;

/// Gamma decode (encoded → linear)
///
/// `max(EPS, encoded)^2.2`. Channels at or below the floor decode to a
/// constant with zero derivative.
#[inline]
pub fn gamma_decode<T: Real>(encoded: T) -> T {
    encoded.max_const(EPS).powf(GAMMA)
}
