//! CAT02 chromatic adaptation
//!
//! CIECAM02 adapts in the sharpened CAT02 cone space with a von Kries
//! style per-channel gain. The gain depends on the degree of adaptation D:
//! D = 1 discounts the illuminant completely, D = 0 not at all.
//!
//! References:
//! - CIE 159:2004, A colour appearance model for colour management systems
//! - Luo, Cui & Li (2006), Uniform colour spaces based on CIECAM02

use crate::math::dual::Real;

/// Degree of adaptation used unless partial adaptation is requested
pub const FULL_DISCOUNT: f64 = 1.0;

/// CIECAM02 degree of adaptation D for surround factor `f` and adapting
/// luminance `l_a` (cd/m²)
///
/// D = F · (1 − (1/3.6) · e^((−L_A − 42) / 92)), clamped to [0, 1].
pub fn degree_of_adaptation(f: f64, l_a: f64) -> f64 {
    (f * (1.0 - (1.0 / 3.6) * ((-l_a - 42.0) / 92.0).exp())).clamp(0.0, 1.0)
}

/// Per-channel von Kries gains D_rgb = D · Y_w / RGB_w + (1 − D)
///
/// `rgb_w` is the reference white in CAT02 space. Its components must be
/// positive; that holds for every white with positive luminance.
#[inline]
pub fn von_kries_gains(d: f64, y_w: f64, rgb_w: [f64; 3]) -> [f64; 3] {
    [
        d * y_w / rgb_w[0] + 1.0 - d,
        d * y_w / rgb_w[1] + 1.0 - d,
        d * y_w / rgb_w[2] + 1.0 - d,
    ]
}

/// Apply the adaptation gains to a CAT02 cone response
#[inline]
pub fn adapt<T: Real>(rgb: [T; 3], gains: [f64; 3]) -> [T; 3] {
    [rgb[0] * gains[0], rgb[1] * gains[1], rgb[2] * gains[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::{CAT02, SRGB_TO_XYZ};

    const EPSILON: f64 = 1e-12;

    fn white(y_w: f64) -> [f64; 3] {
        let xyz = SRGB_TO_XYZ.multiply_vec([y_w, y_w, y_w]);
        CAT02.multiply_vec(xyz)
    }

    #[test]
    fn test_full_discount_maps_white_to_y_w() {
        let rgb_w = white(100.0);
        let gains = von_kries_gains(FULL_DISCOUNT, 100.0, rgb_w);
        let adapted = adapt(rgb_w, gains);
        for c in adapted {
            assert!((c - 100.0).abs() < 1e-9, "adapted white channel {}", c);
        }
    }

    #[test]
    fn test_no_discount_is_identity() {
        let gains = von_kries_gains(0.0, 100.0, white(100.0));
        assert_eq!(gains, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_degree_of_adaptation() {
        // Average surround, L_A = 20: 1 - e^(-62/92)/3.6
        let d = degree_of_adaptation(1.0, 20.0);
        let expected = 1.0 - (1.0 / 3.6) * (-62.0f64 / 92.0).exp();
        assert!((d - expected).abs() < EPSILON);
        assert!(d > 0.85 && d < 0.87);

        // Dark surround adapts less
        assert!(degree_of_adaptation(0.8, 20.0) < d);
    }

    #[test]
    fn test_degree_of_adaptation_is_clamped() {
        assert_eq!(degree_of_adaptation(2.0, 1e6), 1.0);
        assert_eq!(degree_of_adaptation(-1.0, 20.0), 0.0);
    }
}
