//! CIE XYZ Color Space
//!
//! Linear tristimulus values. `srgb_to_xyz` returns them relative to a
//! white of Y = 1; the appearance model rescales by the white luminance.

use bytemuck::{Pod, Zeroable};

use crate::color::Rgb;
use crate::math::{SRGB_TO_XYZ, gamma_decode};

/// CIE 1931 XYZ color coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Xyz {
    /// X tristimulus value
    pub x: f64,
    /// Y tristimulus value (luminance)
    pub y: f64,
    /// Z tristimulus value
    pub z: f64,
}

impl Xyz {
    /// Create a new XYZ color
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create XYZ from an array
    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Get the luminance (Y component)
    #[inline]
    pub const fn luminance(&self) -> f64 {
        self.y
    }

    /// Gamma-decode display RGB and convert to XYZ
    pub fn from_srgb(rgb: Rgb) -> Self {
        let linear = rgb.to_array().map(gamma_decode::<f64>);
        Self::from_array(SRGB_TO_XYZ.multiply_vec(linear))
    }

    /// Check if approximately equal to another XYZ color
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl From<[f64; 3]> for Xyz {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Xyz> for [f64; 3] {
    fn from(xyz: Xyz) -> Self {
        xyz.to_array()
    }
}

/// Gamma-decode (power 2.2, floored at machine epsilon) and convert to XYZ
#[inline]
pub fn srgb_to_xyz(rgb: Rgb) -> Xyz {
    Xyz::from_srgb(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_conversion() {
        let arr = [0.1, 0.2, 0.3];
        let xyz = Xyz::from_array(arr);
        assert_eq!(xyz.to_array(), arr);

        let xyz2: Xyz = arr.into();
        assert_eq!(xyz, xyz2);
    }

    #[test]
    fn test_white() {
        let white = srgb_to_xyz(Rgb::WHITE);
        assert!(white.approx_eq(&Xyz::new(0.9505, 1.0, 1.089), 1e-9));
        assert!((white.luminance() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_black_is_floored_not_zero() {
        let black = srgb_to_xyz(Rgb::BLACK);
        assert!(black.y > 0.0);
        assert!(black.y < 1e-30);
    }

    #[test]
    fn test_negative_input_is_finite() {
        let xyz = srgb_to_xyz(Rgb::new(-0.2, 0.5, -1.0));
        assert!(xyz.x.is_finite() && xyz.y.is_finite() && xyz.z.is_finite());
        assert!(xyz.approx_eq(&srgb_to_xyz(Rgb::new(0.0, 0.5, 0.0)), 1e-15));
    }

    #[test]
    fn test_gray_luminance() {
        let gray = srgb_to_xyz(Rgb::gray(0.5));
        assert!((gray.y - 0.5f64.powf(2.2)).abs() < 1e-12);
    }
}
