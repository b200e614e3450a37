//! CAM02-UCS rectangular coordinates (J', a', b')
//!
//! The uniform color space of Luo, Cui & Li (2006). Euclidean distance in
//! Jab approximates perceived color difference.

use bytemuck::{Pod, Zeroable};

use crate::color::Jmh;

/// CAM02-UCS color coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Jab {
    /// Lightness J' (0 = black, 100 = reference white)
    pub j: f64,
    /// Red-green opponent axis a'
    pub a: f64,
    /// Yellow-blue opponent axis b'
    pub b: f64,
}

impl Jab {
    /// Create a new Jab color
    #[inline]
    pub const fn new(j: f64, a: f64, b: f64) -> Self {
        Self { j, a, b }
    }

    /// Create Jab from an array
    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            j: arr[0],
            a: arr[1],
            b: arr[2],
        }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.j, self.a, self.b]
    }

    /// Compressed colorfulness M' = √(a'² + b'²)
    #[inline]
    pub fn colorfulness(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Hue angle in degrees, [0, 360)
    #[inline]
    pub fn hue_degrees(&self) -> f64 {
        let h = self.b.atan2(self.a).to_degrees().rem_euclid(360.0);
        // Tiny negative angles round up to exactly 360
        if h >= 360.0 { 0.0 } else { h }
    }

    /// Cylindrical view of this color
    #[inline]
    pub fn to_jmh(&self) -> Jmh {
        Jmh::new(self.j, self.colorfulness(), self.hue_degrees())
    }

    /// Euclidean distance to another color
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        delta_e(*self, *other)
    }

    /// Check if approximately equal to another Jab color
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.j - other.j).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
    }
}

impl From<[f64; 3]> for Jab {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Jab> for [f64; 3] {
    fn from(jab: Jab) -> Self {
        jab.to_array()
    }
}

/// Color difference: Euclidean distance between two Jab colors
#[inline]
pub fn delta_e(jab1: Jab, jab2: Jab) -> f64 {
    let dj = jab1.j - jab2.j;
    let da = jab1.a - jab2.a;
    let db = jab1.b - jab2.b;
    (dj * dj + da * da + db * db).sqrt()
}

/// Convert rectangular Jab to cylindrical JMh
#[inline]
pub fn jab_to_jmh(jab: Jab) -> Jmh {
    jab.to_jmh()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_delta_e_identical() {
        let jab = Jab::new(50.0, 12.0, -7.5);
        assert_eq!(delta_e(jab, jab), 0.0);
    }

    #[test]
    fn test_delta_e_symmetric() {
        let x = Jab::new(50.0, 12.0, -7.5);
        let y = Jab::new(61.0, -3.0, 4.0);
        assert_eq!(delta_e(x, y), delta_e(y, x));
        assert!(delta_e(x, y) > 0.0);
    }

    #[test]
    fn test_delta_e_pythagorean() {
        let x = Jab::new(0.0, 0.0, 0.0);
        let y = Jab::new(2.0, 3.0, 6.0);
        assert!((delta_e(x, y) - 7.0).abs() < EPSILON);
        assert!((x.distance(&y) - 7.0).abs() < EPSILON);
    }

    #[test]
    fn test_to_jmh() {
        let jmh = jab_to_jmh(Jab::new(40.0, 3.0, 4.0));
        assert_eq!(jmh.j, 40.0);
        assert!((jmh.m - 5.0).abs() < EPSILON);
        assert!((jmh.h - 4.0f64.atan2(3.0).to_degrees()).abs() < EPSILON);
    }

    #[test]
    fn test_hue_in_range() {
        let jmh = Jab::new(40.0, 0.0, -1.0).to_jmh();
        assert!((jmh.h - 270.0).abs() < EPSILON);
        let jmh = Jab::new(40.0, -1.0, -1e-300).to_jmh();
        assert!(jmh.h >= 0.0 && jmh.h < 360.0);
    }

    #[test]
    fn test_hue_just_below_zero_wraps_to_zero() {
        for b in [-1e-20, -1e-17, -0.0] {
            let h = jab_to_jmh(Jab::new(40.0, 1.0, b)).h;
            assert!((0.0..360.0).contains(&h), "b={}: h={}", b, h);
            assert!(h < 1e-9 || h > 359.999, "b={}: h={}", b, h);
        }
    }
}
