//! CAM02-UCS cylindrical coordinates (J', M', h)

use bytemuck::{Pod, Zeroable};

use crate::color::Jab;

/// Lightness, colorfulness and hue angle
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Jmh {
    /// Lightness J'
    pub j: f64,
    /// Compressed colorfulness M'
    pub m: f64,
    /// Hue angle in degrees
    pub h: f64,
}

impl Jmh {
    #[inline]
    pub const fn new(j: f64, m: f64, h: f64) -> Self {
        Self { j, m, h }
    }

    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            j: arr[0],
            m: arr[1],
            h: arr[2],
        }
    }

    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.j, self.m, self.h]
    }

    /// Rectangular view of this color. Any hue angle is accepted.
    #[inline]
    pub fn to_jab(&self) -> Jab {
        let h = self.h.to_radians();
        Jab::new(self.j, self.m * h.cos(), self.m * h.sin())
    }

    /// Compare with hue taken modulo 360
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let dh = (self.h - other.h).rem_euclid(360.0);
        (self.j - other.j).abs() < epsilon
            && (self.m - other.m).abs() < epsilon
            && dh.min(360.0 - dh) < epsilon
    }
}

impl From<[f64; 3]> for Jmh {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

/// Convert cylindrical JMh to rectangular Jab
#[inline]
pub fn jmh_to_jab(jmh: Jmh) -> Jab {
    jmh.to_jab()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::jab_to_jmh;

    #[test]
    fn test_to_jab() {
        let jab = jmh_to_jab(Jmh::new(50.0, 10.0, 90.0));
        assert_eq!(jab.j, 50.0);
        assert!(jab.a.abs() < 1e-12);
        assert!((jab.b - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip_wraps_hue() {
        for &h in &[0.0, 45.0, 179.9, 180.0, 270.5, 359.99, 400.0, -30.0] {
            let jmh = Jmh::new(62.0, 23.5, h);
            let back = jab_to_jmh(jmh_to_jab(jmh));
            assert!(back.approx_eq(&jmh, 1e-9), "h={} → {:?}", h, back);
            assert!(back.h >= 0.0 && back.h < 360.0);
        }
    }

    #[test]
    fn test_jab_roundtrip() {
        let jab = Jab::new(33.0, -12.25, 8.0);
        let back = jmh_to_jab(jab_to_jmh(jab));
        assert!(back.approx_eq(&jab, 1e-9));
    }

    #[test]
    fn test_approx_eq_across_zero() {
        assert!(Jmh::new(1.0, 1.0, 359.9999999999).approx_eq(&Jmh::new(1.0, 1.0, 0.0), 1e-9));
    }
}
