//! 3x3 Matrix operations for the CIECAM02 pipeline
//!
//! The model moves colors between four linear spaces: gamma-decoded sRGB,
//! CIE XYZ, CAT02 sharpened cone space and Hunt-Pointer-Estevez cone space.
//! All operations use f64.

use crate::math::dual::Real;

/// A 3x3 matrix for color space transformations
///
/// Stored in row-major order: m[row][col], applied as `M × v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3 {
    /// Matrix elements in row-major order
    pub m: [[f64; 3]; 3],
}

impl Matrix3x3 {
    /// Create a new matrix from row-major elements
    #[inline]
    pub const fn new(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Create an identity matrix
    #[inline]
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Create a zero matrix
    #[inline]
    pub const fn zero() -> Self {
        Self {
            m: [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
        }
    }

    /// Multiply this matrix by a 3-element vector
    ///
    /// Returns M × v
    #[inline]
    pub fn multiply_vec(&self, v: [f64; 3]) -> [f64; 3] {
        self.apply(v)
    }

    /// Multiply this matrix by a vector of any [`Real`] scalar
    ///
    /// With [`Dual3`](crate::math::Dual3) components the derivatives are
    /// carried through the product.
    #[inline]
    pub fn apply<T: Real>(&self, v: [T; 3]) -> [T; 3] {
        [
            v[0] * self.m[0][0] + v[1] * self.m[0][1] + v[2] * self.m[0][2],
            v[0] * self.m[1][0] + v[1] * self.m[1][1] + v[2] * self.m[1][2],
            v[0] * self.m[2][0] + v[1] * self.m[2][1] + v[2] * self.m[2][2],
        ]
    }

    /// Multiply this matrix by another matrix
    ///
    /// Returns self × other
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        result
    }

    /// Calculate the determinant
    #[inline]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Calculate the inverse of this matrix
    ///
    /// Returns None if the matrix is singular (determinant ≈ 0)
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-14 {
            return None;
        }

        let inv_det = 1.0 / det;
        let m = &self.m;

        // Adjugate divided by determinant
        Some(Self {
            m: [
                [
                    (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                    (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                    (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
                ],
                [
                    (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                    (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                    (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
                ],
                [
                    (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                    (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                    (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
                ],
            ],
        })
    }

    /// Sum of the elements of one row
    #[inline]
    pub fn row_sum(&self, row: usize) -> f64 {
        self.m[row][0] + self.m[row][1] + self.m[row][2]
    }

    /// Copy of this matrix with `row` divided by its own sum
    pub fn with_unit_row_sum(&self, row: usize) -> Self {
        let mut out = *self;
        let sum = self.row_sum(row);
        for v in out.m[row].iter_mut() {
            *v /= sum;
        }
        out
    }

    /// Check if this matrix is approximately equal to another
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if (self.m[i][j] - other.m[i][j]).abs() > epsilon {
                    return false;
                }
            }
        }
        true
    }

    /// Check if this is approximately an identity matrix
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.approx_eq(&Self::identity(), epsilon)
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

// ============================================================================
// Model matrices
// ============================================================================

/// Gamma-decoded sRGB to XYZ (D65, Y of white = 1)
///
/// Four-decimal IEC 61966-2-1 values, as used by CAM02-UCS reference code.
pub const SRGB_TO_XYZ: Matrix3x3 = Matrix3x3::new([
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
]);

/// CIECAM02 chromatic adaptation transform: XYZ → sharpened cone space
pub const CAT02: Matrix3x3 = Matrix3x3::new([
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
]);

/// Hunt-Pointer-Estevez XYZ → cone fundamentals, as published
///
/// The first row sums to 1.00001; use [`hpe`] for the renormalized matrix
/// the model actually applies.
pub const HPE_PUBLISHED: Matrix3x3 = Matrix3x3::new([
    [0.38971, 0.68898, -0.07868],
    [-0.22981, 1.18340, 0.04641],
    [0.0, 0.0, 1.0],
]);

/// Hunt-Pointer-Estevez matrix with its first row rescaled to unit sum
///
/// Every row then sums to 1, so an equal-energy stimulus stays achromatic.
pub fn hpe() -> Matrix3x3 {
    HPE_PUBLISHED.with_unit_row_sum(0)
}
