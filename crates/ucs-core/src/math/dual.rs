//! Forward-mode automatic differentiation
//!
//! The CAM02-UCS pipeline is written once, generic over [`Real`]. Evaluated
//! with `f64` it produces plain values; evaluated with [`Dual3`] it carries
//! the partial derivatives with respect to the three input channels along
//! with every intermediate, which yields the full 3×3 Jacobian in a single
//! pass.
//!
//! Non-smooth points get a zero derivative instead of NaN: the floor of
//! [`Real::max_const`], `sqrt`/`powf` at exactly zero and `atan2` at the
//! origin. This is the sub-gradient convention the inverse solver relies on.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Scalar type the forward transform can be evaluated over
pub trait Real:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Lift a constant (zero derivative)
    fn constant(v: f64) -> Self;
    /// Primal value
    fn value(self) -> f64;

    fn powf(self, e: f64) -> Self;
    fn sqrt(self) -> Self;
    fn ln(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    /// Four-quadrant arctangent of `self / x`, in radians
    fn atan2(self, x: Self) -> Self;

    /// `max(floor, self)`; the floor branch is a constant
    fn max_const(self, floor: f64) -> Self;
}

impl Real for f64 {
    #[inline]
    fn constant(v: f64) -> Self {
        v
    }
    #[inline]
    fn value(self) -> f64 {
        self
    }
    #[inline]
    fn powf(self, e: f64) -> Self {
        f64::powf(self, e)
    }
    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }
    #[inline]
    fn sin(self) -> Self {
        f64::sin(self)
    }
    #[inline]
    fn cos(self) -> Self {
        f64::cos(self)
    }
    #[inline]
    fn atan2(self, x: Self) -> Self {
        f64::atan2(self, x)
    }
    #[inline]
    fn max_const(self, floor: f64) -> Self {
        f64::max(floor, self)
    }
}

/// A value with its gradient along three input directions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual3 {
    /// Primal value
    pub v: f64,
    /// Partial derivatives ∂v/∂x₀, ∂v/∂x₁, ∂v/∂x₂
    pub d: [f64; 3],
}

impl Dual3 {
    #[inline]
    pub const fn new(v: f64, d: [f64; 3]) -> Self {
        Self { v, d }
    }

    /// Seed the `index`-th independent variable
    #[inline]
    pub fn variable(v: f64, index: usize) -> Self {
        let mut d = [0.0; 3];
        d[index] = 1.0;
        Self { v, d }
    }

    /// Seed all three inputs of a color triple
    #[inline]
    pub fn seed(x: [f64; 3]) -> [Self; 3] {
        [
            Self::variable(x[0], 0),
            Self::variable(x[1], 1),
            Self::variable(x[2], 2),
        ]
    }

    /// Apply the chain rule with local derivative `dv`
    #[inline]
    fn chain(self, v: f64, dv: f64) -> Self {
        Self {
            v,
            d: [self.d[0] * dv, self.d[1] * dv, self.d[2] * dv],
        }
    }
}

impl Add for Dual3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            v: self.v + rhs.v,
            d: [
                self.d[0] + rhs.d[0],
                self.d[1] + rhs.d[1],
                self.d[2] + rhs.d[2],
            ],
        }
    }
}

impl Sub for Dual3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            v: self.v - rhs.v,
            d: [
                self.d[0] - rhs.d[0],
                self.d[1] - rhs.d[1],
                self.d[2] - rhs.d[2],
            ],
        }
    }
}

impl Mul for Dual3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            v: self.v * rhs.v,
            d: [
                self.d[0] * rhs.v + self.v * rhs.d[0],
                self.d[1] * rhs.v + self.v * rhs.d[1],
                self.d[2] * rhs.v + self.v * rhs.d[2],
            ],
        }
    }
}

impl Div for Dual3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        let inv = 1.0 / rhs.v;
        let q = self.v * inv;
        Self {
            v: self.v / rhs.v,
            d: [
                (self.d[0] - q * rhs.d[0]) * inv,
                (self.d[1] - q * rhs.d[1]) * inv,
                (self.d[2] - q * rhs.d[2]) * inv,
            ],
        }
    }
}

impl Neg for Dual3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            v: -self.v,
            d: [-self.d[0], -self.d[1], -self.d[2]],
        }
    }
}

impl Add<f64> for Dual3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self {
            v: self.v + rhs,
            d: self.d,
        }
    }
}

impl Sub<f64> for Dual3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: f64) -> Self {
        Self {
            v: self.v - rhs,
            d: self.d,
        }
    }
}

impl Mul<f64> for Dual3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.chain(self.v * rhs, rhs)
    }
}

impl Div<f64> for Dual3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        self.chain(self.v / rhs, 1.0 / rhs)
    }
}

impl Real for Dual3 {
    #[inline]
    fn constant(v: f64) -> Self {
        Self { v, d: [0.0; 3] }
    }

    #[inline]
    fn value(self) -> f64 {
        self.v
    }

    #[inline]
    fn powf(self, e: f64) -> Self {
        let v = self.v.powf(e);
        if self.v == 0.0 {
            return self.chain(v, 0.0);
        }
        self.chain(v, e * self.v.powf(e - 1.0))
    }

    #[inline]
    fn sqrt(self) -> Self {
        let v = self.v.sqrt();
        if v == 0.0 {
            return self.chain(v, 0.0);
        }
        self.chain(v, 0.5 / v)
    }

    #[inline]
    fn ln(self) -> Self {
        self.chain(self.v.ln(), 1.0 / self.v)
    }

    #[inline]
    fn sin(self) -> Self {
        self.chain(self.v.sin(), self.v.cos())
    }

    #[inline]
    fn cos(self) -> Self {
        self.chain(self.v.cos(), -self.v.sin())
    }

    #[inline]
    fn atan2(self, x: Self) -> Self {
        let y = self;
        let denom = x.v * x.v + y.v * y.v;
        let v = y.v.atan2(x.v);
        if denom == 0.0 {
            return Self::constant(v);
        }
        // d atan2(y, x) = (x dy - y dx) / (x² + y²)
        Self {
            v,
            d: [
                (x.v * y.d[0] - y.v * x.d[0]) / denom,
                (x.v * y.d[1] - y.v * x.d[1]) / denom,
                (x.v * y.d[2] - y.v * x.d[2]) / denom,
            ],
        }
    }

    #[inline]
    fn max_const(self, floor: f64) -> Self {
        if self.v >= floor {
            self
        } else {
            Self::constant(floor)
        }
    }
}
