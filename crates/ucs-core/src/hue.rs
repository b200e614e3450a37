//! Hue composition (hue quadrature)
//!
//! CIECAM02 expresses hue both as an angle h in degrees and as a
//! composition H on a 0-400 scale anchored at the four unique hues:
//! red = 0, yellow = 100, green = 200, blue = 300, red again = 400.
//! Between two anchors H is interpolated in angle divided by each anchor's
//! eccentricity factor.
//!
//! The inverse has no closed form and is found by a scalar search.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::math::{ScalarOptions, minimize_scalar};

/// A unique hue anchoring the composition scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueLandmark {
    /// Hue angle h in degrees
    pub h: f64,
    /// Eccentricity factor e
    pub e: f64,
    /// Hue composition H at this angle
    pub composition: f64,
}

impl HueLandmark {
    const fn new(h: f64, e: f64, composition: f64) -> Self {
        Self { h, e, composition }
    }
}

/// The four psychological primaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueHue {
    Red,
    Yellow,
    Green,
    Blue,
}

impl UniqueHue {
    pub const ALL: [Self; 4] = [Self::Red, Self::Yellow, Self::Green, Self::Blue];

    /// Landmark for this hue
    pub const fn landmark(&self) -> HueLandmark {
        HUE_LANDMARKS[*self as usize]
    }

    /// Hue angle in degrees
    pub const fn angle(&self) -> f64 {
        self.landmark().h
    }
}

/// Unique hue table, with red repeated one turn later to close the circle
pub const HUE_LANDMARKS: [HueLandmark; 5] = [
    HueLandmark::new(20.14, 0.8, 0.0),
    HueLandmark::new(90.0, 0.7, 100.0),
    HueLandmark::new(164.25, 1.0, 200.0),
    HueLandmark::new(237.53, 1.2, 300.0),
    HueLandmark::new(380.14, 0.8, 400.0),
];

/// Hue angle h (degrees, any value) → hue composition H in [0, 400)
pub fn hue_to_composition(h: f64) -> f64 {
    let mut h = h.rem_euclid(360.0);
    if h < HUE_LANDMARKS[0].h {
        h += 360.0;
    }

    let i = (0..4).find(|&i| h < HUE_LANDMARKS[i + 1].h).unwrap_or(3);
    let (lo, hi) = (HUE_LANDMARKS[i], HUE_LANDMARKS[i + 1]);

    let left = (h - lo.h) / lo.e;
    let right = (hi.h - h) / hi.e;
    lo.composition + 100.0 * left / (left + right)
}

/// Hue composition H → hue angle h in [0, 360)
///
/// Searches from the angle proportional to `H mod 400` for the h whose
/// composition is closest to `composition`.
pub fn composition_to_hue(composition: f64) -> f64 {
    let x0 = composition.rem_euclid(400.0) * 360.0 / 400.0;
    let min = minimize_scalar(
        |x| (hue_to_composition(x) - composition).abs(),
        x0,
        &ScalarOptions::default(),
    );
    trace!(
        composition,
        h = min.x,
        error = min.f,
        evaluations = min.evaluations,
        "composition_to_hue"
    );
    min.x.rem_euclid(360.0)
}

/// [`hue_to_composition`] over a slice
pub fn hue_to_composition_batch(hues: &[f64]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        hues.par_iter().map(|&h| hue_to_composition(h)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        hues.iter().map(|&h| hue_to_composition(h)).collect()
    }
}

/// [`composition_to_hue`] over a slice; each element is solved independently
pub fn composition_to_hue_batch(compositions: &[f64]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        compositions.par_iter().map(|&c| composition_to_hue(c)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        compositions.iter().map(|&c| composition_to_hue(c)).collect()
    }
}
