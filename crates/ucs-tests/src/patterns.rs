//! Test pattern generation
//!
//! Deterministic RGB samples for property tests.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use ucs_core::Rgb;

/// Test pattern types
#[derive(Debug, Clone, Copy)]
pub enum TestPattern {
    /// Neutral ramp from black to white
    Grayscale,
    /// RGB color cube corners (8 colors)
    ColorCube,
    /// Regular n×n×n grid over the cube
    Grid(usize),
    /// Hue ramp at full saturation
    HueRamp,
    /// Uniform random colors with seed, kept away from the cube faces
    Random(u64),
}

/// Generate `count` colors of a pattern
///
/// `Grid(n)` and `ColorCube` ignore `count` and return the full grid.
pub fn generate_pattern(pattern: TestPattern, count: usize) -> Vec<Rgb> {
    match pattern {
        TestPattern::Grayscale => (0..count)
            .map(|i| Rgb::gray(i as f64 / (count.max(2) - 1) as f64))
            .collect(),
        TestPattern::ColorCube => generate_pattern(TestPattern::Grid(2), 0),
        TestPattern::Grid(n) => {
            let step = |i: usize| i as f64 / (n.max(2) - 1) as f64;
            let mut colors = Vec::with_capacity(n * n * n);
            for r in 0..n {
                for g in 0..n {
                    for b in 0..n {
                        colors.push(Rgb::new(step(r), step(g), step(b)));
                    }
                }
            }
            colors
        }
        TestPattern::HueRamp => (0..count)
            .map(|i| hsv_to_rgb(i as f64 * 360.0 / count as f64, 1.0, 1.0))
            .collect(),
        TestPattern::Random(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..count)
                .map(|_| {
                    Rgb::new(
                        rng.gen_range(0.05..0.95),
                        rng.gen_range(0.05..0.95),
                        rng.gen_range(0.05..0.95),
                    )
                })
                .collect()
        }
    }
}

/// Convert HSV (hue in degrees) to RGB
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let c = v * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    Rgb::new(r + m, g + m, b + m)
}
