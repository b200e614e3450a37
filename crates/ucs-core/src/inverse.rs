//! Numerical inverse of the forward transform
//!
//! There is no closed form for CAM02-UCS → RGB. The solver minimizes the
//! squared Jab distance between the forward image of a candidate RGB and
//! the target with L-BFGS, taking exact gradients from the dual-number
//! evaluation of the forward pipeline.
//!
//! Every solve starts from mid-gray. This keeps results deterministic; a
//! target far from gray can occasionally land in a poor local minimum.
//! Nothing checks the residual: callers that need a guarantee compare
//! `srgb_to_ucs(result)` with the target themselves.
//!
//! The unbounded solver may return channels outside [0, 1], which signals
//! an out-of-gamut target. The bounded solver searches the unit cube only.
//!
//! Below the gamma floor the forward transform is constant, so a channel
//! that lands at or under zero has no gradient to bring it back. Every
//! iteration therefore moves each channel by at most [`MAX_STEP`].

use tracing::{debug, trace};

use crate::cam02::UcsTransform;
use crate::color::{Jab, Rgb};
use crate::conditions::ViewingConditions;
use crate::math::{Bounds, Dual3, LbfgsOptions, Real, Termination, lbfgs};

/// Starting point of every solve
pub const SEED: Rgb = Rgb::MID_GRAY;

/// Largest change of any channel in one solver iteration
pub const MAX_STEP: f64 = 0.05;

/// Outcome of one inversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inversion {
    pub rgb: Rgb,
    /// Squared Jab distance at `rgb`
    pub loss: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub termination: Termination,
}

impl Inversion {
    /// Jab distance between the forward image of `rgb` and the target
    pub fn residual(&self) -> f64 {
        self.loss.sqrt()
    }
}

/// Inverse solver bound to one set of viewing conditions
#[derive(Debug, Clone, Copy)]
pub struct InverseSolver {
    transform: UcsTransform,
    options: LbfgsOptions,
}

impl InverseSolver {
    pub fn new(conditions: &ViewingConditions) -> Self {
        Self {
            transform: UcsTransform::new(conditions),
            options: LbfgsOptions {
                max_step: MAX_STEP,
                ..LbfgsOptions::default()
            },
        }
    }

    /// Override the optimizer stopping criteria
    pub fn with_options(mut self, options: LbfgsOptions) -> Self {
        self.options = options;
        self
    }

    /// Squared distance to `target` and its gradient at `x`
    fn loss(&self, x: &[f64; 3], target: &[f64; 3]) -> (f64, [f64; 3]) {
        let out = self.transform.eval(Dual3::seed(*x));
        let mut loss = Dual3::constant(0.0);
        for (o, t) in out.iter().zip(target) {
            let d = *o - *t;
            loss = loss + d * d;
        }
        (loss.v, loss.d)
    }

    /// Find an RGB whose forward image is closest to `target`
    pub fn solve(&self, target: Jab, bounded: bool) -> Inversion {
        let target_arr = target.to_array();
        let unit = Bounds::unit();
        let bounds = bounded.then_some(&unit);

        let min = lbfgs(
            |x| self.loss(x, &target_arr),
            SEED.to_array(),
            bounds,
            &self.options,
        );

        match min.termination {
            Termination::IterationLimit
            | Termination::EvaluationLimit
            | Termination::LineSearchFailed => {
                debug!(
                    j = target.j,
                    a = target.a,
                    b = target.b,
                    loss = min.f,
                    termination = ?min.termination,
                    "Inversion stopped before converging"
                );
            }
            _ => {}
        }
        trace!(
            bounded,
            loss = min.f,
            iterations = min.iterations,
            evaluations = min.evaluations,
            termination = ?min.termination,
            "ucs_to_srgb"
        );

        Inversion {
            rgb: Rgb::from_array(min.x),
            loss: min.f,
            iterations: min.iterations,
            evaluations: min.evaluations,
            termination: min.termination,
        }
    }
}

/// Loss and gradient the inverse solver minimizes: the squared Jab
/// distance between `srgb_to_ucs(rgb)` and `target`, and its gradient with
/// respect to the RGB channels
pub fn inversion_loss(rgb: Rgb, target: Jab, conditions: &ViewingConditions) -> (f64, [f64; 3]) {
    InverseSolver::new(conditions).loss(&rgb.to_array(), &target.to_array())
}

/// Invert one color, bounded to the unit cube or not
pub fn invert(target: Jab, conditions: &ViewingConditions, bounded: bool) -> Inversion {
    InverseSolver::new(conditions).solve(target, bounded)
}

/// Approximate RGB for a Jab color; may fall outside [0, 1]
pub fn ucs_to_srgb(target: Jab, conditions: &ViewingConditions) -> Rgb {
    invert(target, conditions, false).rgb
}

/// Approximate RGB for a Jab color within the sRGB gamut
pub fn ucs_to_srgb_b(target: Jab, conditions: &ViewingConditions) -> Rgb {
    invert(target, conditions, true).rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cam02::srgb_to_ucs;
    use crate::color::delta_e;

    #[test]
    fn test_loss_zero_at_exact_match() {
        let vc = ViewingConditions::default();
        let rgb = Rgb::new(0.3, 0.6, 0.45);
        let (loss, _) = inversion_loss(rgb, srgb_to_ucs(rgb, &vc), &vc);
        assert!(loss < 1e-20, "loss = {}", loss);
    }

    #[test]
    fn test_loss_gradient_matches_finite_difference() {
        let vc = ViewingConditions::default();
        let target = Jab::new(40.0, 10.0, -5.0);
        let x = Rgb::new(0.4, 0.5, 0.6);
        let (_, g) = inversion_loss(x, target, &vc);
        let h = 1e-6;
        for i in 0..3 {
            let mut hi = x.to_array();
            let mut lo = x.to_array();
            hi[i] += h;
            lo[i] -= h;
            let numeric = (inversion_loss(hi.into(), target, &vc).0
                - inversion_loss(lo.into(), target, &vc).0)
                / (2.0 * h);
            assert!(
                (g[i] - numeric).abs() < 1e-4 * (1.0 + numeric.abs()),
                "channel {}: {} vs {}",
                i,
                g[i],
                numeric
            );
        }
    }

    #[test]
    fn test_recovers_in_gamut_color() {
        let vc = ViewingConditions::default();
        let rgb = Rgb::new(0.3, 0.6, 0.45);
        let target = srgb_to_ucs(rgb, &vc);
        for bounded in [false, true] {
            let inv = invert(target, &vc, bounded);
            let back = srgb_to_ucs(inv.rgb, &vc);
            assert!(
                delta_e(back, target) < 1e-2,
                "bounded={} residual {} after {:?}",
                bounded,
                delta_e(back, target),
                inv.termination
            );
            assert!((inv.residual() - delta_e(back, target)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_out_of_gamut_target() {
        let vc = ViewingConditions::default();
        // Brighter than the display white: only reachable with channels > 1
        let target = srgb_to_ucs(Rgb::gray(1.2), &vc);

        let unbounded = ucs_to_srgb(target, &vc);
        assert!(!unbounded.is_in_gamut(), "{:?}", unbounded);

        let bounded = ucs_to_srgb_b(target, &vc);
        assert!(bounded.is_in_gamut(), "{:?}", bounded);
        assert!(bounded.approx_eq(&Rgb::WHITE, 1e-2), "{:?}", bounded);
    }

    #[test]
    fn test_dark_and_edge_targets_converge() {
        // Long steps used to strand one channel at zero for these
        let vc = ViewingConditions::default();
        let colors = [
            Rgb::new(0.125, 0.065, 0.063),
            Rgb::new(0.4, 0.0, 0.2),
            Rgb::new(0.8, 0.4, 0.8),
            Rgb::new(0.2, 0.4, 0.6),
        ];
        for rgb in colors {
            let target = srgb_to_ucs(rgb, &vc);
            for bounded in [false, true] {
                let inv = invert(target, &vc, bounded);
                assert!(
                    inv.residual() < 1e-2,
                    "{:?} bounded={}: {:?} residual {} after {:?}",
                    rgb,
                    bounded,
                    inv.rgb,
                    inv.residual(),
                    inv.termination
                );
            }
        }
    }

    #[test]
    fn test_solver_respects_step_cap() {
        let vc = ViewingConditions::default();
        let target = srgb_to_ucs(Rgb::new(0.1, 0.9, 0.2), &vc);
        let solver = InverseSolver::new(&vc).with_options(LbfgsOptions {
            max_iterations: 1,
            max_step: MAX_STEP,
            ..LbfgsOptions::default()
        });
        let inv = solver.solve(target, false);
        assert_eq!(inv.iterations, 1);
        for (c, s) in inv.rgb.to_array().iter().zip(SEED.to_array()) {
            assert!((c - s).abs() <= MAX_STEP + 1e-12, "{:?}", inv.rgb);
        }
    }

    #[test]
    fn test_exact_seed() {
        let vc = ViewingConditions::default();
        let inv = invert(srgb_to_ucs(SEED, &vc), &vc, false);
        assert_eq!(inv.iterations, 0);
        assert_eq!(inv.rgb, SEED);
        assert!(inv.termination.converged());
    }
}
