//! Local minimizers for the inverse problems
//!
//! - [`lbfgs`]: limited-memory BFGS for small dense problems, optionally
//!   restricted to a box. Bounds are handled by freezing variables that sit
//!   on a bound with the gradient pointing outward and by shortening every
//!   step so it ends inside the box. Steps are accepted by a backtracking
//!   Armijo search. An optional cap limits how far any coordinate moves in
//!   one iteration.
//! - [`minimize_scalar`]: derivative-free 1-D search. Expands a downhill
//!   bracket from the starting point, then shrinks it by golden sections.
//!
//! Neither routine reports failure. The best point found is returned along
//! with the reason the search stopped.

use std::collections::VecDeque;

/// Box constraints `lower ≤ x ≤ upper`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const N: usize> {
    pub lower: [f64; N],
    pub upper: [f64; N],
}

impl<const N: usize> Bounds<N> {
    pub const fn new(lower: [f64; N], upper: [f64; N]) -> Self {
        Self { lower, upper }
    }

    /// The unit cube [0, 1]^N
    pub const fn unit() -> Self {
        Self::new([0.0; N], [1.0; N])
    }

    /// Clamp a point into the box
    #[inline]
    pub fn project(&self, mut x: [f64; N]) -> [f64; N] {
        for i in 0..N {
            x[i] = x[i].clamp(self.lower[i], self.upper[i]);
        }
        x
    }

    #[inline]
    pub fn contains(&self, x: &[f64; N]) -> bool {
        (0..N).all(|i| x[i] >= self.lower[i] && x[i] <= self.upper[i])
    }

    /// Longest step `t` such that `x + t·d` stays inside the box
    pub fn max_feasible_step(&self, x: &[f64; N], d: &[f64; N]) -> f64 {
        (0..N)
            .map(|i| {
                if d[i] < 0.0 {
                    (self.lower[i] - x[i]) / d[i]
                } else if d[i] > 0.0 {
                    (self.upper[i] - x[i]) / d[i]
                } else {
                    f64::INFINITY
                }
            })
            .fold(f64::INFINITY, f64::min)
    }
}

/// Stopping criteria for [`lbfgs`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LbfgsOptions {
    /// Number of correction pairs kept
    pub history: usize,
    /// Stop when the infinity norm of the projected gradient drops below this
    pub pgtol: f64,
    /// Stop when the relative reduction of f falls below `factr · ε`
    pub factr: f64,
    pub max_iterations: usize,
    pub max_evaluations: usize,
    /// Largest change of any single coordinate in one iteration
    pub max_step: f64,
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            history: 10,
            pgtol: 1e-5,
            factr: 1e7,
            max_iterations: 15_000,
            max_evaluations: 15_000,
            max_step: f64::INFINITY,
        }
    }
}

/// Why a minimization stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Projected gradient below `pgtol`
    GradientTolerance,
    /// Relative decrease of the objective below `factr · ε`
    RelativeReduction,
    IterationLimit,
    EvaluationLimit,
    /// No acceptable step along a steepest-descent direction
    LineSearchFailed,
}

impl Termination {
    /// True for the tolerance-based stops
    pub fn converged(&self) -> bool {
        matches!(self, Self::GradientTolerance | Self::RelativeReduction)
    }
}

/// Result of [`lbfgs`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum<const N: usize> {
    pub x: [f64; N],
    pub f: f64,
    pub gradient: [f64; N],
    pub iterations: usize,
    pub evaluations: usize,
    pub termination: Termination,
}

/// One (s, y) curvature pair
#[derive(Debug, Clone, Copy)]
struct Correction<const N: usize> {
    s: [f64; N],
    y: [f64; N],
    rho: f64,
}

const ARMIJO: f64 = 1e-4;
const MAX_BACKTRACKS: usize = 50;

#[inline]
fn dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    (0..N).map(|i| a[i] * b[i]).sum()
}

#[inline]
fn dot_free<const N: usize>(a: &[f64; N], b: &[f64; N], active: &[bool; N]) -> f64 {
    (0..N).filter(|&i| !active[i]).map(|i| a[i] * b[i]).sum()
}

/// Variables pinned on a bound with the gradient pushing them outward
fn active_set<const N: usize>(x: &[f64; N], g: &[f64; N], bounds: Option<&Bounds<N>>) -> [bool; N] {
    let mut active = [false; N];
    if let Some(b) = bounds {
        for i in 0..N {
            active[i] = (x[i] <= b.lower[i] && g[i] > 0.0) || (x[i] >= b.upper[i] && g[i] < 0.0);
        }
    }
    active
}

fn projected_gradient_norm<const N: usize>(
    x: &[f64; N],
    g: &[f64; N],
    bounds: Option<&Bounds<N>>,
) -> f64 {
    (0..N)
        .map(|i| match bounds {
            Some(b) => (x[i] - (x[i] - g[i]).clamp(b.lower[i], b.upper[i])).abs(),
            None => g[i].abs(),
        })
        .fold(0.0, f64::max)
}

fn steepest_descent<const N: usize>(g: &[f64; N], active: &[bool; N]) -> [f64; N] {
    let mut d = [0.0; N];
    for i in 0..N {
        if !active[i] {
            d[i] = -g[i];
        }
    }
    d
}

/// Two-loop recursion over the free variables
fn search_direction<const N: usize>(
    g: &[f64; N],
    active: &[bool; N],
    history: &VecDeque<Correction<N>>,
) -> [f64; N] {
    let Some(newest) = history.back() else {
        return steepest_descent(g, active);
    };

    let mut q = steepest_descent(g, active);
    for v in q.iter_mut() {
        *v = -*v;
    }

    // Newest pair first
    let mut alpha = Vec::with_capacity(history.len());
    for c in history.iter().rev() {
        let a = c.rho * dot_free(&c.s, &q, active);
        for i in 0..N {
            if !active[i] {
                q[i] -= a * c.y[i];
            }
        }
        alpha.push(a);
    }

    let yy = dot_free(&newest.y, &newest.y, active);
    let gamma = if yy > 0.0 {
        dot_free(&newest.s, &newest.y, active) / yy
    } else {
        1.0
    };
    let mut r = q.map(|v| v * gamma);

    // Oldest pair first
    for (c, a) in history.iter().zip(alpha.iter().rev()) {
        let beta = c.rho * dot_free(&c.y, &r, active);
        for i in 0..N {
            if !active[i] {
                r[i] += c.s[i] * (a - beta);
            }
        }
    }

    let mut d = [0.0; N];
    for i in 0..N {
        if !active[i] {
            d[i] = -r[i];
        }
    }
    d
}

/// Minimize `objective` from `x0` with limited-memory BFGS
///
/// `objective` returns the value and gradient at a point. With `bounds`,
/// every evaluated point lies inside the box.
pub fn lbfgs<const N: usize, F>(
    mut objective: F,
    x0: [f64; N],
    bounds: Option<&Bounds<N>>,
    options: &LbfgsOptions,
) -> Minimum<N>
where
    F: FnMut(&[f64; N]) -> (f64, [f64; N]),
{
    let project = |x: [f64; N]| match bounds {
        Some(b) => b.project(x),
        None => x,
    };

    let mut x = project(x0);
    let (mut f, mut g) = objective(&x);
    let mut evaluations = 1;
    let mut iterations = 0;
    let mut history: VecDeque<Correction<N>> = VecDeque::with_capacity(options.history);

    let termination = loop {
        if projected_gradient_norm(&x, &g, bounds) <= options.pgtol {
            break Termination::GradientTolerance;
        }
        if iterations >= options.max_iterations {
            break Termination::IterationLimit;
        }
        if evaluations >= options.max_evaluations {
            break Termination::EvaluationLimit;
        }

        let active = active_set(&x, &g, bounds);
        let mut d = search_direction(&g, &active, &history);
        if dot(&d, &g) >= 0.0 {
            history.clear();
            d = steepest_descent(&g, &active);
        }
        let d_max = d.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        if d_max == 0.0 {
            break Termination::GradientTolerance;
        }

        // Without curvature information take a unit-length first step
        let mut step = if history.is_empty() {
            (1.0 / dot(&d, &d).sqrt()).min(1.0)
        } else {
            1.0
        };
        step = step.min(options.max_step / d_max);
        if let Some(b) = bounds {
            // A free variable on a bound can still point outward; projection
            // handles that case
            let room = b.max_feasible_step(&x, &d);
            if room > 0.0 {
                step = step.min(room);
            }
        }

        let mut accepted = None;
        for _ in 0..MAX_BACKTRACKS {
            if evaluations >= options.max_evaluations {
                break;
            }
            let mut trial = x;
            for i in 0..N {
                trial[i] += step * d[i];
            }
            let trial = project(trial);
            let (f_trial, g_trial) = objective(&trial);
            evaluations += 1;

            let mut moved = [0.0; N];
            for i in 0..N {
                moved[i] = trial[i] - x[i];
            }
            let predicted = dot(&g, &moved);
            if f_trial.is_finite()
                && g_trial.iter().all(|v| v.is_finite())
                && f_trial <= f + ARMIJO * predicted
            {
                accepted = Some((trial, f_trial, g_trial));
                break;
            }
            step *= 0.5;
        }

        let Some((x_new, f_new, g_new)) = accepted else {
            if !history.is_empty() {
                // Retry from the same point along steepest descent
                history.clear();
                continue;
            }
            break Termination::LineSearchFailed;
        };

        let mut s = [0.0; N];
        let mut y = [0.0; N];
        for i in 0..N {
            s[i] = x_new[i] - x[i];
            y[i] = g_new[i] - g[i];
        }
        let sy = dot(&s, &y);
        if sy > f64::EPSILON * dot(&y, &y) {
            if history.len() == options.history {
                history.pop_front();
            }
            history.push_back(Correction { s, y, rho: 1.0 / sy });
        }

        let reduction = (f - f_new) / f.abs().max(f_new.abs()).max(1.0);
        x = x_new;
        f = f_new;
        g = g_new;
        iterations += 1;

        if reduction <= options.factr * f64::EPSILON {
            break Termination::RelativeReduction;
        }
    };

    Minimum {
        x,
        f,
        gradient: g,
        iterations,
        evaluations,
        termination,
    }
}

/// Settings for [`minimize_scalar`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarOptions {
    /// First trial distance from the starting point
    pub initial_step: f64,
    /// Relative width at which the bracket counts as converged
    pub xtol: f64,
    pub max_evaluations: usize,
}

impl Default for ScalarOptions {
    fn default() -> Self {
        Self {
            initial_step: 1.0,
            xtol: 1e-10,
            max_evaluations: 500,
        }
    }
}

/// Result of [`minimize_scalar`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarMinimum {
    pub x: f64,
    pub f: f64,
    pub evaluations: usize,
}

const GOLDEN: f64 = 1.618_033_988_749_895;
const GOLDEN_SECTION: f64 = 0.381_966_011_250_105;

/// Minimize a function of one variable starting from `x0`
///
/// Walks downhill with geometrically growing steps until the function
/// rises, then golden-section searches that bracket. Finds the local
/// minimum downhill of `x0`; no smoothness is assumed.
pub fn minimize_scalar<F>(mut f: F, x0: f64, options: &ScalarOptions) -> ScalarMinimum
where
    F: FnMut(f64) -> f64,
{
    let mut a = x0;
    let mut fa = f(a);
    let mut b = x0 + options.initial_step;
    let mut fb = f(b);
    if fb > fa {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }
    if fa.is_nan() || fb.is_nan() {
        return ScalarMinimum {
            x: a,
            f: fa,
            evaluations: 2,
        };
    }

    let mut c = b + GOLDEN * (b - a);
    let mut fc = f(c);
    let mut calls = 3;
    while fc < fb && calls < options.max_evaluations {
        a = b;
        b = c;
        fb = fc;
        c = b + GOLDEN * (b - a);
        fc = f(c);
        calls += 1;
    }

    // Bracket (a, b, c) with f(b) no larger than either end
    let (mut lo, mut hi) = if a < c { (a, c) } else { (c, a) };
    let mut x = b;
    let mut fx = fb;
    while hi - lo > options.xtol * (1.0 + x.abs()) && calls < options.max_evaluations {
        let trial = if hi - x > x - lo {
            x + GOLDEN_SECTION * (hi - x)
        } else {
            x - GOLDEN_SECTION * (x - lo)
        };
        let fp = f(trial);
        calls += 1;

        if fp < fx {
            if trial > x {
                lo = x;
            } else {
                hi = x;
            }
            x = trial;
            fx = fp;
        } else if trial > x {
            hi = trial;
        } else {
            lo = trial;
        }
    }

    ScalarMinimum {
        x,
        f: fx,
        evaluations: calls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rotated, badly scaled quadratic with its unique minimum at (1, -2, 0.5)
    fn quadratic(x: &[f64; 3]) -> (f64, [f64; 3]) {
        let u = [x[0] - 1.0, x[1] + 2.0, x[2] - 0.5];
        let w = [1.0, 10.0, 100.0];
        let p = [u[0] + u[1], u[1] - u[2], u[2] + 2.0 * u[0]];
        let f = w[0] * p[0] * p[0] + w[1] * p[1] * p[1] + w[2] * p[2] * p[2];
        let dp = [2.0 * w[0] * p[0], 2.0 * w[1] * p[1], 2.0 * w[2] * p[2]];
        (f, [dp[0] + 2.0 * dp[2], dp[0] + dp[1], -dp[1] + dp[2]])
    }

    fn gradient_check(x: [f64; 3]) {
        let (_, g) = quadratic(&x);
        let h = 1e-6;
        for i in 0..3 {
            let mut hi = x;
            let mut lo = x;
            hi[i] += h;
            lo[i] -= h;
            let numeric = (quadratic(&hi).0 - quadratic(&lo).0) / (2.0 * h);
            assert!((g[i] - numeric).abs() < 1e-4, "d/dx{}: {} vs {}", i, g[i], numeric);
        }
    }

    #[test]
    fn test_quadratic_gradient() {
        gradient_check([0.3, -0.7, 2.0]);
        gradient_check([1.0, -2.0, 0.5]);
    }

    #[test]
    fn test_unbounded_quadratic() {
        let min = lbfgs(quadratic, [0.0, 0.0, 0.0], None, &LbfgsOptions::default());
        assert!(min.termination.converged(), "{:?}", min.termination);
        assert!((min.x[0] - 1.0).abs() < 1e-3, "{:?}", min.x);
        assert!((min.x[1] + 2.0).abs() < 1e-3, "{:?}", min.x);
        assert!((min.x[2] - 0.5).abs() < 1e-3, "{:?}", min.x);
    }

    #[test]
    fn test_bounded_minimum_on_face() {
        // Separable bowl centred outside the cube along x₀
        let bowl = |x: &[f64; 3]| {
            let c = [1.5, 0.25, 0.75];
            let f = (0..3).map(|i| (x[i] - c[i]).powi(2)).sum::<f64>();
            (f, [2.0 * (x[0] - c[0]), 2.0 * (x[1] - c[1]), 2.0 * (x[2] - c[2])])
        };
        let bounds = Bounds::unit();
        let min = lbfgs(bowl, [0.5; 3], Some(&bounds), &LbfgsOptions::default());
        assert!(bounds.contains(&min.x));
        assert!((min.x[0] - 1.0).abs() < 1e-9, "{:?}", min.x);
        assert!((min.x[1] - 0.25).abs() < 1e-4, "{:?}", min.x);
        assert!((min.x[2] - 0.75).abs() < 1e-4, "{:?}", min.x);
    }

    #[test]
    fn test_max_step_limits_every_move() {
        let options = LbfgsOptions {
            max_step: 0.05,
            ..LbfgsOptions::default()
        };
        let mut points = Vec::new();
        let min = lbfgs(
            |x| {
                points.push(*x);
                quadratic(x)
            },
            [0.0, 0.0, 0.0],
            None,
            &options,
        );
        assert!(min.termination.converged(), "{:?}", min.termination);
        assert!((min.x[0] - 1.0).abs() < 1e-3, "{:?}", min.x);
        assert!((min.x[1] + 2.0).abs() < 1e-3, "{:?}", min.x);
        assert!((min.x[2] - 0.5).abs() < 1e-3, "{:?}", min.x);
        // Every trial lies within one capped step of the starting point of
        // its iteration, so consecutive evaluations never jump further
        let widest = points
            .windows(2)
            .map(|w| (0..3).map(|i| (w[1][i] - w[0][i]).abs()).fold(0.0, f64::max))
            .fold(0.0, f64::max);
        assert!(widest <= 0.05 + 1e-12, "moved {}", widest);
    }

    #[test]
    fn test_bounded_steps_stop_at_the_box() {
        // Minimum far outside the cube: the search must walk onto the face
        // instead of jumping past it and projecting back
        let far = |x: &[f64; 3]| {
            let c = [40.0, 0.5, 0.5];
            let f = (0..3).map(|i| (x[i] - c[i]).powi(2)).sum::<f64>();
            (f, [2.0 * (x[0] - c[0]), 2.0 * (x[1] - c[1]), 2.0 * (x[2] - c[2])])
        };
        let bounds = Bounds::unit();
        let min = lbfgs(far, [0.5; 3], Some(&bounds), &LbfgsOptions::default());
        assert!(bounds.contains(&min.x));
        assert!((min.x[0] - 1.0).abs() < 1e-12, "{:?}", min.x);
        assert!((min.x[1] - 0.5).abs() < 1e-9 && (min.x[2] - 0.5).abs() < 1e-9, "{:?}", min.x);
    }

    #[test]
    fn test_max_feasible_step() {
        let b = Bounds::<3>::unit();
        let x = [0.5, 0.2, 1.0];
        assert_eq!(b.max_feasible_step(&x, &[1.0, 0.0, 0.0]), 0.5);
        assert!((b.max_feasible_step(&x, &[0.0, -0.4, 0.0]) - 0.5).abs() < 1e-12);
        assert_eq!(b.max_feasible_step(&x, &[0.0, 0.0, 1.0]), 0.0);
        assert_eq!(b.max_feasible_step(&x, &[0.0; 3]), f64::INFINITY);
    }

    #[test]
    fn test_already_optimal() {
        let min = lbfgs(quadratic, [1.0, -2.0, 0.5], None, &LbfgsOptions::default());
        assert_eq!(min.termination, Termination::GradientTolerance);
        assert_eq!(min.iterations, 0);
        assert_eq!(min.evaluations, 1);
    }

    #[test]
    fn test_iteration_limit() {
        let options = LbfgsOptions {
            max_iterations: 1,
            ..LbfgsOptions::default()
        };
        let min = lbfgs(quadratic, [10.0, 10.0, 10.0], None, &options);
        assert_eq!(min.iterations, 1);
        assert_eq!(min.termination, Termination::IterationLimit);
    }

    #[test]
    fn test_project() {
        let b = Bounds::<3>::unit();
        assert_eq!(b.project([-1.0, 0.5, 2.0]), [0.0, 0.5, 1.0]);
        assert!(b.contains(&[0.0, 1.0, 0.5]));
        assert!(!b.contains(&[0.0, 1.1, 0.5]));
    }

    #[test]
    fn test_scalar_smooth() {
        let min = minimize_scalar(|x| (x - 3.0).powi(2), 10.0, &ScalarOptions::default());
        assert!((min.x - 3.0).abs() < 1e-6, "x = {}", min.x);
    }

    #[test]
    fn test_scalar_kink() {
        // V-shaped, minimum behind the starting point
        let min = minimize_scalar(|x| (x + 42.5).abs(), 7.0, &ScalarOptions::default());
        assert!((min.x + 42.5).abs() < 1e-6, "x = {}", min.x);
        assert!(min.f < 1e-6);
    }

    #[test]
    fn test_scalar_start_at_minimum() {
        let min = minimize_scalar(|x| (x - 1.0).abs(), 1.0, &ScalarOptions::default());
        assert!((min.x - 1.0).abs() < 1e-6, "x = {}", min.x);
    }
}
