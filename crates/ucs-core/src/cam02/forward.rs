//! CIECAM02 forward model with the CAM02-UCS compression
//!
//! [`UcsTransform`] holds everything that depends only on the viewing
//! conditions. Per color, [`UcsTransform::eval`] runs the pipeline over any
//! [`Real`] scalar, so the same code produces values (`f64`) and Jacobians
//! (`Dual3`).

use std::f64::consts::PI;

use crate::cam02::kernel::{Kernel, kernel};
use crate::color::{Jab, Rgb};
use crate::conditions::ViewingConditions;
use crate::math::{CAT02, Dual3, Real, SRGB_TO_XYZ, adapt, gamma_decode, von_kries_gains};

/// Lightness compression coefficient c₁
pub const C1: f64 = 0.007;
/// Colorfulness compression coefficient c₂
pub const C2: f64 = 0.0228;
/// Lightness weight K_L; equal to 1 in CAM02-UCS and dropped from the
/// distance formula
pub const K_L: f64 = 1.0;

/// Post-adaptation response compression, odd-symmetric about zero except
/// for the 0.1 offset
#[inline]
fn compress<T: Real>(v: T, f_l: f64) -> T {
    if v.value() >= 0.0 {
        let p = (v * f_l / 100.0).powf(0.42);
        p * 400.0 / (p + 27.13) + 0.1
    } else {
        let p = (-v * f_l / 100.0).powf(0.42);
        -(p * 400.0) / (p + 27.13) + 0.1
    }
}

#[inline]
fn achromatic<T: Real>(ap: &[T; 3], n_bb: f64) -> T {
    (ap[0] * 2.0 + ap[1] + ap[2] * (1.0 / 20.0) - 0.305) * n_bb
}

/// The forward transform specialized to one set of viewing conditions
#[derive(Debug, Clone, Copy)]
pub struct UcsTransform {
    kernel: &'static Kernel,
    y_w: f64,
    /// Von Kries gains D_rgb
    d_rgb: [f64; 3],
    /// Luminance-level adaptation factor F_L
    f_l: f64,
    /// F_L^0.25
    f_l_quarter: f64,
    /// Background induction factor n = Y_b / Y_w
    n: f64,
    /// Base exponent z
    z: f64,
    n_bb: f64,
    n_cb: f64,
    /// Achromatic response of the white
    a_w: f64,
    c: f64,
    n_c: f64,
    /// (1.64 − 0.29ⁿ)^0.73
    chroma_scale: f64,
}

impl UcsTransform {
    /// Derive the condition-dependent parameters
    pub fn new(conditions: &ViewingConditions) -> Self {
        let kernel = kernel();
        let [y_w, l_a, y_b, _, c, n_c] = conditions.to_array();

        let xyz_w = SRGB_TO_XYZ.multiply_vec([1.0, 1.0, 1.0]).map(|v| v * y_w);
        let rgb_w = CAT02.multiply_vec(xyz_w);
        let d_rgb = von_kries_gains(conditions.degree_of_adaptation(), y_w, rgb_w);

        let k = 1.0 / (5.0 * l_a + 1.0);
        let k4 = k.powi(4);
        let f_l = 0.2 * k4 * (5.0 * l_a) + 0.1 * (1.0 - k4).powi(2) * (5.0 * l_a).cbrt();
        let n = y_b / y_w;
        let z = 1.48 + n.sqrt();
        let n_bb = 0.725 * (1.0 / n).powf(0.2);

        let rgb_wp = kernel.cat02_to_hpe.multiply_vec(adapt(rgb_w, d_rgb));
        let rgb_aw = rgb_wp.map(|v| compress(v, f_l));
        let a_w = achromatic(&rgb_aw, n_bb);

        Self {
            kernel,
            y_w,
            d_rgb,
            f_l,
            f_l_quarter: f_l.powf(0.25),
            n,
            z,
            n_bb,
            n_cb: n_bb,
            a_w,
            c,
            n_c,
            chroma_scale: (1.64 - 0.29f64.powf(n)).powf(0.73),
        }
    }

    /// Achromatic response of the reference white
    pub fn white_response(&self) -> f64 {
        self.a_w
    }

    /// Luminance-level adaptation factor F_L
    pub fn luminance_adaptation(&self) -> f64 {
        self.f_l
    }

    /// Background induction factor n
    pub fn background_induction(&self) -> f64 {
        self.n
    }

    /// Run the pipeline on one gamma-encoded RGB triple
    pub fn eval<T: Real>(&self, rgb: [T; 3]) -> [T; 3] {
        let linear = rgb.map(gamma_decode);
        let xyz = SRGB_TO_XYZ.apply(linear).map(|v| v * self.y_w);
        let cone = adapt(CAT02.apply(xyz), self.d_rgb);
        let rgb_p = self.kernel.cat02_to_hpe.apply(cone);
        let ap = rgb_p.map(|v| compress(v, self.f_l));

        let a = ap[0] - ap[1] * (12.0 / 11.0) + ap[2] * (1.0 / 11.0);
        let b = ap[0] * (1.0 / 9.0) + ap[1] * (1.0 / 9.0) - ap[2] * (2.0 / 9.0);

        let h = b.atan2(a) * (180.0 / PI);
        let h = if h.value() < 0.0 { h + 360.0 } else { h };
        let e_t = ((h * (PI / 180.0) + 2.0).cos() + 3.8) / 4.0;

        let big_a = achromatic(&ap, self.n_bb);
        let j = (big_a / self.a_w).max_const(0.0).powf(self.c * self.z) * 100.0;

        let t = e_t * (50000.0 / 13.0 * self.n_c * self.n_cb) * (a * a + b * b).sqrt()
            / (ap[0] + ap[1] + ap[2] * (21.0 / 20.0));
        let chroma = t.powf(0.9) * (j / 100.0).sqrt() * self.chroma_scale;
        let m = chroma * self.f_l_quarter;

        let j_p = j * (1.0 + 100.0 * C1) / (j * C1 + 1.0);
        let m_p = (m * C2 + 1.0).ln() / C2;
        let h_rad = h * (PI / 180.0);
        [j_p, m_p * h_rad.cos(), m_p * h_rad.sin()]
    }

    /// Transform one color
    #[inline]
    pub fn forward(&self, rgb: Rgb) -> Jab {
        Jab::from_array(self.eval(rgb.to_array()))
    }

    /// Transform one color and return d(J', a', b') / d(R, G, B)
    ///
    /// Row `i` of the Jacobian holds the partials of output `i`.
    pub fn forward_with_jacobian(&self, rgb: Rgb) -> (Jab, [[f64; 3]; 3]) {
        let out = self.eval(Dual3::seed(rgb.to_array()));
        let jab = Jab::new(out[0].v, out[1].v, out[2].v);
        (jab, [out[0].d, out[1].d, out[2].d])
    }
}

/// Convert a display RGB color to CAM02-UCS
pub fn srgb_to_ucs(rgb: Rgb, conditions: &ViewingConditions) -> Jab {
    UcsTransform::new(conditions).forward(rgb)
}

/// Forward transform plus its Jacobian with respect to RGB
pub fn srgb_to_ucs_jacobian(rgb: Rgb, conditions: &ViewingConditions) -> (Jab, [[f64; 3]; 3]) {
    UcsTransform::new(conditions).forward_with_jacobian(rgb)
}
