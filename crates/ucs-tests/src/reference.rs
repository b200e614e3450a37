//! Golden reference values
//!
//! Forward-transform outputs of the reference CAM02-UCS implementation
//! (gamma 2.2, full discounting), to 12 decimals.

use ucs_core::{Jab, Rgb, Surround, ViewingConditions};

/// One forward-transform reference point
#[derive(Debug, Clone, Copy)]
pub struct GoldenCase {
    pub name: &'static str,
    pub rgb: [f64; 3],
    /// White luminance; L_A and Y_b are Y_w / 5
    pub y_w: f64,
    pub surround: Surround,
    pub jab: [f64; 3],
}

impl GoldenCase {
    pub fn rgb(&self) -> Rgb {
        Rgb::from_array(self.rgb)
    }

    pub fn jab(&self) -> Jab {
        Jab::from_array(self.jab)
    }

    pub fn conditions(&self) -> ucs_core::Result<ViewingConditions> {
        ViewingConditions::new(self.y_w, self.y_w / 5.0, self.y_w / 5.0, self.surround)
    }
}

const fn case(name: &'static str, rgb: [f64; 3], jab: [f64; 3]) -> GoldenCase {
    GoldenCase {
        name,
        rgb,
        y_w: 100.0,
        surround: Surround::Average,
        jab,
    }
}

pub const GOLDEN: &[GoldenCase] = &[
    case("mid-gray", [0.5, 0.5, 0.5], [56.566272414787, 0.0, 0.0]),
    case("white", [1.0, 1.0, 1.0], [100.0, 0.0, 0.0]),
    case("black", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
    case(
        "red",
        [1.0, 0.0, 0.0],
        [60.304885073434, 42.178881930525, 26.603573056632],
    ),
    case(
        "green",
        [0.0, 1.0, 0.0],
        [87.048599669906, -34.331088101723, 33.335051346938],
    ),
    case(
        "blue",
        [0.0, 0.0, 1.0],
        [31.135203572784, -9.122520918995, -42.625693092828],
    ),
    case(
        "steel",
        [0.2, 0.4, 0.6],
        [43.217986482376, -10.530233999967, -24.023624279347],
    ),
    GoldenCase {
        name: "steel, dim surround",
        rgb: [0.2, 0.4, 0.6],
        y_w: 100.0,
        surround: Surround::Dim,
        jab: [49.594477955251, -10.841659652925, -24.734109238906],
    },
    GoldenCase {
        name: "orange, Y_w = 80",
        rgb: [0.8, 0.3, 0.1],
        y_w: 80.0,
        surround: Surround::Average,
        jab: [55.011932099558, 27.727490924418, 24.985862776999],
    },
];

/// (h, H) pairs for the hue composition map
pub const HUE_COMPOSITION_GOLDEN: &[(f64, f64)] = &[
    (0.0, 380.213518470003),
    (20.14, 0.0),
    (45.0, 32.586794502079),
    (90.0, 100.0),
    (120.0, 149.200492004920),
    (164.25, 200.0),
    (200.0, 253.338306602014),
    (237.53, 300.0),
    (300.0, 334.196409021239),
    (359.9, 380.121783539580),
];
