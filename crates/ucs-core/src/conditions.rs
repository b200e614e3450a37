//! CIECAM02 viewing conditions
//!
//! The appearance model is conditioned on six scalars: the luminance of the
//! reference white `Y_w`, the adapting luminance `L_A`, the background
//! luminance `Y_b`, and the three surround coefficients `F`, `c`, `N_c`.
//!
//! Conditions are validated once, at construction. The transforms that take
//! a `&ViewingConditions` never fail.
//!
//! ## Configuration
//!
//! Conditions serialize to JSON. `l_a` and `y_b` may be omitted and then
//! default to `y_w / 5`:
//!
//! ```
//! use ucs_core::{Surround, ViewingConditions};
//!
//! let vc = ViewingConditions::from_json(r#"{ "y_w": 80, "surround": "dim" }"#).unwrap();
//! assert_eq!(vc.l_a(), 16.0);
//! assert_eq!(vc.surround(), Surround::Dim);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::{FULL_DISCOUNT, degree_of_adaptation};

/// Surround factor `F`, chromatic induction `c` and `N_c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurroundCoefficients {
    pub f: f64,
    pub c: f64,
    pub n_c: f64,
}

impl SurroundCoefficients {
    pub const fn new(f: f64, c: f64, n_c: f64) -> Self {
        Self { f, c, n_c }
    }
}

/// Average surround (F = 1, c = 0.69, N_c = 1)
pub const AVERAGE: SurroundCoefficients = SurroundCoefficients::new(1.0, 0.69, 1.0);
/// Dim surround (F = 0.9, c = 0.59, N_c = 0.95)
pub const DIM: SurroundCoefficients = SurroundCoefficients::new(0.9, 0.59, 0.95);
/// Dark surround (F = 0.8, c = 0.525, N_c = 0.8)
pub const DARK: SurroundCoefficients = SurroundCoefficients::new(0.8, 0.525, 0.8);

/// Relative luminance of the surround
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surround {
    /// Typical for viewing surface colors or a display in a lit room
    #[default]
    Average,
    /// Television or display in a dim room
    Dim,
    /// Projection in a darkened room
    Dark,
    /// Caller-supplied coefficients
    Custom(SurroundCoefficients),
}

impl Surround {
    /// The (F, c, N_c) triple for this surround
    pub const fn coefficients(&self) -> SurroundCoefficients {
        match self {
            Self::Average => AVERAGE,
            Self::Dim => DIM,
            Self::Dark => DARK,
            Self::Custom(coefficients) => *coefficients,
        }
    }

    /// Look up a preset by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "average" => Some(Self::Average),
            "dim" => Some(Self::Dim),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl FromStr for Surround {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            Error::InvalidConditions(format!(
                "unknown surround '{}' (expected average, dim or dark)",
                s
            ))
        })
    }
}

impl fmt::Display for Surround {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average => write!(f, "average"),
            Self::Dim => write!(f, "dim"),
            Self::Dark => write!(f, "dark"),
            Self::Custom(s) => write!(f, "custom(F={}, c={}, N_c={})", s.f, s.c, s.n_c),
        }
    }
}

/// How the degree of adaptation D is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adaptation {
    /// D = 1: the illuminant is discounted completely
    #[default]
    Full,
    /// D from the CIECAM02 formula in F and L_A
    Partial,
}

/// Serialized form of [`ViewingConditions`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionsConfig {
    #[serde(default = "default_white")]
    y_w: f64,
    #[serde(default)]
    l_a: Option<f64>,
    #[serde(default)]
    y_b: Option<f64>,
    #[serde(default)]
    surround: Surround,
    #[serde(default)]
    adaptation: Adaptation,
}

fn default_white() -> f64 {
    ViewingConditions::DEFAULT.y_w
}

/// Viewing conditions for the appearance model
///
/// Immutable once built. Construct with [`ViewingConditions::new`],
/// [`ViewingConditions::with_white`], or load from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConditionsConfig", into = "ConditionsConfig")]
pub struct ViewingConditions {
    y_w: f64,
    l_a: f64,
    y_b: f64,
    surround: Surround,
    adaptation: Adaptation,
}

impl ViewingConditions {
    /// Y_w = 100, L_A = 20, Y_b = 20, average surround, full adaptation
    pub const DEFAULT: Self = Self {
        y_w: 100.0,
        l_a: 20.0,
        y_b: 20.0,
        surround: Surround::Average,
        adaptation: Adaptation::Full,
    };

    /// Create validated viewing conditions
    ///
    /// All luminances must be finite and positive, as must the surround
    /// coefficients.
    pub fn new(y_w: f64, l_a: f64, y_b: f64, surround: Surround) -> Result<Self> {
        let vc = Self {
            y_w,
            l_a,
            y_b,
            surround,
            adaptation: Adaptation::Full,
        };
        vc.validate()?;
        Ok(vc)
    }

    /// Conditions for a white of luminance `y_w`, with L_A = Y_b = Y_w / 5
    /// and an average surround
    pub fn with_white(y_w: f64) -> Result<Self> {
        Self::new(y_w, y_w / 5.0, y_w / 5.0, Surround::Average)
    }

    /// Replace the surround
    pub fn with_surround(self, surround: Surround) -> Result<Self> {
        Self::new(self.y_w, self.l_a, self.y_b, surround).map(|vc| vc.with_adaptation(self.adaptation))
    }

    /// Replace the adaptation mode
    pub const fn with_adaptation(mut self, adaptation: Adaptation) -> Self {
        self.adaptation = adaptation;
        self
    }

    /// Parse conditions from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ConditionsConfig = serde_json::from_str(json)?;
        Self::try_from(config)
    }

    /// Load conditions from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        let check = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConditions(format!(
                    "{} must be finite and positive, got {}",
                    name, v
                )))
            }
        };
        check("Y_w", self.y_w)?;
        check("L_A", self.l_a)?;
        check("Y_b", self.y_b)?;
        let s = self.surround.coefficients();
        check("F", s.f)?;
        check("c", s.c)?;
        check("N_c", s.n_c)
    }

    /// Luminance of the reference white
    #[inline]
    pub const fn y_w(&self) -> f64 {
        self.y_w
    }

    /// Adapting luminance
    #[inline]
    pub const fn l_a(&self) -> f64 {
        self.l_a
    }

    /// Background luminance
    #[inline]
    pub const fn y_b(&self) -> f64 {
        self.y_b
    }

    #[inline]
    pub const fn surround(&self) -> Surround {
        self.surround
    }

    #[inline]
    pub const fn adaptation(&self) -> Adaptation {
        self.adaptation
    }

    #[inline]
    pub const fn f(&self) -> f64 {
        self.surround.coefficients().f
    }

    #[inline]
    pub const fn c(&self) -> f64 {
        self.surround.coefficients().c
    }

    #[inline]
    pub const fn n_c(&self) -> f64 {
        self.surround.coefficients().n_c
    }

    /// (Y_w, L_A, Y_b, F, c, N_c)
    pub const fn to_array(&self) -> [f64; 6] {
        let s = self.surround.coefficients();
        [self.y_w, self.l_a, self.y_b, s.f, s.c, s.n_c]
    }

    /// Degree of adaptation D in effect for these conditions
    pub fn degree_of_adaptation(&self) -> f64 {
        match self.adaptation {
            Adaptation::Full => FULL_DISCOUNT,
            Adaptation::Partial => degree_of_adaptation(self.f(), self.l_a),
        }
    }
}

impl Default for ViewingConditions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<ConditionsConfig> for ViewingConditions {
    type Error = Error;

    fn try_from(config: ConditionsConfig) -> Result<Self> {
        let l_a = config.l_a.unwrap_or(config.y_w / 5.0);
        let y_b = config.y_b.unwrap_or(config.y_w / 5.0);
        Ok(Self::new(config.y_w, l_a, y_b, config.surround)?.with_adaptation(config.adaptation))
    }
}

impl From<ViewingConditions> for ConditionsConfig {
    fn from(vc: ViewingConditions) -> Self {
        Self {
            y_w: vc.y_w,
            l_a: Some(vc.l_a),
            y_b: Some(vc.y_b),
            surround: vc.surround,
            adaptation: vc.adaptation,
        }
    }
}

impl fmt::Display for ViewingConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [y_w, l_a, y_b, sf, c, n_c] = self.to_array();
        write!(
            f,
            "ViewingConditions(Y_w={}, L_A={}, Y_b={}, F={}, c={}, N_c={})",
            y_w, l_a, y_b, sf, c, n_c
        )
    }
}
