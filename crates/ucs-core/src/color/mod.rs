//! Color space types and conversions
//!
//! This module provides:
//! - Display RGB (gamma 2.2)
//! - CIE XYZ
//! - CAM02-UCS in rectangular (Jab) and cylindrical (JMh) form

pub mod jab;
pub mod jmh;
pub mod rgb;
pub mod xyz;

pub use jab::{Jab, delta_e, jab_to_jmh};
pub use jmh::{Jmh, jmh_to_jab};
pub use rgb::Rgb;
pub use xyz::{Xyz, srgb_to_xyz};
