//! Forward transform properties
//!
//! Golden values, determinism, the achromatic axis and white normalization.

use ucs_core::{Rgb, ViewingConditions, srgb_to_ucs, srgb_to_xyz};
use ucs_tests::patterns::{TestPattern, generate_pattern};
use ucs_tests::reference::GOLDEN;

#[test]
fn test_golden_values() {
    for case in GOLDEN {
        let vc = case.conditions().expect("golden conditions are valid");
        let jab = srgb_to_ucs(case.rgb(), &vc);
        assert!(
            jab.approx_eq(&case.jab(), 1e-8),
            "{}: expected {:?}, got {:?}",
            case.name,
            case.jab(),
            jab
        );
    }
}

#[test]
fn test_mid_gray_scenario() {
    let jab = srgb_to_ucs(Rgb::MID_GRAY, &ViewingConditions::default());
    eprintln!("mid-gray: {:?}", jab);
    assert!(jab.a.abs() < 1e-4 && jab.b.abs() < 1e-4);
    assert!(jab.j > 50.0 && jab.j < 60.0);
}

#[test]
fn test_grays_are_hueless() {
    let vc = ViewingConditions::default();
    for rgb in generate_pattern(TestPattern::Grayscale, 101).into_iter().skip(1) {
        let jab = srgb_to_ucs(rgb, &vc);
        assert!(
            jab.a.abs() < 1e-6 && jab.b.abs() < 1e-6,
            "gray {} → {:?}",
            rgb.r,
            jab
        );
    }
}

#[test]
fn test_gray_lightness_increases() {
    let vc = ViewingConditions::default();
    let ramp = generate_pattern(TestPattern::Grayscale, 64);
    let lightness: Vec<f64> = ramp.iter().map(|rgb| srgb_to_ucs(*rgb, &vc).j).collect();
    for w in lightness.windows(2) {
        assert!(w[1] > w[0], "J' not increasing: {} then {}", w[0], w[1]);
    }
}

#[test]
fn test_white_normalization() {
    for y_w in [20.0, 80.0, 100.0, 250.0] {
        let vc = ViewingConditions::with_white(y_w).unwrap();
        let jab = srgb_to_ucs(Rgb::WHITE, &vc);
        assert!((jab.j - 100.0).abs() < 1e-9, "Y_w={}: J' = {}", y_w, jab.j);
    }
}

#[test]
fn test_deterministic() {
    let vc = ViewingConditions::default();
    for rgb in generate_pattern(TestPattern::Random(7), 100) {
        let a = srgb_to_ucs(rgb, &vc);
        let b = srgb_to_ucs(rgb, &vc);
        assert_eq!(a.to_array().map(f64::to_bits), b.to_array().map(f64::to_bits));
    }
}

#[test]
fn test_cube_is_finite() {
    let vc = ViewingConditions::default();
    for rgb in generate_pattern(TestPattern::Grid(9), 0) {
        let jab = srgb_to_ucs(rgb, &vc);
        assert!(
            jab.to_array().iter().all(|v| v.is_finite()),
            "{:?} → {:?}",
            rgb,
            jab
        );
        assert!(jab.j >= 0.0, "{:?} → {:?}", rgb, jab);
    }
}

#[test]
fn test_srgb_to_xyz_white() {
    let xyz = srgb_to_xyz(Rgb::WHITE);
    assert!((xyz.x - 0.9505).abs() < 1e-12);
    assert!((xyz.y - 1.0).abs() < 1e-12);
    assert!((xyz.z - 1.089).abs() < 1e-12);
}
