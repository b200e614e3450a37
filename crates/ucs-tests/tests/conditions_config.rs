//! Viewing conditions configuration

use std::io::Write;

use ucs_core::{Adaptation, Error, Surround, SurroundCoefficients, ViewingConditions};

#[test]
fn test_json_roundtrip() -> anyhow::Result<()> {
    let vc = ViewingConditions::new(
        64.0,
        12.8,
        20.0,
        Surround::Custom(SurroundCoefficients::new(0.95, 0.64, 0.97)),
    )?
    .with_adaptation(Adaptation::Partial);
    let json = vc.to_json()?;
    let back = ViewingConditions::from_json(&json)?;
    assert_eq!(vc, back);
    Ok(())
}

#[test]
fn test_serde_value_layout() -> anyhow::Result<()> {
    let value = serde_json::to_value(ViewingConditions::default())?;
    assert_eq!(value["y_w"], 100.0);
    assert_eq!(value["l_a"], 20.0);
    assert_eq!(value["surround"], "average");
    assert_eq!(value["adaptation"], "full");
    Ok(())
}

#[test]
fn test_minimal_document() -> anyhow::Result<()> {
    let vc = ViewingConditions::from_json("{}")?;
    assert_eq!(vc, ViewingConditions::default());
    Ok(())
}

#[test]
fn test_validation() {
    let cases = [
        r#"{"y_w": 0}"#,
        r#"{"y_w": 100, "l_a": -3}"#,
        r#"{"y_w": 100, "y_b": 0}"#,
        r#"{"surround": {"custom": {"f": 1.0, "c": -0.5, "n_c": 1.0}}}"#,
    ];
    for json in cases {
        let err = ViewingConditions::from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidConditions(_)), "{}: {:?}", json, err);
    }
}

#[test]
fn test_malformed() {
    for json in [r#"{"y_w": "bright"}"#, r#"{"surround": "sunny"}"#, r#"{"unknown": 1}"#] {
        let err = ViewingConditions::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{}: {:?}", json, err);
    }
}

#[test]
fn test_from_file() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("ucs-conditions-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, r#"{{"y_w": 80, "surround": "dark"}}"#)?;
    }
    let vc = ViewingConditions::from_json_file(&path)?;
    std::fs::remove_file(&path)?;
    assert_eq!(vc.to_array(), [80.0, 16.0, 16.0, 0.8, 0.525, 0.8]);
    Ok(())
}

#[test]
fn test_missing_file() {
    let err = ViewingConditions::from_json_file("/nonexistent/ucs/conditions.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
