//! Integration tests for display formatting and its configuration.

use matrix_index::{Alignment, FormatConfig, Matrix};

// ---------------------------------------------------------------------------
// FormatConfig defaults & serialization
// ---------------------------------------------------------------------------

#[test]
fn format_config_default_values() {
    let cfg = FormatConfig::default();
    assert_eq!(cfg.indent, 2);
    assert_eq!(cfg.separator, "  ");
    assert_eq!(cfg.alignment, Alignment::Right);
}

#[test]
fn format_config_round_trips_json() {
    let cfg = FormatConfig::new(4, " | ", Alignment::Center);
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"alignment\":\"center\""));
    let cfg2: FormatConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, cfg2);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let cfg = FormatConfig::from_json_str(r#"{"indent": 0, "alignment": 7}"#).unwrap();
    assert_eq!(cfg.indent, 0);
    assert_eq!(cfg.separator, "  ");
    assert_eq!(cfg.alignment, Alignment::Right);
}

#[test]
fn malformed_config_json_errors() {
    assert!(FormatConfig::from_json_str("{indent: 2").is_err());
}

#[test]
fn format_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("format.json");
    std::fs::write(&path, r#"{"indent": 1, "separator": ",", "alignment": "left"}"#).unwrap();

    let cfg = FormatConfig::from_file(&path).unwrap();
    assert_eq!(cfg, FormatConfig::new(1, ",", Alignment::Left));
    assert!(FormatConfig::from_file(dir.path().join("missing.json")).is_err());
}

#[test]
fn alignment_from_str() {
    assert_eq!("LEFT".parse::<Alignment>().unwrap(), Alignment::Left);
    assert_eq!("centre".parse::<Alignment>().unwrap(), Alignment::Center);
    assert!("justified".parse::<Alignment>().is_err());
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn display_matches_canonical_grid() {
    let m = Matrix::new((2, 3), vec![1, 20, 300, 4, 5, 6]).unwrap();
    let want = "[\n    1   20  300\n    4    5    6\n]";
    assert_eq!(m.to_display_string(), want);
    assert_eq!(m.to_string(), want);
}

#[test]
fn render_with_custom_config() {
    let m = Matrix::new((2, 2), vec![1.5, 2.25, -3.0, 4.0]).unwrap();
    let cfg = FormatConfig::new(1, ",", Alignment::Left);
    assert_eq!(m.render(&cfg), "[\n 1.5 ,2.25\n -3  ,4   \n]");
}

#[test]
fn selections_render_through_display() {
    let m = Matrix::new((3, 3), (1..=9).collect::<Vec<i32>>()).unwrap();
    assert_eq!(m.get((0, 0)).unwrap().to_string(), "1");
    assert_eq!(m.get((.., 2)).unwrap().to_string(), "[\n  3\n  6\n  9\n]");
}
