use crate::*;
use serde_json::json;
use std::time::Duration;

#[test]
fn defaults_match_diagram_settings_default() {
    let cfg = SiteConfig::default();
    assert_eq!(cfg.diagram_settings(), DiagramSettings::default());
    assert_eq!(cfg.get_u64("diagram.graceMs"), Some(150));
    assert_eq!(cfg.site_title(), "API Reference");
}

#[test]
fn deep_merge_overrides_individual_keys() {
    let mut cfg = SiteConfig::default();
    cfg.deep_merge(&json!({
        "site": { "title": "Platform API" },
        "diagram": { "graceMs": 300, "gutter": 20 }
    }));
    let d = cfg.diagram_settings();
    assert_eq!(cfg.site_title(), "Platform API");
    assert_eq!(d.grace, Duration::from_millis(300));
    assert_eq!(d.gutter, 20.0);
    assert_eq!(d.popup_width, 480.0);
    assert_eq!(d.settle, Duration::from_millis(200));
}

#[test]
fn invalid_override_values_fall_back_to_defaults() {
    let mut cfg = SiteConfig::default();
    cfg.deep_merge(&json!({ "diagram": { "gutter": -4, "graceMs": "soon" } }));
    let d = cfg.diagram_settings();
    assert_eq!(d.gutter, 12.0);
    assert_eq!(d.grace, Duration::from_millis(150));
}

#[test]
fn set_value_creates_intermediate_objects() {
    let mut cfg = SiteConfig::from_value(json!(42));
    cfg.set_value("diagram.popupWidth", json!(320));
    assert_eq!(cfg.as_value(), &json!({ "diagram": { "popupWidth": 320 } }));
    assert_eq!(cfg.diagram_settings().popup_width, 320.0);
}

#[test]
fn yaml_overrides_parse() {
    let cfg = SiteConfig::from_yaml_str("site:\n  title: Docs\n").unwrap();
    assert_eq!(cfg.get_str("site.title"), Some("Docs"));
}

#[test]
fn load_reports_missing_file_with_path() {
    let err = SiteConfig::load("does/not/exist.json").unwrap_err();
    match err {
        Error::Io { path, .. } => assert!(path.ends_with("exist.json")),
        other => panic!("unexpected error: {other}"),
    }
}
