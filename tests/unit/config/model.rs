use super::*;

const SCENARIO_A: &str = r#"
canvas:
  width: 200
  height: 100
elements:
  - text: "OK"
    x: 10
    y: 10
    font: default
    size: 12
"#;

#[test]
fn parses_minimal_config_with_defaults() {
    let cfg = DecalConfig::from_yaml_str(SCENARIO_A).unwrap();
    cfg.validate().unwrap();

    assert_eq!(cfg.canvas().unwrap(), Canvas { width: 200, height: 100 });
    assert_eq!(cfg.canvas.background.rgba8(), Rgba8::TRANSPARENT);
    assert_eq!(cfg.elements.len(), 1);

    let el = &cfg.elements[0];
    assert_eq!(el.text, "OK");
    assert_eq!(el.font, "default");
    assert_eq!(el.color.rgba8(), Rgba8::BLACK);
    assert_eq!(el.anchor, Anchor::TopLeft);
    assert_eq!(el.rotation, 0.0);
    assert_eq!(el.resolved_anchor(), (10, 10));
}

#[test]
fn unknown_keys_are_ignored() {
    let yaml = r##"
version: 3
canvas: { width: 64, height: 32, background: "#ffffff", dpi: 300 }
elements:
  - { text: A, x: 1, y: 2, kerning: tight }
exporter: blender
"##;
    let cfg = DecalConfig::from_yaml_str(yaml).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas.background.rgba8(), Rgba8::WHITE);
    assert_eq!(cfg.elements[0].size, DEFAULT_SIZE_PX);
}

#[test]
fn numeric_labels_are_accepted_as_text() {
    let yaml = "canvas: { width: 64, height: 32 }\nelements:\n  - { text: 4501, x: 0, y: 0 }\n";
    let cfg = DecalConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(cfg.elements[0].text, "4501");
}

#[test]
fn element_outside_canvas_is_named() {
    let yaml = r#"
canvas: { width: 200, height: 100 }
elements:
  - { text: "IN", x: 10, y: 10 }
  - { text: "OUT", x: 300, y: 10 }
"#;
    let cfg = DecalConfig::from_yaml_str(yaml).unwrap();
    let err = cfg.validate().unwrap_err();
    match &err {
        RepmarkError::Config { field, message } => {
            assert_eq!(field, "elements[1]");
            assert!(message.contains("OUT"), "{message}");
            assert!(message.contains("(300, 10)"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn coordinates_round_half_away_before_bounds_check() {
    let yaml = "canvas: { width: 10, height: 10 }\nelements:\n  - { text: a, x: 10.4, y: -0.4 }\n";
    let cfg = DecalConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(cfg.elements[0].resolved_anchor(), (10, 0));
    cfg.validate().unwrap();

    let yaml = "canvas: { width: 10, height: 10 }\nelements:\n  - { text: a, x: 10.5, y: 0 }\n";
    let cfg = DecalConfig::from_yaml_str(yaml).unwrap();
    assert!(cfg.validate().unwrap_err().is_config());
}

#[test]
fn invalid_fields_are_named() {
    let cases = [
        ("canvas: { width: 0, height: 10 }", "canvas.width"),
        ("canvas: { width: 10, height: -4 }", "canvas.height"),
        (
            "canvas: { width: 10, height: 10 }\nelements:\n  - { x: 1, y: 1 }",
            "elements[0].text",
        ),
        (
            "canvas: { width: 10, height: 10 }\nelements:\n  - { text: a, x: 1, y: 1, size: 0 }",
            "elements[0].size",
        ),
        (
            "canvas: { width: 10, height: 10 }\nelements:\n  - { text: a, x: 1, y: 1 }\n  - { text: b, x: 1, y: 1, font: '' }",
            "elements[1].font",
        ),
    ];
    for (yaml, want) in cases {
        let cfg = DecalConfig::from_yaml_str(yaml).unwrap();
        match cfg.validate().unwrap_err() {
            RepmarkError::Config { field, .. } => assert_eq!(field, want, "{yaml}"),
            other => panic!("unexpected error for {yaml}: {other}"),
        }
    }
}

#[test]
fn malformed_yaml_is_a_config_error() {
    let err = DecalConfig::from_yaml_str("canvas: [1, 2").unwrap_err();
    assert!(err.is_config());

    let err = DecalConfig::from_yaml_str("elements: []").unwrap_err();
    assert!(err.to_string().contains("canvas"), "{err}");
}

#[test]
fn anchor_names_parse_in_snake_case() {
    let yaml = "canvas: { width: 10, height: 10 }\nelements:\n  - { text: a, x: 5, y: 5, anchor: bottom_right }\n";
    let cfg = DecalConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(cfg.elements[0].anchor, Anchor::BottomRight);
    assert_eq!(Anchor::Center.fractions(), (0.5, 0.5));
}

#[test]
fn draw_bboxes_switch_accepts_words_and_numbers() {
    let parse = |v: &str| {
        DecalConfig::from_yaml_str(&format!(
            "canvas: {{ width: 8, height: 8 }}\ndraw_bboxes: {v}\n"
        ))
        .unwrap()
        .draw_bboxes
    };
    for on in ["true", "'yes'", "On", "'1'", "1"] {
        assert_eq!(parse(on), Some(true), "{on}");
    }
    for off in ["false", "'no'", "'False'", "0", "'maybe'"] {
        assert_eq!(parse(off), Some(false), "{off}");
    }
    assert_eq!(parse("null"), None);

    let absent = DecalConfig::from_yaml_str("canvas: { width: 8, height: 8 }\n").unwrap();
    assert_eq!(absent.draw_bboxes, None);
    assert!(!absent.wants_bbox_outlines());
}
