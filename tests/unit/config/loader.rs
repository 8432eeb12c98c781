use super::*;

fn no_system_fonts() -> LoadOptions {
    LoadOptions {
        system_fonts: false,
        font_dirs: Vec::new(),
    }
}

#[test]
fn missing_file_is_a_config_error() {
    let err = load_config(Path::new("no/such/decal.yaml"), &no_system_fonts()).unwrap_err();
    match err {
        RepmarkError::Config { field, message } => {
            assert!(field.contains("decal.yaml"), "{field}");
            assert!(message.contains("cannot read"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn structural_errors_win_over_font_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decal.yaml");
    std::fs::write(
        &path,
        "canvas: { width: 200, height: 100 }\nelements:\n  - { text: far, x: 300, y: 10, font: nowhere.ttf }\n",
    )
    .unwrap();

    let err = load_config(&path, &no_system_fonts()).unwrap_err();
    match err {
        RepmarkError::Config { field, .. } => assert_eq!(field, "elements[0]"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unresolvable_font_is_named() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decal.yaml");
    std::fs::write(
        &path,
        "canvas: { width: 20, height: 20 }\nfonts_dir: fonts\nelements:\n  - { text: a, x: 1, y: 1, font: missing.otf }\n",
    )
    .unwrap();

    let err = load_config(&path, &no_system_fonts()).unwrap_err();
    assert!(err.to_string().contains("elements[0].font"), "{err}");
}

#[test]
fn empty_element_list_needs_no_fonts() {
    let mut lib = FontLibrary::new();
    let loaded = LoadedConfig::from_yaml_str(
        "canvas: { width: 32, height: 16 }\nelements: []\n",
        ".",
        &mut lib,
    )
    .unwrap();
    assert_eq!(loaded.canvas, Canvas { width: 32, height: 16 });
    assert!(loaded.fonts.is_empty());
}

#[test]
fn blank_elements_need_no_fonts() {
    let mut lib = FontLibrary::new();
    let loaded = LoadedConfig::from_yaml_str(
        "canvas: { width: 32, height: 16 }\nelements:\n  - { text: '   ', x: 2, y: 2, font: Nonexistent Family }\n",
        ".",
        &mut lib,
    )
    .unwrap();
    assert!(loaded.fonts.is_empty());
}

#[test]
fn placement_errors_win_over_font_errors() {
    let mut lib = FontLibrary::new();
    let err = LoadedConfig::from_yaml_str(
        "canvas: { width: 20, height: 20 }\nelements:\n  - { text: far, x: 40, y: 1, font: missing.otf }\n",
        ".",
        &mut lib,
    )
    .unwrap_err();
    match err {
        RepmarkError::Config { field, .. } => assert_eq!(field, "elements[0]"),
        other => panic!("unexpected error: {other}"),
    }
}
