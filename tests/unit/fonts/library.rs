use super::*;

#[test]
fn font_refs_are_classified() {
    assert_eq!(FontRef::parse("default"), FontRef::Default);
    assert_eq!(FontRef::parse("  Default "), FontRef::Default);
    assert_eq!(
        FontRef::parse("serif"),
        FontRef::Generic(GenericFamily::Serif)
    );
    assert_eq!(
        FontRef::parse("fonts/Stencil.TTF"),
        FontRef::File(PathBuf::from("fonts/Stencil.TTF"))
    );
    assert_eq!(
        FontRef::parse("DejaVu Sans"),
        FontRef::Named("DejaVu Sans".to_string())
    );
}

#[test]
fn empty_library_cannot_resolve_default() {
    let lib = FontLibrary::new();
    let err = lib.resolve(&FontRef::Default, Path::new(".")).unwrap_err();
    assert!(err.contains("no fonts"), "{err}");
}

#[test]
fn missing_font_file_is_reported_with_path() {
    let lib = FontLibrary::new();
    let err = lib
        .resolve(
            &FontRef::File(PathBuf::from("does-not-exist.ttf")),
            Path::new("some/config/dir"),
        )
        .unwrap_err();
    assert!(err.contains("does-not-exist.ttf"), "{err}");
}

#[test]
fn non_font_bytes_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();

    let lib = FontLibrary::new();
    let err = lib
        .resolve(&FontRef::File(PathBuf::from("fake.ttf")), dir.path())
        .unwrap_err();
    assert!(err.contains("not a usable font"), "{err}");
}

#[test]
fn resolve_all_names_the_offending_element() {
    let cfg = DecalConfig::from_yaml_str(
        "canvas: { width: 10, height: 10 }\nelements:\n  - { text: a, x: 1, y: 1, font: missing.ttf }\n",
    )
    .unwrap();
    let err = FontLibrary::new()
        .resolve_all(&cfg, Path::new("."))
        .unwrap_err();
    match err {
        RepmarkError::Config { field, .. } => assert_eq!(field, "elements[0].font"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreadable_font_dir_adds_nothing() {
    let mut lib = FontLibrary::new();
    assert_eq!(lib.load_fonts_dir(Path::new("no/such/fonts/dir")), 0);
    assert_eq!(lib.face_count(), 0);
}
