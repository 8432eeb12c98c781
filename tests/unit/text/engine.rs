use std::path::Path;

use super::*;
use crate::fonts::library::{FontLibrary, FontRef};

fn default_font() -> Option<ResolvedFont> {
    let lib = FontLibrary::with_system_fonts();
    if lib.face_count() == 0 {
        eprintln!("skipping: no system fonts available");
        return None;
    }
    lib.resolve(&FontRef::parse("default"), Path::new(".")).ok()
}

#[test]
fn brush_takes_color_channels() {
    let b = TextBrushRgba8::from(Rgba8 {
        r: 1,
        g: 2,
        b: 3,
        a: 4,
    });
    assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 4));
}

#[test]
fn rejects_non_positive_size() {
    let Some(font) = default_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    for size in [0.0, -3.0, f32::NAN] {
        match engine.layout_plain("x", "default", &font, size, TextBrushRgba8::default()) {
            Err(RepmarkError::Layout(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("size {size} was accepted"),
        }
    }
}

#[test]
fn hard_breaks_produce_lines_without_wrapping() {
    let Some(font) = default_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let one = engine
        .layout_plain(
            "a fairly long single line of text",
            "default",
            &font,
            16.0,
            TextBrushRgba8::default(),
        )
        .unwrap();
    assert_eq!(one.lines().count(), 1);

    let two = engine
        .layout_plain("top\nbottom", "default", &font, 16.0, TextBrushRgba8::default())
        .unwrap();
    assert_eq!(two.lines().count(), 2);
    assert!(two.height() > one.height());
}

#[test]
fn family_is_registered_once_per_font_key() {
    let Some(font) = default_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let first = engine.family_for("default", &font).unwrap();
    let second = engine.family_for("default", &font).unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.families.len(), 1);
}
