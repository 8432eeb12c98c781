use super::*;

#[test]
fn canvas_rejects_zero_and_oversized_edges() {
    assert!(Canvas::new(200, 100).is_ok());

    let err = Canvas::new(0, 100).unwrap_err();
    assert!(err.to_string().contains("canvas.width"));

    let err = Canvas::new(200, 70_000).unwrap_err();
    assert!(err.to_string().contains("canvas.height"));
}

#[test]
fn canvas_contains_is_edge_inclusive() {
    let c = Canvas::new(200, 100).unwrap();
    assert!(c.contains(0, 0));
    assert!(c.contains(200, 100));
    assert!(!c.contains(201, 0));
    assert!(!c.contains(-1, 50));
    assert!(!c.contains(300, 10));
}

#[test]
fn premultiply_rounds_to_nearest() {
    let p = Rgba8::new(255, 128, 0, 128).premultiplied();
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::RED.premultiplied().to_array(), [255, 0, 0, 255]);
}

#[test]
fn pixel_rect_overlap_ignores_touching_and_empty() {
    let a = PixelRect::new(0, 0, 10, 10);
    let touching = PixelRect::new(10, 0, 20, 10);
    let crossing = PixelRect::new(5, 5, 15, 15);
    let empty = PixelRect::empty_at(5, 5);

    assert!(!a.overlaps(&touching));
    assert!(a.overlaps(&crossing));
    assert!(!a.overlaps(&empty));
    assert_eq!(a.intersect(&crossing), Some(PixelRect::new(5, 5, 10, 10)));
}

#[test]
fn pixel_rect_normalizes_and_formats() {
    let r = PixelRect::new(12, 9, 3, 1);
    assert_eq!(r.to_array(), [3, 1, 12, 9]);
    assert_eq!(r.to_string(), "3,1,12,9");
    assert_eq!(r.translated(2, -1).to_array(), [5, 0, 14, 8]);
    assert_eq!(r.area(), 72);
}
