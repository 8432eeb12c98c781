//! Bounding-box computation.
//!
//! Every element is measured by rasterizing it on its own, so a box is exactly the set of
//! pixels the renderer will later paint for that element. Elements are placed by whole-pixel
//! translations only, which keeps the measured coverage and the final coverage identical.

use crate::{
    config::loader::LoadedConfig,
    config::model::TextElement,
    foundation::core::{Affine, ElementId, PixelRect, Rect},
    foundation::error::{RepmarkError, RepmarkResult},
    foundation::math::{alpha_coverage_bounds, round_half_away_from_zero},
    render::glyphs::GlyphPainter,
    text::engine::{TextLayout, TextLayoutEngine},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Pixel rectangle produced for one text element.
pub struct BoundingBox {
    /// Element the box belongs to.
    pub element: ElementId,
    /// Tight box around the element's painted pixels.
    pub rect: PixelRect,
}

/// A shaped element and where it is painted.
pub struct PlacedElement {
    /// Element this placement belongs to.
    pub element: ElementId,
    /// Shaped text; `None` for whitespace-only content, which paints nothing.
    pub text: Option<TextLayout>,
    /// Layout-space to canvas-space transform.
    pub transform: Affine,
}

impl std::fmt::Debug for PlacedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacedElement")
            .field("element", &self.element)
            .field("shaped", &self.text.is_some())
            .field("transform", &self.transform)
            .finish()
    }
}

#[derive(Debug)]
/// Output of [`compute_layout`].
pub struct DecalLayout {
    /// One placement per element, in input order.
    pub placements: Vec<PlacedElement>,
    /// One box per element, in input order.
    pub boxes: Vec<BoundingBox>,
    /// Every pair of elements whose boxes share a pixel, `(earlier, later)`.
    pub overlaps: Vec<(ElementId, ElementId)>,
}

/// Extent of an element's ink before placement, in layout pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InkBox {
    pub(crate) rect: PixelRect,
}

/// Compute a bounding box for every element of `loaded`.
///
/// Elements are processed independently: overlapping boxes are reported, never moved.
#[tracing::instrument(skip_all, fields(elements = loaded.config.elements.len()))]
pub fn compute_layout(loaded: &LoadedConfig) -> RepmarkResult<DecalLayout> {
    let mut engine = TextLayoutEngine::new();
    let mut painter = GlyphPainter::new();

    let mut placements = Vec::with_capacity(loaded.config.elements.len());
    let mut boxes = Vec::with_capacity(loaded.config.elements.len());

    for (idx, el) in loaded.config.elements.iter().enumerate() {
        let id = ElementId(idx);
        let (placement, bbox) = place_element(loaded, &mut engine, &mut painter, id, el)?;
        tracing::debug!(element = %id, bbox = %bbox.rect, "placed element");

        if !loaded.canvas.rect().contains_rect(&bbox.rect) {
            tracing::warn!(
                element = %id,
                text = %el.preview(),
                bbox = %bbox.rect,
                "element extends past the canvas edge"
            );
        }
        placements.push(placement);
        boxes.push(bbox);
    }

    let overlaps = find_overlaps(&boxes);
    for (a, b) in &overlaps {
        tracing::warn!(first = %a, second = %b, "bounding boxes overlap");
    }

    Ok(DecalLayout {
        placements,
        boxes,
        overlaps,
    })
}

fn place_element(
    loaded: &LoadedConfig,
    engine: &mut TextLayoutEngine,
    painter: &mut GlyphPainter,
    id: ElementId,
    el: &TextElement,
) -> RepmarkResult<(PlacedElement, BoundingBox)> {
    let (x, y) = el.resolved_anchor();
    let (x, y) = (to_i32(x, id)?, to_i32(y, id)?);

    if el.is_blank() {
        return Ok((
            PlacedElement {
                element: id,
                text: None,
                transform: Affine::translate((f64::from(x), f64::from(y))),
            },
            BoundingBox {
                element: id,
                rect: PixelRect::empty_at(x, y),
            },
        ));
    }

    let font = loaded.fonts.get(&el.font)?;
    let layout = engine.layout_plain(
        &el.text,
        &el.font,
        font,
        el.size_px(),
        el.color.rgba8().into(),
    )?;

    let local = Affine::rotate(el.rotation.to_radians());
    let ink = measure_ink(painter, &layout, &el.font, font, el.size, local)?.ok_or_else(|| {
        RepmarkError::layout(format!(
            "{id} ('{}') renders no visible glyphs with font '{}'",
            el.preview(),
            font.family
        ))
    })?;

    let (ax, ay) = anchor_point(ink.rect, el.anchor.fractions());
    let (dx, dy) = (x - ax, y - ay);

    Ok((
        PlacedElement {
            element: id,
            text: Some(layout),
            transform: Affine::translate((f64::from(dx), f64::from(dy))) * local,
        },
        BoundingBox {
            element: id,
            rect: ink.rect.translated(dx, dy),
        },
    ))
}

/// Rasterize `layout` under `local` on a scratch surface and return the coverage box in
/// layout pixels, or `None` if nothing was painted.
pub(crate) fn measure_ink(
    painter: &mut GlyphPainter,
    layout: &TextLayout,
    font_key: &str,
    font: &crate::fonts::library::ResolvedFont,
    size_px: f64,
    local: Affine,
) -> RepmarkResult<Option<InkBox>> {
    // Glyph outlines may overhang the advance box on every side.
    let pad = size_px.ceil() + 2.0;
    let advance = Rect::new(
        -pad,
        -pad,
        f64::from(layout.width()) + pad,
        f64::from(layout.height()) + pad,
    );
    let bounds = local.transform_rect_bbox(advance);
    let (origin_x, origin_y) = (bounds.x0.floor(), bounds.y0.floor());
    let width = (bounds.x1.ceil() - origin_x).max(1.0);
    let height = (bounds.y1.ceil() - origin_y).max(1.0);
    if width > f64::from(u16::MAX) || height > f64::from(u16::MAX) {
        return Err(RepmarkError::layout(format!(
            "text extent {width}x{height} exceeds the rasterizer limit"
        )));
    }
    let (width, height) = (width as u32, height as u32);

    let to_scratch = Affine::translate((-origin_x, -origin_y)) * local;
    let pixels = painter.rasterize_alone(width, height, layout, font_key, font, to_scratch)?;

    Ok(
        alpha_coverage_bounds(&pixels, width, height).map(|(x0, y0, x1, y1)| {
            let (ox, oy) = (origin_x as i32, origin_y as i32);
            InkBox {
                rect: PixelRect::new(
                    x0 as i32 + ox,
                    y0 as i32 + oy,
                    x1 as i32 + ox,
                    y1 as i32 + oy,
                ),
            }
        }),
    )
}

/// Point of `rect` at the given fractions of its size, rounded to whole pixels.
pub(crate) fn anchor_point(rect: PixelRect, (fx, fy): (f64, f64)) -> (i32, i32) {
    let x = f64::from(rect.x_min) + fx * f64::from(rect.width());
    let y = f64::from(rect.y_min) + fy * f64::from(rect.height());
    (
        round_half_away_from_zero(x) as i32,
        round_half_away_from_zero(y) as i32,
    )
}

/// Every pair of boxes sharing at least one pixel, in `(earlier, later)` order.
pub(crate) fn find_overlaps(boxes: &[BoundingBox]) -> Vec<(ElementId, ElementId)> {
    let mut out = Vec::new();
    for (i, a) in boxes.iter().enumerate() {
        for b in &boxes[i + 1..] {
            if a.rect.overlaps(&b.rect) {
                out.push((a.element, b.element));
            }
        }
    }
    out
}

fn to_i32(v: i64, id: ElementId) -> RepmarkResult<i32> {
    i32::try_from(v).map_err(|_| RepmarkError::layout(format!("{id} position {v} overflows")))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
