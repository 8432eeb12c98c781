use crate::{
    config::loader::LoadedConfig,
    config::model::TextElement,
    foundation::core::{ElementId, PixelRect, Rgba8},
    foundation::error::{RepmarkError, RepmarkResult},
    layout::engine::{BoundingBox, DecalLayout},
    render::glyphs::{GlyphPainter, surface_dims},
};

/// Stroke color of bounding-box outlines.
pub const OUTLINE_COLOR: Rgba8 = Rgba8::RED;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Renderer switches.
pub struct RenderOptions {
    /// Outline every bounding box after all text has been painted.
    pub draw_bboxes: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A box as handed to the exporter: the element's text plus its rectangle.
pub struct RenderedEntry {
    /// Element the entry describes.
    pub element: ElementId,
    /// Element content as configured.
    pub text: String,
    /// Bounding box in canvas pixels.
    pub rect: PixelRect,
}

#[derive(Clone, Debug)]
/// Rendered decal sheet plus the boxes that describe it.
pub struct RenderedCanvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major **premultiplied** RGBA8 pixels.
    pub data: Vec<u8>,
    /// One entry per element, in input order.
    pub entries: Vec<RenderedEntry>,
}

impl RenderedCanvas {
    /// Premultiplied RGBA8 pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Paint the background, every element in input order and, optionally, box outlines.
///
/// Later elements are composited source-over on top of earlier ones.
#[tracing::instrument(skip_all, fields(draw_bboxes = opts.draw_bboxes))]
pub fn render_decal(
    loaded: &LoadedConfig,
    layout: &DecalLayout,
    opts: &RenderOptions,
) -> RepmarkResult<RenderedCanvas> {
    if layout.boxes.len() != loaded.config.elements.len()
        || layout.placements.len() != loaded.config.elements.len()
    {
        return Err(RepmarkError::render(format!(
            "layout has {} boxes for {} elements",
            layout.boxes.len(),
            loaded.config.elements.len()
        )));
    }

    let canvas = loaded.canvas;
    let (w, h) = surface_dims(canvas.width, canvas.height)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);

    let bg = loaded.config.canvas.background.rgba8();
    if bg.a > 0 {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));
    }

    let mut painter = GlyphPainter::new();
    for placement in &layout.placements {
        let Some(text) = &placement.text else {
            continue;
        };
        let el = loaded.config.element(placement.element).ok_or_else(|| {
            RepmarkError::render(format!("no configured element {}", placement.element))
        })?;
        let font = loaded.fonts.get(&el.font)?;
        painter.fill_layout(&mut ctx, text, &el.font, font, placement.transform);
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    let mut data = pixmap.data_as_u8_slice().to_vec();

    if opts.draw_bboxes {
        for b in &layout.boxes {
            draw_outline(&mut data, canvas.width, canvas.height, b.rect, OUTLINE_COLOR);
        }
    }

    let entries = describe_boxes(&layout.boxes, &loaded.config.elements);

    tracing::info!(
        width = canvas.width,
        height = canvas.height,
        elements = layout.placements.len(),
        "rendered decal sheet"
    );

    Ok(RenderedCanvas {
        width: canvas.width,
        height: canvas.height,
        data,
        entries,
    })
}

/// Pair every box with its element's text, in box order.
pub fn describe_boxes(boxes: &[BoundingBox], elements: &[TextElement]) -> Vec<RenderedEntry> {
    boxes
        .iter()
        .filter_map(|b| {
            elements.get(b.element.0).map(|el| RenderedEntry {
                element: b.element,
                text: el.text.clone(),
                rect: b.rect,
            })
        })
        .collect()
}

/// Overwrite the single-pixel perimeter of `rect` with `color`, clipped to the buffer.
///
/// The perimeter is the outermost ring of pixels inside `rect`; empty rectangles draw nothing.
pub fn draw_outline(data: &mut [u8], width: u32, height: u32, rect: PixelRect, color: Rgba8) {
    if rect.is_empty() {
        return;
    }
    let px = color.premultiplied().to_array();
    let (w, h) = (width as i32, height as i32);
    let mut put = |x: i32, y: i32| {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            let i = (y as usize * width as usize + x as usize) * 4;
            data[i..i + 4].copy_from_slice(&px);
        }
    };

    let (x0, y0, x1, y1) = (rect.x_min, rect.y_min, rect.x_max - 1, rect.y_max - 1);
    for x in x0..=x1 {
        put(x, y0);
        put(x, y1);
    }
    for y in y0..=y1 {
        put(x0, y);
        put(x1, y);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
