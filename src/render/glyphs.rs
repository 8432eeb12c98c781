use std::collections::HashMap;

use crate::{
    fonts::library::ResolvedFont,
    foundation::core::Affine,
    foundation::error::{RepmarkError, RepmarkResult},
    text::engine::TextLayout,
};

/// Paints Parley layouts with `vello_cpu`, caching one `FontData` per font key.
#[derive(Default)]
pub(crate) struct GlyphPainter {
    font_cache: HashMap<String, vello_cpu::peniko::FontData>,
}

impl GlyphPainter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn font_data(&mut self, key: &str, font: &ResolvedFont) -> vello_cpu::peniko::FontData {
        if let Some(data) = self.font_cache.get(key) {
            return data.clone();
        }
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.data.as_ref().clone()),
            font.index,
        );
        self.font_cache.insert(key.to_string(), data.clone());
        data
    }

    /// Queue every glyph run of `layout` on `ctx`, each in its own brush color.
    pub(crate) fn fill_layout(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        layout: &TextLayout,
        key: &str,
        font: &ResolvedFont,
        transform: Affine,
    ) {
        let font = self.font_data(key, font);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(transform));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                // Positioned glyphs carry the run offset, advance and line baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize `layout` alone onto a transparent `width`x`height` surface and return its
    /// premultiplied RGBA8 pixels.
    pub(crate) fn rasterize_alone(
        &mut self,
        width: u32,
        height: u32,
        layout: &TextLayout,
        key: &str,
        font: &ResolvedFont,
        transform: Affine,
    ) -> RepmarkResult<Vec<u8>> {
        let (w, h) = surface_dims(width, height)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        self.fill_layout(&mut ctx, layout, key, font, transform);
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}

/// Convert pixel dimensions to the `u16` surface size `vello_cpu` expects.
pub(crate) fn surface_dims(width: u32, height: u32) -> RepmarkResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RepmarkError::render(format!("surface width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RepmarkError::render(format!("surface height {height} exceeds u16")))?;
    if w == 0 || h == 0 {
        return Err(RepmarkError::render("surface must be at least 1x1"));
    }
    Ok((w, h))
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}
