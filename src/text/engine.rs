use std::collections::HashMap;

use crate::{
    fonts::library::ResolvedFont,
    foundation::core::Rgba8,
    foundation::error::{RepmarkError, RepmarkResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Shaped, line-broken text ready for measuring and painting.
pub type TextLayout = parley::Layout<TextBrushRgba8>;

/// Stateful helper for building Parley text layouts from resolved font bytes.
///
/// Each distinct font is registered with Parley once; later layouts reuse the family.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<String, String>,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("registered_fonts", &self.families.len())
            .finish()
    }
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    /// Shape and lay out plain text. Hard line breaks in `text` start new lines; nothing is
    /// wrapped.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font_key: &str,
        font: &ResolvedFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> RepmarkResult<TextLayout> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RepmarkError::layout("text size must be finite and > 0"));
        }

        let family_name = self.family_for(font_key, font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: TextLayout = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    fn family_for(&mut self, font_key: &str, font: &ResolvedFont) -> RepmarkResult<String> {
        if let Some(name) = self.families.get(font_key) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.data.to_vec()), None);
        if families.is_empty() {
            return Err(RepmarkError::layout(format!(
                "font '{font_key}' registered no families"
            )));
        }

        let mut names = Vec::with_capacity(families.len());
        for (id, _) in &families {
            if let Some(name) = self.font_ctx.collection.family_name(*id) {
                names.push(name.to_string());
            }
        }
        let name = names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(&font.family))
            .or_else(|| names.first())
            .cloned()
            .ok_or_else(|| RepmarkError::layout(format!("font '{font_key}' family has no name")))?;

        self.families.insert(font_key.to_string(), name.clone());
        Ok(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
