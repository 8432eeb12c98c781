use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    config::color::ColorDef,
    foundation::core::{Canvas, ElementId, Rgba8},
    foundation::error::{RepmarkError, RepmarkResult},
    foundation::math::round_half_away_from_zero,
};

/// Font reference used when an element does not name one.
pub const DEFAULT_FONT: &str = "default";
/// Font size in pixels used when an element does not give one.
pub const DEFAULT_SIZE_PX: f64 = 12.0;

#[derive(Clone, Debug, Deserialize)]
/// Root of a decal sheet description.
///
/// Parsed from YAML; unknown keys anywhere in the document are ignored. A parsed value is not
/// guaranteed to be valid until [`DecalConfig::validate`] has succeeded.
pub struct DecalConfig {
    /// Canvas size and background.
    pub canvas: CanvasSpec,
    /// Extra directory scanned for `.ttf`/`.otf`/`.ttc` files, relative to the config file.
    #[serde(default)]
    pub fonts_dir: Option<PathBuf>,
    /// Output locations; every artifact falls back to its default name in the working directory.
    #[serde(default)]
    pub output: OutputSpec,
    /// Outline every bounding box in red. Combined with the CLI's `--draw-bboxes` by OR;
    /// `"true"`, `"yes"`, `"on"` and `"1"` are accepted as well as booleans.
    #[serde(default, deserialize_with = "deserialize_switch")]
    pub draw_bboxes: Option<bool>,
    /// Text elements, painted in this order.
    #[serde(default)]
    pub elements: Vec<TextElement>,
}

#[derive(Clone, Debug, Deserialize)]
/// Canvas dimensions and fill.
pub struct CanvasSpec {
    /// Width in pixels; must be a positive integer.
    pub width: i64,
    /// Height in pixels; must be a positive integer.
    pub height: i64,
    /// Background fill. Defaults to fully transparent.
    #[serde(default = "default_background")]
    pub background: ColorDef,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Optional overrides for where the three artifacts are written.
pub struct OutputSpec {
    /// Directory the artifact names are joined onto.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Rendered PNG (default `decalresult.png`).
    #[serde(default)]
    pub image: Option<PathBuf>,
    /// Plain-text bounding-box listing (default `decalresult_bboxes.txt`).
    #[serde(default)]
    pub bboxes_txt: Option<PathBuf>,
    /// JSON bounding-box document (default `decalresult_bboxes.json`).
    #[serde(default)]
    pub bboxes_json: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
/// One label on the decal sheet.
pub struct TextElement {
    /// Content to render. Numbers and booleans are accepted and rendered as written.
    #[serde(default, deserialize_with = "deserialize_label")]
    pub text: String,
    /// Anchor x coordinate in canvas pixels.
    pub x: f64,
    /// Anchor y coordinate in canvas pixels.
    pub y: f64,
    /// Font reference: `default`, a generic family, a family name or a font file path.
    #[serde(default = "default_font")]
    pub font: String,
    /// Font size in pixels.
    #[serde(default = "default_size")]
    pub size: f64,
    /// Text color. Defaults to opaque black.
    #[serde(default = "default_text_color")]
    pub color: ColorDef,
    /// Clockwise rotation in degrees around the layout origin.
    #[serde(default)]
    pub rotation: f64,
    /// Which point of the rendered ink box is placed at `(x, y)`.
    #[serde(default)]
    pub anchor: Anchor,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Reference point of an element's ink box that is pinned to the configured `(x, y)`.
pub enum Anchor {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Middle of the top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    Left,
    /// Center.
    Center,
    /// Middle of the right edge.
    Right,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    Bottom,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Horizontal and vertical position of the anchor as fractions of the box size.
    pub fn fractions(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::Top => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::Left => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::Right => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }
}

fn default_background() -> ColorDef {
    ColorDef(Rgba8::TRANSPARENT)
}

fn default_text_color() -> ColorDef {
    ColorDef(Rgba8::BLACK)
}

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

fn default_size() -> f64 {
    DEFAULT_SIZE_PX
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(s) => s,
        Label::Int(v) => v.to_string(),
        Label::Float(v) => v.to_string(),
        Label::Bool(v) => v.to_string(),
    })
}

fn deserialize_switch<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Switch {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(Option::<Switch>::deserialize(deserializer)?.map(|v| match v {
        Switch::Bool(b) => b,
        Switch::Int(i) => i != 0,
        Switch::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
    }))
}

impl TextElement {
    /// Whether the content is empty or consists only of whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// `(x, y)` rounded to whole pixels.
    pub fn resolved_anchor(&self) -> (i64, i64) {
        (
            round_half_away_from_zero(self.x),
            round_half_away_from_zero(self.y),
        )
    }

    /// Font size as the `f32` the shaper consumes.
    pub fn size_px(&self) -> f32 {
        self.size as f32
    }

    /// Short, single-line preview of the content for messages.
    pub fn preview(&self) -> String {
        const MAX: usize = 24;
        let flat: String = self
            .text
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        if flat.chars().count() > MAX {
            format!("{}...", flat.chars().take(MAX).collect::<String>())
        } else {
            flat
        }
    }
}

impl DecalConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> RepmarkResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            let field = e
                .location()
                .map(|loc| format!("line {} column {}", loc.line(), loc.column()))
                .unwrap_or_else(|| "<document>".to_string());
            RepmarkError::config(field, e.to_string())
        })
    }

    /// Validated canvas dimensions.
    pub fn canvas(&self) -> RepmarkResult<Canvas> {
        let width = u32::try_from(self.canvas.width)
            .map_err(|_| RepmarkError::config("canvas.width", "must be a positive integer"))?;
        let height = u32::try_from(self.canvas.height)
            .map_err(|_| RepmarkError::config("canvas.height", "must be a positive integer"))?;
        Canvas::new(width, height)
    }

    /// Whether the configuration itself asks for bounding-box outlines.
    pub fn wants_bbox_outlines(&self) -> bool {
        self.draw_bboxes.unwrap_or(false)
    }

    /// Element by id, if it exists.
    pub fn element(&self, id: ElementId) -> Option<&TextElement> {
        self.elements.get(id.0)
    }

    /// Structural validation. Font references are checked separately when fonts are resolved.
    pub fn validate(&self) -> RepmarkResult<()> {
        let canvas = self.canvas()?;

        for (idx, el) in self.elements.iter().enumerate() {
            let id = ElementId(idx);
            if el.text.is_empty() {
                return Err(RepmarkError::config(
                    format!("{id}.text"),
                    "must be non-empty",
                ));
            }
            for (name, v) in [("x", el.x), ("y", el.y), ("rotation", el.rotation)] {
                if !v.is_finite() {
                    return Err(RepmarkError::config(
                        format!("{id}.{name}"),
                        "must be a finite number",
                    ));
                }
            }
            if !el.size.is_finite() || el.size <= 0.0 {
                return Err(RepmarkError::config(
                    format!("{id}.size"),
                    "must be finite and > 0",
                ));
            }
            if el.font.trim().is_empty() {
                return Err(RepmarkError::config(
                    format!("{id}.font"),
                    "must be non-empty",
                ));
            }

            let (x, y) = el.resolved_anchor();
            if !canvas.contains(x, y) {
                return Err(RepmarkError::config(
                    id.to_string(),
                    format!(
                        "element '{}' is positioned at ({x}, {y}), outside the {}x{} canvas",
                        el.preview(),
                        canvas.width,
                        canvas.height
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
