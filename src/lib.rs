//! repmark renders decal sheets: images of positioned text labels, described in YAML.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `YAML -> LoadedConfig` (validated [`DecalConfig`] plus resolved fonts)
//! 2. **Layout**: `LoadedConfig -> DecalLayout` (one [`BoundingBox`] per element, input order)
//! 3. **Render**: `LoadedConfig + DecalLayout -> RenderedCanvas` (premultiplied RGBA8)
//! 4. **Export**: `RenderedCanvas -> decalresult.png, decalresult_bboxes.txt,
//!    decalresult_bboxes.json`
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same configuration and fonts give byte-identical box outputs.
//! - **Measured boxes**: a bounding box is the tight box around the pixels the element
//!   paints, measured by rasterizing the element on its own.
//! - **Best-effort export**: each artifact is attempted independently.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod export;
mod fonts;
mod foundation;
mod layout;
mod pipeline;
mod render;
mod text;

pub use config::color::{ColorDef, parse_color_str};
pub use config::loader::{LoadOptions, LoadedConfig, load_config};
pub use config::model::{
    Anchor, CanvasSpec, DEFAULT_FONT, DEFAULT_SIZE_PX, DecalConfig, OutputSpec, TextElement,
};
pub use export::artifacts::{
    BboxRecord, ExportReport, encode_png, ensure_parent_dir, export_artifacts,
    format_bbox_document, format_bbox_listing,
};
pub use export::paths::{
    ArtifactKind, DEFAULT_BBOX_JSON_NAME, DEFAULT_BBOX_TXT_NAME, DEFAULT_IMAGE_NAME, OutputPaths,
};
pub use fonts::library::{FontLibrary, FontRef, FontSet, GenericFamily, ResolvedFont};
pub use foundation::core::{Canvas, ElementId, PixelRect, Rgba8, Rgba8Premul};
pub use foundation::error::{ExportFailure, RepmarkError, RepmarkResult};
pub use foundation::math::round_half_away_from_zero;
pub use layout::engine::{BoundingBox, DecalLayout, PlacedElement, compute_layout};
pub use pipeline::{PipelineOptions, PipelineOutcome, render_loaded, run_loaded, run_pipeline};
pub use render::canvas::{
    OUTLINE_COLOR, RenderOptions, RenderedCanvas, RenderedEntry, describe_boxes, draw_outline,
    render_decal,
};
pub use text::engine::{TextBrushRgba8, TextLayout, TextLayoutEngine};
