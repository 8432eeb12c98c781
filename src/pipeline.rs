use std::path::{Path, PathBuf};

use crate::{
    config::loader::{LoadOptions, LoadedConfig, load_config},
    export::artifacts::{ExportReport, export_artifacts},
    export::paths::OutputPaths,
    foundation::error::RepmarkResult,
    layout::engine::{BoundingBox, compute_layout},
    render::canvas::{RenderOptions, RenderedCanvas, render_decal},
};

#[derive(Clone, Debug, Default)]
/// Inputs of one end-to-end run.
pub struct PipelineOptions {
    /// Configuration file.
    pub config_path: PathBuf,
    /// Outline every bounding box in red.
    pub draw_bboxes: bool,
    /// Overrides the configuration's `output.dir`.
    pub out_dir: Option<PathBuf>,
    /// Font discovery options.
    pub load: LoadOptions,
}

#[derive(Clone, Debug)]
/// Result of a successful run.
pub struct PipelineOutcome {
    /// One box per element, in input order.
    pub boxes: Vec<BoundingBox>,
    /// Artifacts written.
    pub written: Vec<PathBuf>,
}

/// Layout and render an already-loaded configuration without touching the filesystem.
///
/// Outlines are drawn when either `opts` or the configuration's `draw_bboxes` asks for them.
pub fn render_loaded(
    loaded: &LoadedConfig,
    opts: &RenderOptions,
) -> RepmarkResult<(Vec<BoundingBox>, RenderedCanvas)> {
    let opts = RenderOptions {
        draw_bboxes: opts.draw_bboxes || loaded.config.wants_bbox_outlines(),
    };
    let layout = compute_layout(loaded)?;
    let canvas = render_decal(loaded, &layout, &opts)?;
    Ok((layout.boxes, canvas))
}

/// Layout, render and export an already-loaded configuration.
///
/// Export is best-effort: the returned report lists both the written and the failed
/// artifacts. Use [`ExportReport::into_result`] to turn failures into an error.
pub fn run_loaded(
    loaded: &LoadedConfig,
    opts: &RenderOptions,
    out_dir: Option<&Path>,
) -> RepmarkResult<(Vec<BoundingBox>, ExportReport)> {
    let (boxes, canvas) = render_loaded(loaded, opts)?;
    let paths = OutputPaths::resolve(&loaded.config.output, out_dir);
    let report = export_artifacts(&canvas, &paths);
    Ok((boxes, report))
}

/// Loader → layout → renderer → exporter.
///
/// Nothing is written when loading, layout or rendering fails. Any export failure makes the
/// run fail with [`crate::RepmarkError::Export`] after every artifact has been attempted.
#[tracing::instrument(skip_all, fields(config = %opts.config_path.display()))]
pub fn run_pipeline(opts: &PipelineOptions) -> RepmarkResult<PipelineOutcome> {
    let loaded = load_config(&opts.config_path, &opts.load)?;
    let render_opts = RenderOptions {
        draw_bboxes: opts.draw_bboxes,
    };
    let (boxes, report) = run_loaded(&loaded, &render_opts, opts.out_dir.as_deref())?;
    let written = report.into_result()?;
    Ok(PipelineOutcome { boxes, written })
}
