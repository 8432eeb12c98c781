use std::{
    io::{Cursor, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    export::paths::{ArtifactKind, OutputPaths},
    foundation::error::{ExportFailure, RepmarkError, RepmarkResult},
    foundation::math::unpremultiply_rgba8_in_place,
    render::canvas::{RenderedCanvas, RenderedEntry},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
/// One entry of `decalresult_bboxes.json`. Field names and order are a public contract.
pub struct BboxRecord {
    /// Element content.
    pub text: String,
    /// `[x_min, y_min, x_max, y_max]`.
    pub bbox: [i32; 4],
}

#[derive(Clone, Debug, Default)]
/// Outcome of [`export_artifacts`]: what was written and what failed.
pub struct ExportReport {
    /// Artifacts written successfully, in the order they were attempted.
    pub written: Vec<(ArtifactKind, PathBuf)>,
    /// Artifacts that could not be written.
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// Whether every artifact was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Written paths, or [`RepmarkError::Export`] listing every failure.
    pub fn into_result(self) -> RepmarkResult<Vec<PathBuf>> {
        if self.failures.is_empty() {
            Ok(self.written.into_iter().map(|(_, p)| p).collect())
        } else {
            Err(RepmarkError::Export {
                failures: self.failures,
            })
        }
    }
}

/// Write the image, the text listing and the JSON document.
///
/// Each artifact is attempted regardless of the others; earlier successes are kept when a
/// later artifact fails. A failed artifact never leaves a partial file at its target path.
#[tracing::instrument(skip_all, fields(entries = canvas.entries.len()))]
pub fn export_artifacts(canvas: &RenderedCanvas, paths: &OutputPaths) -> ExportReport {
    let mut report = ExportReport::default();

    for kind in [
        ArtifactKind::Image,
        ArtifactKind::BboxText,
        ArtifactKind::BboxJson,
    ] {
        let path = paths.get(kind);
        let result = match kind {
            ArtifactKind::Image => encode_png(canvas),
            ArtifactKind::BboxText => Ok(format_bbox_listing(&canvas.entries).into_bytes()),
            ArtifactKind::BboxJson => format_bbox_document(&canvas.entries).map(String::into_bytes),
        }
        .and_then(|bytes| write_atomic(path, &bytes).map_err(RepmarkError::from));

        match result {
            Ok(()) => {
                tracing::info!(artifact = %kind, path = %path.display(), "wrote artifact");
                report.written.push((kind, path.to_path_buf()));
            }
            Err(e) => {
                tracing::error!(artifact = %kind, path = %path.display(), error = %e, "artifact failed");
                report.failures.push(ExportFailure {
                    artifact: kind,
                    path: path.to_path_buf(),
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    report
}

/// Encode the canvas as a straight-alpha RGBA8 PNG.
pub fn encode_png(canvas: &RenderedCanvas) -> RepmarkResult<Vec<u8>> {
    let expected = canvas.width as usize * canvas.height as usize * 4;
    if canvas.data.len() != expected {
        return Err(RepmarkError::render(format!(
            "canvas buffer holds {} bytes, expected {expected}",
            canvas.data.len()
        )));
    }

    let mut straight = canvas.data.clone();
    unpremultiply_rgba8_in_place(&mut straight);

    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &straight,
        canvas.width,
        canvas.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode png")?;
    Ok(out.into_inner())
}

/// Render the text listing: `<content>\t<x_min>,<y_min>,<x_max>,<y_max>` per line.
///
/// Backslashes, tabs and line breaks in the content are escaped so every element stays on
/// exactly one line.
pub fn format_bbox_listing(entries: &[RenderedEntry]) -> String {
    let mut out = String::new();
    for e in entries {
        out.push_str(&escape_listing_text(&e.text));
        out.push('\t');
        out.push_str(&e.rect.to_string());
        out.push('\n');
    }
    out
}

/// Render the JSON document: an array of [`BboxRecord`] in input order, newline-terminated.
pub fn format_bbox_document(entries: &[RenderedEntry]) -> RepmarkResult<String> {
    let records: Vec<BboxRecord> = entries
        .iter()
        .map(|e| BboxRecord {
            text: e.text.clone(),
            bbox: e.rect.to_array(),
        })
        .collect();
    let mut json = serde_json::to_string_pretty(&records)
        .context("serialize bounding boxes")
        .map_err(RepmarkError::from)?;
    json.push('\n');
    Ok(json)
}

fn escape_listing_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `bytes` to a temporary file beside `path`, then rename it into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temporary file in '{}'", dir.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("write '{}'", path.display()))?;
    tmp.flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    // Temporary files are created owner-only; artifacts should read like any other output.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("set permissions on '{}'", path.display()))?;
    }
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("move output into '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/artifacts.rs"]
mod tests;
