use std::path::{Path, PathBuf};

use crate::config::model::OutputSpec;

/// Default file name of the rendered image.
pub const DEFAULT_IMAGE_NAME: &str = "decalresult.png";
/// Default file name of the plain-text bounding-box listing.
pub const DEFAULT_BBOX_TXT_NAME: &str = "decalresult_bboxes.txt";
/// Default file name of the JSON bounding-box document.
pub const DEFAULT_BBOX_JSON_NAME: &str = "decalresult_bboxes.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The three artifacts produced by one run.
pub enum ArtifactKind {
    /// Rendered PNG.
    Image,
    /// Tab-separated text listing.
    BboxText,
    /// JSON document.
    BboxJson,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::BboxText => "bbox listing",
            Self::BboxJson => "bbox document",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where each artifact is written.
pub struct OutputPaths {
    /// PNG target.
    pub image: PathBuf,
    /// Text listing target.
    pub bboxes_txt: PathBuf,
    /// JSON document target.
    pub bboxes_json: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::in_dir(Path::new(""))
    }
}

impl OutputPaths {
    /// Default artifact names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            image: dir.join(DEFAULT_IMAGE_NAME),
            bboxes_txt: dir.join(DEFAULT_BBOX_TXT_NAME),
            bboxes_json: dir.join(DEFAULT_BBOX_JSON_NAME),
        }
    }

    /// Apply the configuration's `output` section. `dir_override` (the CLI's `--out-dir`)
    /// replaces `output.dir`. Relative paths stay relative to the working directory; absolute
    /// per-artifact paths ignore the directory.
    pub fn resolve(spec: &OutputSpec, dir_override: Option<&Path>) -> Self {
        let dir = dir_override
            .map(Path::to_path_buf)
            .or_else(|| spec.dir.clone())
            .unwrap_or_default();
        let pick = |custom: &Option<PathBuf>, default_name: &str| match custom {
            Some(p) => dir.join(p),
            None => dir.join(default_name),
        };
        Self {
            image: pick(&spec.image, DEFAULT_IMAGE_NAME),
            bboxes_txt: pick(&spec.bboxes_txt, DEFAULT_BBOX_TXT_NAME),
            bboxes_json: pick(&spec.bboxes_json, DEFAULT_BBOX_JSON_NAME),
        }
    }

    /// Target of one artifact.
    pub fn get(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Image => &self.image,
            ArtifactKind::BboxText => &self.bboxes_txt,
            ArtifactKind::BboxJson => &self.bboxes_json,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/paths.rs"]
mod tests;
