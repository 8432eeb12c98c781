use std::path::PathBuf;

use crate::export::paths::ArtifactKind;

/// Convenience result type used across repmark.
pub type RepmarkResult<T> = Result<T, RepmarkError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum RepmarkError {
    /// Malformed or missing configuration, invalid field values or an unresolvable font.
    #[error("config error: {field}: {message}")]
    Config {
        /// Path of the offending field, e.g. `elements[2].font`.
        field: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// Text shaping or measurement failed for an element.
    #[error("layout error: {0}")]
    Layout(String),

    /// The rasterizer could not produce the requested surface.
    #[error("render error: {0}")]
    Render(String),

    /// One or more output artifacts could not be written.
    #[error("export error: {}", describe_failures(.failures))]
    Export {
        /// Every artifact that failed, in the order the exporter attempted them.
        failures: Vec<ExportFailure>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single artifact the exporter failed to produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFailure {
    /// Which artifact failed.
    pub artifact: ArtifactKind,
    /// Target path of the artifact.
    pub path: PathBuf,
    /// Why the write failed.
    pub reason: String,
}

impl RepmarkError {
    /// Build a [`RepmarkError::Config`] value.
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a [`RepmarkError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`RepmarkError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Returns `true` for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns `true` for export errors.
    pub fn is_export(&self) -> bool {
        matches!(self, Self::Export { .. })
    }
}

fn describe_failures(failures: &[ExportFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} '{}': {}", f.artifact, f.path.display(), f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
