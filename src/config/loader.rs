use std::path::{Path, PathBuf};

use crate::{
    config::model::DecalConfig,
    fonts::library::{FontLibrary, FontSet},
    foundation::core::Canvas,
    foundation::error::{RepmarkError, RepmarkResult},
};

#[derive(Clone, Debug)]
/// Knobs for [`load_config`].
pub struct LoadOptions {
    /// Scan the platform font directories.
    pub system_fonts: bool,
    /// Additional font directories, searched after the config's own `fonts_dir`.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
/// A validated configuration with every font reference resolved.
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: DecalConfig,
    /// Validated canvas size.
    pub canvas: Canvas,
    /// Directory relative font paths were resolved against.
    pub base_dir: PathBuf,
    /// Fonts keyed by `font` field value.
    pub fonts: FontSet,
}

impl LoadedConfig {
    /// Validate `config` and pair it with already-resolved fonts.
    pub fn new(
        config: DecalConfig,
        base_dir: impl Into<PathBuf>,
        fonts: FontSet,
    ) -> RepmarkResult<Self> {
        config.validate()?;
        Self::assemble(config, base_dir.into(), fonts)
    }

    /// Pair an already-validated `config` with its fonts.
    fn assemble(config: DecalConfig, base_dir: PathBuf, fonts: FontSet) -> RepmarkResult<Self> {
        let canvas = config.canvas()?;
        Ok(Self {
            config,
            canvas,
            base_dir,
            fonts,
        })
    }

    /// Parse, validate and resolve fonts for an in-memory YAML document.
    pub fn from_yaml_str(
        yaml: &str,
        base_dir: impl Into<PathBuf>,
        library: &mut FontLibrary,
    ) -> RepmarkResult<Self> {
        let base_dir = base_dir.into();
        let config = DecalConfig::from_yaml_str(yaml)?;
        config.validate()?;
        if let Some(dir) = &config.fonts_dir {
            library.load_fonts_dir(&base_dir.join(dir));
        }
        let fonts = library.resolve_all(&config, &base_dir)?;
        Self::assemble(config, base_dir, fonts)
    }
}

/// Read, parse and validate the configuration at `path`.
///
/// Structural problems (bad canvas size, element outside the canvas, ...) are reported before
/// any font lookup, so they never depend on what the host has installed.
#[tracing::instrument(skip(opts), fields(path = %path.display()))]
pub fn load_config(path: &Path, opts: &LoadOptions) -> RepmarkResult<LoadedConfig> {
    let yaml = std::fs::read_to_string(path).map_err(|e| {
        RepmarkError::config(
            path.display().to_string(),
            format!("cannot read configuration: {e}"),
        )
    })?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut library = FontLibrary::new();
    if opts.system_fonts {
        library.load_system_fonts();
    }
    for dir in &opts.font_dirs {
        library.load_fonts_dir(dir);
    }

    let loaded = LoadedConfig::from_yaml_str(&yaml, base_dir, &mut library)?;
    tracing::info!(
        width = loaded.canvas.width,
        height = loaded.canvas.height,
        elements = loaded.config.elements.len(),
        fonts = loaded.fonts.len(),
        "loaded configuration"
    );
    Ok(loaded)
}

#[cfg(test)]
#[path = "../../tests/unit/config/loader.rs"]
mod tests;
