use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use usvg::fontdb;

use crate::{
    config::model::{DEFAULT_FONT, DecalConfig},
    foundation::core::ElementId,
    foundation::error::{RepmarkError, RepmarkResult},
};

/// Family names tried, in order, when the database has no mapping for the generic
/// `sans-serif` family.
const SANS_FALLBACKS: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "Verdana",
];

#[derive(Clone, Debug, PartialEq, Eq)]
/// Parsed form of an element's `font` field.
pub enum FontRef {
    /// The host's default sans-serif face.
    Default,
    /// A CSS-style generic family.
    Generic(GenericFamily),
    /// A font file, relative to the configuration file unless absolute.
    File(PathBuf),
    /// A family name looked up in the font database.
    Named(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Generic families understood in `font` fields.
pub enum GenericFamily {
    /// `sans-serif`
    SansSerif,
    /// `serif`
    Serif,
    /// `monospace`
    Monospace,
}

impl FontRef {
    /// Classify a `font` field value.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        let lower = s.to_ascii_lowercase();
        if lower.is_empty() || lower == DEFAULT_FONT {
            return Self::Default;
        }
        match lower.as_str() {
            "sans-serif" | "sans" => return Self::Generic(GenericFamily::SansSerif),
            "serif" => return Self::Generic(GenericFamily::Serif),
            "monospace" | "mono" => return Self::Generic(GenericFamily::Monospace),
            _ => {}
        }
        if is_font_file_name(&lower) {
            return Self::File(PathBuf::from(s));
        }
        Self::Named(s.to_string())
    }
}

fn is_font_file_name(lower: &str) -> bool {
    [".ttf", ".otf", ".ttc"].iter().any(|ext| lower.ends_with(ext))
}

#[derive(Clone)]
/// Font bytes selected for a font reference, ready for shaping and rasterization.
pub struct ResolvedFont {
    /// Family name as recorded in the font's name table.
    pub family: String,
    /// Complete font file bytes.
    pub data: Arc<Vec<u8>>,
    /// Face index inside a collection file; `0` for single-face files.
    pub index: u32,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("family", &self.family)
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

#[derive(Clone, Debug, Default)]
/// Resolved fonts keyed by the exact `font` string used in the configuration.
pub struct FontSet {
    by_ref: BTreeMap<String, ResolvedFont>,
}

impl FontSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolved font under a `font` field value.
    pub fn insert(&mut self, font_ref: impl Into<String>, font: ResolvedFont) {
        self.by_ref.insert(font_ref.into(), font);
    }

    /// Lookup a previously resolved font.
    pub fn get(&self, font_ref: &str) -> RepmarkResult<&ResolvedFont> {
        self.by_ref
            .get(font_ref)
            .ok_or_else(|| RepmarkError::layout(format!("font '{font_ref}' was not resolved")))
    }

    /// Iterate `(font field value, resolved font)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedFont)> {
        self.by_ref.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct font references.
    pub fn len(&self) -> usize {
        self.by_ref.len()
    }

    /// Whether no font has been resolved.
    pub fn is_empty(&self) -> bool {
        self.by_ref.is_empty()
    }
}

/// Host font discovery on top of `fontdb`.
pub struct FontLibrary {
    db: fontdb::Database,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Empty library with no faces loaded.
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
        }
    }

    /// Library preloaded with the host's system fonts.
    pub fn with_system_fonts() -> Self {
        let mut lib = Self::new();
        lib.load_system_fonts();
        lib
    }

    /// Scan the platform font directories.
    pub fn load_system_fonts(&mut self) {
        self.db.load_system_fonts();
        tracing::debug!(faces = self.db.len(), "loaded system fonts");
    }

    /// Load every `.ttf`/`.otf`/`.ttc` file directly inside `dir`. Missing or unreadable
    /// directories are skipped. Returns the number of faces added.
    pub fn load_fonts_dir(&mut self, dir: &Path) -> usize {
        let before = self.db.len();
        let Ok(rd) = std::fs::read_dir(dir) else {
            tracing::warn!(dir = %dir.display(), "font directory is not readable; skipping");
            return 0;
        };

        let mut paths: Vec<PathBuf> = rd
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|s| s.to_str())
                    .is_some_and(|name| is_font_file_name(&name.to_ascii_lowercase()))
            })
            .collect();
        paths.sort();

        for path in paths {
            if let Err(e) = self.db.load_font_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
            }
        }
        let added = self.db.len() - before;
        tracing::debug!(dir = %dir.display(), added, "loaded font directory");
        added
    }

    /// Number of faces currently known.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Resolve one font reference. `base_dir` anchors relative font file paths.
    pub fn resolve(&self, font_ref: &FontRef, base_dir: &Path) -> Result<ResolvedFont, String> {
        match font_ref {
            FontRef::File(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                load_font_file(&path)
            }
            FontRef::Default => self
                .query(&[fontdb::Family::SansSerif])
                .or_else(|| self.first_named(SANS_FALLBACKS))
                .or_else(|| self.db.faces().next().map(|f| f.id))
                .ok_or_else(|| "no fonts are installed on this host".to_string())
                .and_then(|id| self.face_data(id)),
            FontRef::Generic(generic) => {
                let family = match generic {
                    GenericFamily::SansSerif => fontdb::Family::SansSerif,
                    GenericFamily::Serif => fontdb::Family::Serif,
                    GenericFamily::Monospace => fontdb::Family::Monospace,
                };
                let id = self.query(&[family]).or_else(|| match generic {
                    GenericFamily::SansSerif => self.first_named(SANS_FALLBACKS),
                    GenericFamily::Serif => {
                        self.first_named(&["DejaVu Serif", "Liberation Serif", "Noto Serif"])
                    }
                    GenericFamily::Monospace => self.first_named(&[
                        "DejaVu Sans Mono",
                        "Liberation Mono",
                        "Noto Sans Mono",
                    ]),
                });
                id.ok_or_else(|| format!("no {generic:?} font is installed on this host"))
                    .and_then(|id| self.face_data(id))
            }
            FontRef::Named(name) => self
                .query(&[fontdb::Family::Name(name)])
                .ok_or_else(|| format!("font family '{name}' is not installed"))
                .and_then(|id| self.face_data(id)),
        }
    }

    /// Resolve every distinct `font` value used by `config`, naming the first element that
    /// references an unresolvable font. Whitespace-only elements paint nothing and are skipped.
    #[tracing::instrument(skip_all, fields(faces = self.db.len()))]
    pub fn resolve_all(&self, config: &DecalConfig, base_dir: &Path) -> RepmarkResult<FontSet> {
        let mut set = FontSet::new();
        for (idx, el) in config.elements.iter().enumerate() {
            if el.is_blank() || set.by_ref.contains_key(&el.font) {
                continue;
            }
            let font = self
                .resolve(&FontRef::parse(&el.font), base_dir)
                .map_err(|msg| RepmarkError::config(format!("{}.font", ElementId(idx)), msg))?;
            tracing::debug!(font = %el.font, family = %font.family, "resolved font");
            set.insert(el.font.clone(), font);
        }
        Ok(set)
    }

    fn query(&self, families: &[fontdb::Family<'_>]) -> Option<fontdb::ID> {
        self.db.query(&fontdb::Query {
            families,
            ..fontdb::Query::default()
        })
    }

    fn first_named(&self, names: &[&str]) -> Option<fontdb::ID> {
        names
            .iter()
            .find_map(|name| self.query(&[fontdb::Family::Name(name)]))
    }

    fn face_data(&self, id: fontdb::ID) -> Result<ResolvedFont, String> {
        let family = self
            .db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        self.db
            .with_face_data(id, |data, index| ResolvedFont {
                family,
                data: Arc::new(data.to_vec()),
                index,
            })
            .ok_or_else(|| "font face data could not be read".to_string())
    }
}

fn load_font_file(path: &Path) -> Result<ResolvedFont, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("cannot read font file '{}': {e}", path.display()))?;

    let mut probe = fontdb::Database::new();
    probe.load_font_data(bytes.clone());
    let family = probe
        .faces()
        .next()
        .map(|face| {
            face.families
                .first()
                .map(|(name, _)| name.clone())
                .unwrap_or_else(|| "unknown".to_string())
        })
        .ok_or_else(|| format!("'{}' is not a usable font file", path.display()))?;

    Ok(ResolvedFont {
        family,
        data: Arc::new(bytes),
        index: 0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/library.rs"]
mod tests;
