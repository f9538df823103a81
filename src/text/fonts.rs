use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::{
    error::{CarouselError, CarouselResult},
    math::Fnv1a64,
};

/// Logical font resources the page layouts draw with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Title page heading.
    Title,
    /// Point number label.
    Number,
    /// Point body text.
    Point,
}

/// Where a font candidate's bytes come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    /// A font file, relative paths resolving against the asset root.
    File { path: PathBuf },
    /// A system font family: `sans-serif`, `serif`, `monospace`, or a family name.
    System { family: String },
}

/// One entry of a font fallback chain.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontCandidate {
    pub source: FontSource,
    pub size_px: f32,
}

impl FontCandidate {
    pub fn file(path: impl Into<PathBuf>, size_px: f32) -> Self {
        Self {
            source: FontSource::File { path: path.into() },
            size_px,
        }
    }

    pub fn system(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            source: FontSource::System {
                family: family.into(),
            },
            size_px,
        }
    }
}

#[derive(Clone)]
enum FaceData {
    Outline {
        bytes: Arc<Vec<u8>>,
        family: String,
        id: u64,
    },
    Builtin,
}

/// Borrowed view of an outline face's font data.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Outline<'a> {
    pub bytes: &'a Arc<Vec<u8>>,
    pub family: &'a str,
    /// Content hash of `bytes`; faces sharing a family name still get distinct ids.
    pub id: u64,
}

/// A resolved (face, size) pair.
///
/// Outline faces are shaped with Parley and drawn as glyph runs. The built-in face needs no font
/// data at all: it has fixed block metrics and draws each character as a filled box, so layout
/// always has something to measure and paint.
#[derive(Clone)]
pub struct FontFace {
    data: FaceData,
    size_px: f32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("FontFace");
        match &self.data {
            FaceData::Outline { bytes, family, .. } => s
                .field("family", family)
                .field("font_bytes_len", &bytes.len()),
            FaceData::Builtin => s.field("family", &"builtin"),
        };
        s.field("size_px", &self.size_px).finish()
    }
}

impl FontFace {
    /// Built-in block face at `size_px`.
    pub fn builtin(size_px: f32) -> Self {
        Self {
            data: FaceData::Builtin,
            size_px: sanitize_size(size_px),
        }
    }

    /// Outline face from raw font bytes; fails if Parley cannot register a family from them.
    pub fn from_bytes(bytes: Vec<u8>, size_px: f32) -> CarouselResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CarouselError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &bytes)?;
        let mut hasher = Fnv1a64::new_default();
        hasher.write_bytes(&bytes);
        Ok(Self {
            data: FaceData::Outline {
                bytes: Arc::new(bytes),
                family,
                id: hasher.finish(),
            },
            size_px,
        })
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.data, FaceData::Builtin)
    }

    /// Family name reported by the font data, or `builtin`.
    pub fn family(&self) -> &str {
        match &self.data {
            FaceData::Outline { family, .. } => family,
            FaceData::Builtin => "builtin",
        }
    }

    pub(crate) fn outline(&self) -> Option<Outline<'_>> {
        match &self.data {
            FaceData::Outline { bytes, family, id } => Some(Outline {
                bytes,
                family,
                id: *id,
            }),
            FaceData::Builtin => None,
        }
    }
}

fn sanitize_size(size_px: f32) -> f32 {
    if size_px.is_finite() && size_px > 0.0 {
        size_px
    } else {
        FontBundle::DEFAULT_BUILTIN_SIZE
    }
}

/// Register `bytes` with `font_ctx` and return the first family name it provides.
pub(crate) fn register_family(
    font_ctx: &mut parley::FontContext,
    bytes: &[u8],
) -> CarouselResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| CarouselError::font("no font families registered from font bytes"))?;

    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| CarouselError::font("registered font family has no name"))
}

/// Immutable set of the three resolved faces, loaded once and shared read-only by every render.
#[derive(Clone, Debug)]
pub struct FontBundle {
    pub title: FontFace,
    pub number: FontFace,
    pub point: FontFace,
}

impl FontBundle {
    const DEFAULT_BUILTIN_SIZE: f32 = 32.0;

    /// Resolve every role through its fallback chain. Never fails: a role whose candidates are all
    /// unusable gets the built-in face at the first candidate's size.
    #[tracing::instrument(skip_all, fields(root = %root.display()))]
    pub fn load(
        title: &[FontCandidate],
        number: &[FontCandidate],
        point: &[FontCandidate],
        root: &Path,
    ) -> Self {
        let mut system = SystemFonts::default();
        Self {
            title: resolve_role(FontRole::Title, title, root, &mut system),
            number: resolve_role(FontRole::Number, number, root, &mut system),
            point: resolve_role(FontRole::Point, point, root, &mut system),
        }
    }

    /// Bundle made only of the built-in face, at the default role sizes.
    pub fn builtin() -> Self {
        Self {
            title: FontFace::builtin(72.0),
            number: FontFace::builtin(34.0),
            point: FontFace::builtin(38.0),
        }
    }

    pub fn get(&self, role: FontRole) -> &FontFace {
        match role {
            FontRole::Title => &self.title,
            FontRole::Number => &self.number,
            FontRole::Point => &self.point,
        }
    }
}

fn resolve_role(
    role: FontRole,
    candidates: &[FontCandidate],
    root: &Path,
    system: &mut SystemFonts,
) -> FontFace {
    for candidate in candidates {
        match load_candidate(candidate, root, system) {
            Ok(face) => {
                tracing::debug!(
                    ?role,
                    family = face.family(),
                    size_px = face.size_px,
                    "font resolved"
                );
                return face;
            }
            Err(e) => {
                tracing::debug!(
                    ?role,
                    source = ?candidate.source,
                    error = %e,
                    "font candidate unusable"
                );
            }
        }
    }

    let size = candidates
        .first()
        .map(|c| c.size_px)
        .unwrap_or(FontBundle::DEFAULT_BUILTIN_SIZE);
    tracing::warn!(?role, size_px = size, "no usable font candidate, using built-in face");
    FontFace::builtin(size)
}

fn load_candidate(
    candidate: &FontCandidate,
    root: &Path,
    system: &mut SystemFonts,
) -> CarouselResult<FontFace> {
    let bytes = match &candidate.source {
        FontSource::File { path } => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            };
            std::fs::read(&path)
                .with_context(|| format!("read font bytes from '{}'", path.display()))?
        }
        FontSource::System { family } => system.face_bytes(family, root)?,
    };
    FontFace::from_bytes(bytes, candidate.size_px)
}

/// Lazily populated system font database, only built if a `System` candidate is reached.
#[derive(Default)]
struct SystemFonts {
    db: Option<usvg::fontdb::Database>,
}

impl SystemFonts {
    fn face_bytes(&mut self, family: &str, root: &Path) -> CarouselResult<Vec<u8>> {
        let db = self.db.get_or_insert_with(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            load_fonts_from_dir(&mut db, &root.join("fonts"));
            db
        });

        let families = [
            match family.to_ascii_lowercase().as_str() {
                "sans-serif" | "sans" => usvg::fontdb::Family::SansSerif,
                "serif" => usvg::fontdb::Family::Serif,
                "monospace" => usvg::fontdb::Family::Monospace,
                _ => usvg::fontdb::Family::Name(family),
            },
        ];
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight::NORMAL,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };

        let id = db
            .query(&query)
            .ok_or_else(|| CarouselError::font(format!("no system font for family '{family}'")))?;
        // Glyph runs are drawn from face index 0 of the blob.
        if db.face(id).is_some_and(|f| f.index != 0) {
            return Err(CarouselError::font(format!(
                "system font for '{family}' is not the first face of its collection"
            )));
        }
        db.with_face_data(id, |data, _| data.to_vec())
            .ok_or_else(|| CarouselError::font(format!("system font for '{family}' has no data")))
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
