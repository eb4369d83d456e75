//! Process-wide font library.
//!
//! Faces are parsed once and shared through [`FontArc`]; a [`Font`] is a
//! face plus a pixel size and is cheap to clone. The DejaVu families are
//! embedded so rendering works without any font files on disk. A font
//! directory can override individual faces by file name, e.g.
//! `display-bold.otf` or `text-regular.ttf`.

use crate::error::AdError;
use ab_glyph::{FontArc, PxScale};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

const DISPLAY_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const DISPLAY_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
const DISPLAY_ITALIC: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Oblique.ttf");
const TEXT_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif.ttf");
const TEXT_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif-Bold.ttf");
const TEXT_ITALIC: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif-Italic.ttf");

static GLOBAL: OnceLock<FontLibrary> = OnceLock::new();

/// Typeface family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Headlines, titles and annotations
    Display,
    /// Body copy
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
    Italic,
}

/// A family/weight pair identifying one font file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontFace {
    pub family: FontFamily,
    pub weight: FontWeight,
}

impl FontFace {
    pub const DISPLAY_REGULAR: FontFace = FontFace::new(FontFamily::Display, FontWeight::Regular);
    pub const DISPLAY_BOLD: FontFace = FontFace::new(FontFamily::Display, FontWeight::Bold);
    pub const DISPLAY_ITALIC: FontFace = FontFace::new(FontFamily::Display, FontWeight::Italic);
    pub const TEXT_REGULAR: FontFace = FontFace::new(FontFamily::Text, FontWeight::Regular);
    pub const TEXT_BOLD: FontFace = FontFace::new(FontFamily::Text, FontWeight::Bold);
    pub const TEXT_ITALIC: FontFace = FontFace::new(FontFamily::Text, FontWeight::Italic);

    pub const ALL: [FontFace; 6] = [
        Self::DISPLAY_REGULAR,
        Self::DISPLAY_BOLD,
        Self::DISPLAY_ITALIC,
        Self::TEXT_REGULAR,
        Self::TEXT_BOLD,
        Self::TEXT_ITALIC,
    ];

    pub const fn new(family: FontFamily, weight: FontWeight) -> Self {
        Self { family, weight }
    }

    /// File stem used for override files, e.g. `display-bold`
    pub fn file_stem(&self) -> String {
        let family = match self.family {
            FontFamily::Display => "display",
            FontFamily::Text => "text",
        };
        let weight = match self.weight {
            FontWeight::Regular => "regular",
            FontWeight::Bold => "bold",
            FontWeight::Italic => "italic",
        };
        format!("{}-{}", family, weight)
    }

    fn embedded_data(&self) -> &'static [u8] {
        match (self.family, self.weight) {
            (FontFamily::Display, FontWeight::Regular) => DISPLAY_REGULAR,
            (FontFamily::Display, FontWeight::Bold) => DISPLAY_BOLD,
            (FontFamily::Display, FontWeight::Italic) => DISPLAY_ITALIC,
            (FontFamily::Text, FontWeight::Regular) => TEXT_REGULAR,
            (FontFamily::Text, FontWeight::Bold) => TEXT_BOLD,
            (FontFamily::Text, FontWeight::Italic) => TEXT_ITALIC,
        }
    }
}

/// A loaded face at a fixed pixel size
#[derive(Clone)]
pub struct Font {
    face: FontFace,
    size: f32,
    inner: FontArc,
}

impl Font {
    pub fn face(&self) -> FontFace {
        self.face
    }

    /// Pixel size (em height)
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn scale(&self) -> PxScale {
        PxScale::from(self.size)
    }

    pub(crate) fn arc(&self) -> &FontArc {
        &self.inner
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("face", &self.face)
            .field("size", &self.size)
            .finish()
    }
}

/// Cache of parsed font faces
#[derive(Default)]
pub struct FontLibrary {
    faces: RwLock<HashMap<FontFace, FontArc>>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide library, created on first use
    pub fn global() -> &'static FontLibrary {
        GLOBAL.get_or_init(FontLibrary::new)
    }

    /// Get `face` at `size` pixels, parsing the face on first use.
    pub fn font(&self, face: FontFace, size: f32) -> Result<Font, AdError> {
        if let Some(inner) = self.faces.read().get(&face) {
            return Ok(Font {
                face,
                size,
                inner: inner.clone(),
            });
        }

        let inner = FontArc::try_from_slice(face.embedded_data())
            .map_err(|e| AdError::Font(format!("embedded {}: {}", face.file_stem(), e)))?;

        // Another caller may have raced us; keep whichever landed first
        let inner = self.faces.write().entry(face).or_insert(inner).clone();
        Ok(Font { face, size, inner })
    }

    /// Replace faces with files found in `dir`.
    ///
    /// Looks for `<family>-<weight>.ttf` and `.otf`. Returns how many faces
    /// were replaced; faces without a file keep the embedded default.
    pub fn load_overrides(&self, dir: &Path) -> Result<usize, AdError> {
        if !dir.is_dir() {
            return Err(AdError::Font(format!(
                "font directory not found: {}",
                dir.display()
            )));
        }

        let mut loaded = 0;
        for face in FontFace::ALL {
            let stem = face.file_stem();
            let candidate = ["ttf", "otf"]
                .iter()
                .map(|ext| dir.join(format!("{}.{}", stem, ext)))
                .find(|p| p.is_file());

            let Some(path) = candidate else {
                continue;
            };

            let data = std::fs::read(&path)?;
            let inner = FontArc::try_from_vec(data)
                .map_err(|e| AdError::Font(format!("{}: {}", path.display(), e)))?;
            self.faces.write().insert(face, inner);
            debug!(face = %stem, path = %path.display(), "Loaded font override");
            loaded += 1;
        }

        info!(dir = %dir.display(), faces = loaded, "Font overrides installed");
        Ok(loaded)
    }
}

/// Shorthand for `FontLibrary::global().font(face, size)`
pub fn font(face: FontFace, size: f32) -> Result<Font, AdError> {
    FontLibrary::global().font(face, size)
}
