//! Font resolution strategies.
//!
//! Invoices are set in a single family with a regular and a bold face. Where those faces
//! come from is decided by a [FontResolver] handed to the renderer, so the layout code
//! never touches the filesystem itself.

use crate::error::RenderError;
use crate::font::{Font, FontFaces};
use crate::standard_fonts::StandardFont;
use std::path::{Path, PathBuf};

/// Produces the regular and bold faces an invoice is drawn with
pub trait FontResolver {
    fn resolve(&self) -> Result<FontFaces, RenderError>;
}

/// The PDF standard Helvetica / Helvetica-Bold pair. Needs no font files and never fails,
/// but only covers text representable in WinAnsiEncoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardFonts;

impl FontResolver for StandardFonts {
    fn resolve(&self) -> Result<FontFaces, RenderError> {
        Ok(FontFaces {
            regular: Font::standard(StandardFont::Helvetica),
            bold: Font::standard(StandardFont::HelveticaBold),
        })
    }
}

/// A regular / bold pair of font files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPair {
    pub regular: PathBuf,
    pub bold: PathBuf,
}

/// Ordered list of font file pairs; the first pair whose files both exist wins
#[derive(Debug, Default, Clone)]
pub struct CandidatePaths {
    candidates: Vec<FontPair>,
}

impl CandidatePaths {
    pub fn new() -> CandidatePaths {
        CandidatePaths::default()
    }

    /// Append a candidate pair
    pub fn with_pair<P: Into<PathBuf>, Q: Into<PathBuf>>(mut self, regular: P, bold: Q) -> Self {
        self.candidates.push(FontPair {
            regular: regular.into(),
            bold: bold.into(),
        });
        self
    }

    /// Append a pair of files living in `dir`, typically next to the program using them
    pub fn beside<D: AsRef<Path>>(self, dir: D, regular: &str, bold: &str) -> Self {
        let dir = dir.as_ref();
        self.with_pair(dir.join(regular), dir.join(bold))
    }

    /// Append the usual system locations of Arial and its metric-compatible stand-ins on
    /// Windows, macOS and Linux
    pub fn with_system_fallbacks(self) -> Self {
        self.with_pair(r"C:\Windows\Fonts\arial.ttf", r"C:\Windows\Fonts\arialbd.ttf")
            .with_pair(
                "/Library/Fonts/Arial.ttf",
                "/Library/Fonts/Arial Bold.ttf",
            )
            .with_pair(
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            )
            .with_pair(
                "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
                "/usr/share/fonts/truetype/msttcorefonts/Arial_Bold.ttf",
            )
            .with_pair(
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            )
            .with_pair(
                "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
                "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
            )
            .with_pair(
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            )
    }

    pub fn candidates(&self) -> &[FontPair] {
        &self.candidates
    }
}

impl FontResolver for CandidatePaths {
    fn resolve(&self) -> Result<FontFaces, RenderError> {
        for pair in self.candidates.iter() {
            if !(pair.regular.is_file() && pair.bold.is_file()) {
                tracing::debug!(
                    regular = %pair.regular.display(),
                    bold = %pair.bold.display(),
                    "font candidate missing"
                );
                continue;
            }

            tracing::debug!(regular = %pair.regular.display(), "loading font pair");
            return Ok(FontFaces {
                regular: Font::load(std::fs::read(&pair.regular)?)?,
                bold: Font::load(std::fs::read(&pair.bold)?)?,
            });
        }

        Err(RenderError::FontNotFound {
            searched: self
                .candidates
                .iter()
                .flat_map(|pair| [pair.regular.clone(), pair.bold.clone()])
                .collect(),
        })
    }
}
