//! TTF font loading and rasterization via ab_glyph.
//!
//! A [`TtfFont`] is loaded explicitly from a file path and a size, then
//! passed by reference wherever text is measured or drawn. The underlying
//! `FontArc` is immutable and reference counted, so a loaded font can be
//! cloned cheaply and shared across threads; nothing is cached between calls.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};

use super::GlyphRenderer;
use crate::error::CatprintError;
use crate::raster::Raster;

/// Bundled default font (DejaVu Sans), shipped in `fonts/` next to the crate
/// manifest.
pub const DEFAULT_FONT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fonts/DejaVuSans.ttf");

/// Default font size in pixels per em.
pub const DEFAULT_FONT_SIZE: f32 = 20.0;

/// A TrueType/OpenType font at a fixed size.
#[derive(Clone)]
pub struct TtfFont {
    font: FontArc,
    scale: PxScale,
    size: f32,
}

impl std::fmt::Debug for TtfFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfFont")
            .field("size", &self.size)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl TtfFont {
    /// Load a font file at `size` pixels per em.
    ///
    /// ## Errors
    ///
    /// Returns [`CatprintError::FontLoad`] if the file cannot be read, is
    /// not a parseable font, or `size` is not a positive number.
    pub fn load<P: AsRef<Path>>(path: P, size: f32) -> Result<Self, CatprintError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| font_error(path, e.to_string()))?;
        Self::from_bytes(bytes, size).map_err(|reason| font_error(path, reason))
    }

    fn from_bytes(bytes: Vec<u8>, size: f32) -> Result<Self, String> {
        if !(size.is_finite() && size > 0.0) {
            return Err(format!("invalid font size {}", size));
        }
        let font = FontArc::try_from_vec(bytes).map_err(|e| e.to_string())?;
        let units_per_em = font
            .units_per_em()
            .ok_or_else(|| "font has no units-per-em".to_string())?;

        // ab_glyph scales by ascent-to-descent height; convert from em size
        let scale = PxScale::from(size * font.height_unscaled() / units_per_em);

        Ok(Self { font, scale, size })
    }

    fn glyph_ids(&self, text: &str) -> impl Iterator<Item = GlyphId> {
        text.chars().map(|ch| self.font.glyph_id(ch))
    }
}

fn font_error(path: &Path, reason: String) -> CatprintError {
    CatprintError::FontLoad {
        path: PathBuf::from(path),
        reason,
    }
}

impl GlyphRenderer for TtfFont {
    fn measure_width(&self, text: &str) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0f32;
        let mut prev: Option<GlyphId> = None;

        for id in self.glyph_ids(text) {
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }

        width.ceil().max(0.0) as u32
    }

    fn bounding_box_height(&self, glyph: char) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let ascent = scaled.ascent();
        let positioned = self
            .font
            .glyph_id(glyph)
            .with_scale_and_position(self.scale, point(0.0, ascent));

        match self.font.outline_glyph(positioned) {
            Some(outlined) => outlined.px_bounds().max.y.ceil().max(0.0) as u32,
            // Blank glyph: the line box still reaches the baseline
            None => ascent.ceil().max(0.0) as u32,
        }
    }

    fn draw_line(&self, text: &str, raster: &mut Raster, top: u32) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = top as f32 + scaled.ascent();
        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;

        for id in self.glyph_ids(text) {
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            prev = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;
                    raster.darken(x, y, coverage);
                });
            }
        }
    }
}
