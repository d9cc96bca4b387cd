//! # Text Rasterization
//!
//! Turns a string into a print-ready [`Raster`]: greedy word wrap against
//! font metrics, one line box per wrapped line, then inversion so that ink
//! becomes high values.
//!
//! ## Pipeline
//!
//! ```text
//! "Hello world again"
//!        │  wrap_lines (measure "word " per token)
//!        ▼
//! ["Hello world", "again"]
//!        │  rasterize_lines (line height = bbox of 'A')
//!        ▼
//! ┌──────────────────┐ 255 paper
//! │Hello world       │   0 ink
//! │again             │
//! └──────────────────┘
//!        │  invert
//!        ▼
//!   Raster (255 = print)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use catprint::text::{self, TtfFont};
//!
//! let font = TtfFont::load("fonts/DejaVuSans.ttf", 20.0)?;
//! let raster = text::render("Hello world", 384, &font)?;
//! assert_eq!(raster.width(), 384);
//! # Ok::<(), catprint::CatprintError>(())
//! ```

mod font;
mod wrap;

pub use font::{DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE, TtfFont};
pub use wrap::wrap_lines;

use std::path::Path;

use crate::error::CatprintError;
use crate::raster::{PAPER, Raster};

/// Glyph that defines the height of every line box.
pub const REFERENCE_GLYPH: char = 'A';

/// Measuring and drawing capability of a font at a fixed size.
pub trait GlyphRenderer {
    /// Advance width of `text` in pixels.
    fn measure_width(&self, text: &str) -> u32;

    /// Bottom edge of `glyph`'s ink, measured from the top of the line box.
    fn bounding_box_height(&self, glyph: char) -> u32;

    /// Draw one line of ink onto `raster` with the line box top at `top` and
    /// the left edge at x = 0. Pixels outside the raster are clipped.
    fn draw_line(&self, text: &str, raster: &mut Raster, top: u32);
}

/// Height of every line box for `font`.
pub fn line_height<F: GlyphRenderer + ?Sized>(font: &F) -> u32 {
    font.bounding_box_height(REFERENCE_GLYPH)
}

/// Draw already-wrapped lines onto fresh paper, without inversion.
///
/// The raster is `print_width` wide and exactly `lines.len()` line boxes
/// tall; ink from descenders may reach into the next line box and is clipped
/// at the bottom edge.
pub fn rasterize_lines<F: GlyphRenderer + ?Sized>(
    lines: &[String],
    print_width: usize,
    font: &F,
) -> Raster {
    let line_height = line_height(font);
    let height = line_height as usize * lines.len();
    let mut raster = Raster::new(print_width, height, PAPER);

    let mut top = 0u32;
    for line in lines {
        font.draw_line(line, &mut raster, top);
        top += line_height;
    }

    raster
}

/// Wrap and rasterize `text`, returning an inverted raster (255 = print).
///
/// Empty or all-space text produces zero lines and therefore a raster that
/// is `print_width` wide and zero pixels tall.
///
/// ## Errors
///
/// Returns [`CatprintError::InvalidWidth`] if `print_width` is zero.
pub fn render<F: GlyphRenderer + ?Sized>(
    text: &str,
    print_width: usize,
    font: &F,
) -> Result<Raster, CatprintError> {
    let budget = checked_width(print_width)?;
    let lines = wrap_lines(text, budget, font);
    let mut raster = rasterize_lines(&lines, print_width, font);
    raster.invert();
    Ok(raster)
}

/// Load `font_path` at `font_size`, render `text`, and release the font.
///
/// The width is validated before the font file is touched.
///
/// ## Errors
///
/// - [`CatprintError::InvalidWidth`] if `print_width` is zero
/// - [`CatprintError::FontLoad`] if the font cannot be read or parsed
pub fn render_with_font_path<P: AsRef<Path>>(
    text: &str,
    print_width: usize,
    font_path: P,
    font_size: f32,
) -> Result<Raster, CatprintError> {
    checked_width(print_width)?;
    let font = TtfFont::load(font_path, font_size)?;
    render(text, print_width, &font)
}

fn checked_width(print_width: usize) -> Result<u32, CatprintError> {
    if print_width == 0 {
        return Err(CatprintError::InvalidWidth(print_width));
    }
    u32::try_from(print_width).map_err(|_| CatprintError::InvalidWidth(print_width))
}

// ============================================================================
// TESTS
// ============================================================================
