//! # Printer Configuration
//!
//! This module defines hardware specifications for supported cat thermal
//! printers.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Resolution | Paper |
//! |-------|--------------|------------|-------|
//! | GB01 | 384 | 200 DPI | 57mm |
//! | GB02 | 384 | 200 DPI | 57mm |
//! | GB03 | 384 | 200 DPI | 57mm |
//!
//! ## Usage
//!
//! ```
//! use catprint::printer::PrinterConfig;
//!
//! let config = PrinterConfig::GB03;
//! println!("Print width: {} dots ({} bytes)",
//!          config.width_dots,
//!          config.width_bytes);
//! ```

/// # Printer Configuration
///
/// Defines the hardware characteristics of a cat thermal printer.
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// width_mm = width_dots / dots_per_mm
///
/// For GB03:
///   dots_per_mm = 200 / 25.4 ≈ 7.87
///   width_mm = 384 / 7.87 ≈ 48.8mm
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printer model name, as advertised over BLE
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Print width in bytes (width_dots / 8)
    pub width_bytes: u16,

    /// Resolution in dots per inch
    pub dpi: u16,
}

impl PrinterConfig {
    pub const GB01: Self = Self {
        name: "GB01",
        width_dots: 384,
        width_bytes: 48,
        dpi: 200,
    };

    pub const GB02: Self = Self {
        name: "GB02",
        width_dots: 384,
        width_bytes: 48,
        dpi: 200,
    };

    /// # GB03
    ///
    /// The most common model; also the default.
    ///
    /// ```text
    /// ├─ 4mm ─┼──── ~48mm printable ────┼─ 4mm ─┤
    /// │margin │        384 dots         │margin │
    /// ```
    pub const GB03: Self = Self {
        name: "GB03",
        width_dots: 384,
        width_bytes: 48,
        dpi: 200,
    };

    /// All known models.
    pub const ALL: [Self; 3] = [Self::GB01, Self::GB02, Self::GB03];

    /// Look up a model by its advertised name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|config| config.name.eq_ignore_ascii_case(name))
    }

    /// Print width in dots as a `usize`, for raster dimensions.
    #[inline]
    pub fn print_width(&self) -> usize {
        self.width_dots as usize
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    /// Convert a length in dots (e.g. raster rows) to millimeters of paper
    #[inline]
    pub fn dots_to_mm(&self, dots: usize) -> f32 {
        dots as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::GB03
    }
}

// ============================================================================
// TESTS
// ============================================================================
