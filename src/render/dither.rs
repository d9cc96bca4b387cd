//! # Binarization
//!
//! Converts greyscale images to the two-level rasters the printer needs.
//!
//! ## Algorithms
//!
//! | Name | Kind | Notes |
//! |------|------|-------|
//! | `mean-threshold` | Global threshold | Threshold is the image's mean brightness |
//! | `floyd-steinberg` | Error diffusion | Default; 4 neighbours |
//! | `atkinson` | Error diffusion | Diffuses 6/8 of the error; crisper highlights |
//! | `halftone` | Ordered (Bayer 8×8) | Regular screen, no error accumulation |
//! | `none` | Fixed threshold at 128 | For images already prepared for the printer |
//!
//! ## Intensity Convention
//!
//! Internally every algorithm works on *intensity*: 0.0 = white paper,
//! 1.0 = solid black. Output rasters use the print convention: 255 = print
//! a dot, 0 = blank.
//!
//! ## The Bayer Matrix
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │32 │ 8 │40 │ 2 │34 │10 │42 │
//! 1 │48 │16 │56 │24 │50 │18 │58 │26 │
//! 2 │12 │44 │ 4 │36 │14 │46 │ 6 │38 │
//! 3 │60 │28 │52 │20 │62 │30 │54 │22 │
//! 4 │ 3 │35 │11 │43 │ 1 │33 │ 9 │41 │
//! 5 │51 │19 │59 │27 │49 │17 │57 │25 │
//! 6 │15 │47 │ 7 │39 │13 │45 │ 5 │37 │
//! 7 │63 │31 │55 │23 │61 │29 │53 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! Values are normalized to thresholds with `(value + 0.5) / 64.0`.

use std::fmt;
use std::str::FromStr;

use image::GrayImage;

use crate::error::CatprintError;
use crate::raster::Raster;

/// Bayer 8x8 dithering matrix
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Binarization algorithm for image printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binarization {
    MeanThreshold,
    #[default]
    FloydSteinberg,
    Atkinson,
    Halftone,
    None,
}

impl Binarization {
    pub const ALL: [Self; 5] = [
        Self::MeanThreshold,
        Self::FloydSteinberg,
        Self::Atkinson,
        Self::Halftone,
        Self::None,
    ];

    /// Canonical CLI name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MeanThreshold => "mean-threshold",
            Self::FloydSteinberg => "floyd-steinberg",
            Self::Atkinson => "atkinson",
            Self::Halftone => "halftone",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Binarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Binarization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean-threshold" | "mean_threshold" | "mean" => Ok(Self::MeanThreshold),
            "floyd-steinberg" | "floyd_steinberg" | "fs" => Ok(Self::FloydSteinberg),
            "atkinson" => Ok(Self::Atkinson),
            "halftone" | "bayer" => Ok(Self::Halftone),
            "none" | "threshold" => Ok(Self::None),
            other => Err(format!(
                "Unknown binarization '{}'. Use one of: {}",
                other,
                Self::ALL.map(|b| b.name()).join(", ")
            )),
        }
    }
}

/// Get the ordered-dither threshold for a pixel position, in (0, 1).
#[inline]
pub fn threshold(x: usize, y: usize) -> f32 {
    let matrix_value = BAYER8[y & 7][x & 7];
    (matrix_value as f32 + 0.5) / 64.0
}

/// Whether a dot prints at `(x, y)` under ordered dithering.
///
/// ```
/// use catprint::render::dither::should_print;
///
/// assert!(should_print(0, 0, 1.0));
/// assert!(!should_print(0, 0, 0.0));
/// ```
#[inline]
pub fn should_print(x: usize, y: usize, intensity: f32) -> bool {
    intensity > threshold(x, y)
}

/// Intensity of a greyscale pixel (0.0 = white, 1.0 = black).
#[inline]
fn intensity(luma: u8) -> f32 {
    1.0 - luma as f32 / 255.0
}

#[inline]
fn dot(print: bool) -> u8 {
    if print { 255 } else { 0 }
}

/// Binarize a greyscale image, returning a raster with 255 = print.
pub fn binarize(img: &GrayImage, algorithm: Binarization) -> Result<Raster, CatprintError> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let levels: Vec<f32> = img.as_raw().iter().map(|&l| intensity(l)).collect();

    let dots = match algorithm {
        Binarization::MeanThreshold => mean_threshold(&levels),
        Binarization::FloydSteinberg => diffuse(&levels, width, height, &FLOYD_STEINBERG, 16.0),
        Binarization::Atkinson => diffuse(&levels, width, height, &ATKINSON, 8.0),
        Binarization::Halftone => levels
            .iter()
            .enumerate()
            .map(|(i, &v)| dot(should_print(i % width.max(1), i / width.max(1), v)))
            .collect(),
        Binarization::None => img.as_raw().iter().map(|&l| dot(l < 128)).collect(),
    };

    Raster::from_data(width, height, dots)
}

fn mean_threshold(levels: &[f32]) -> Vec<u8> {
    if levels.is_empty() {
        return Vec::new();
    }
    let mean = levels.iter().sum::<f32>() / levels.len() as f32;
    levels.iter().map(|&v| dot(v > mean)).collect()
}

/// Error diffusion kernel entry: (dx, dy, weight).
type Kernel = [(i32, i32, f32)];

const FLOYD_STEINBERG: [(i32, i32, f32); 4] = [(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)];

const ATKINSON: [(i32, i32, f32); 6] = [
    (1, 0, 1.0),
    (2, 0, 1.0),
    (-1, 1, 1.0),
    (0, 1, 1.0),
    (1, 1, 1.0),
    (0, 2, 1.0),
];

fn diffuse(levels: &[f32], width: usize, height: usize, kernel: &Kernel, divisor: f32) -> Vec<u8> {
    let mut buf = levels.to_vec();
    let mut out = vec![0u8; levels.len()];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = buf[idx];
            let print = old >= 0.5;
            out[idx] = dot(print);

            let error = old - if print { 1.0 } else { 0.0 };
            for &(dx, dy, weight) in kernel {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx >= 0 && (nx as usize) < width && (ny as usize) < height {
                    buf[ny as usize * width + nx as usize] += error * weight / divisor;
                }
            }
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
