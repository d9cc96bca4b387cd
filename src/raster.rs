//! # Raster Buffer
//!
//! A single-channel, row-major pixel grid. Both the text rasterizer and the
//! image binarizer produce a [`Raster`], and the command encoder consumes one.
//!
//! ## Pixel Convention
//!
//! While text is being drawn the buffer holds "paper" values: 255 is blank
//! paper and ink pulls pixels towards 0. Before a raster leaves the text or
//! image stage it is inverted, so finished rasters read:
//!
//! ```text
//! 0   = leave blank
//! 255 = print this dot
//! ```

use std::path::Path;

use image::GrayImage;

use crate::error::CatprintError;

/// Value of blank paper before inversion.
pub const PAPER: u8 = 255;

/// Value of full ink before inversion.
pub const INK: u8 = 0;

/// Row-major single-channel pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Create a `width × height` raster with every pixel set to `fill`.
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    /// Wrap existing pixel data.
    ///
    /// ## Errors
    ///
    /// Returns [`CatprintError::Image`] if `data.len() != width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<u8>) -> Result<Self, CatprintError> {
        if data.len() != width * height {
            return Err(CatprintError::Image(format!(
                "Raster data length mismatch. Expected {} ({} × {}), got {}",
                width * height,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the raster has no pixels at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All pixels, row by row.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel value at `(x, y)`, or `None` outside the raster.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0; a zero-width raster has no data anyway
        self.data.chunks_exact(self.width.max(1))
    }

    /// Lay ink onto paper at signed coordinates with the given coverage
    /// (0.0 = untouched, 1.0 = full ink). Coordinates outside the raster are
    /// clipped. Overlapping strokes compound, so a pixel only gets darker.
    pub fn darken(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        let idx = y * self.width + x;
        let current = self.data[idx] as f32;
        self.data[idx] = (current * (1.0 - coverage)).round() as u8;
    }

    /// Invert every pixel in place (`255 - value`).
    pub fn invert(&mut self) {
        for px in &mut self.data {
            *px = 255 - *px;
        }
    }

    /// Return an inverted copy.
    pub fn inverted(&self) -> Self {
        let mut out = self.clone();
        out.invert();
        out
    }

    /// Convert to an `image` greyscale buffer.
    pub fn to_gray_image(&self) -> Result<GrayImage, CatprintError> {
        GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .ok_or_else(|| CatprintError::Image("Raster does not fit a greyscale image".to_string()))
    }

    /// Save as a PNG preview, printed dots shown black on white.
    pub fn save_png(&self, path: &Path) -> Result<(), CatprintError> {
        if self.is_empty() {
            return Err(CatprintError::Image(
                "Nothing to preview: raster has no pixels".to_string(),
            ));
        }
        self.inverted()
            .to_gray_image()?
            .save(path)
            .map_err(|e| CatprintError::Image(format!("Failed to save PNG: {}", e)))
    }

    /// Encode as an in-memory PNG preview, printed dots shown black on white.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, CatprintError> {
        if self.is_empty() {
            return Err(CatprintError::Image(
                "Nothing to preview: raster has no pixels".to_string(),
            ));
        }
        let img = self.inverted().to_gray_image()?;
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| CatprintError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(bytes)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills() {
        let r = Raster::new(4, 3, PAPER);
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 3);
        assert!(r.data().iter().all(|&v| v == PAPER));
    }

    #[test]
    fn test_zero_height_is_empty() {
        let r = Raster::new(384, 0, PAPER);
        assert!(r.is_empty());
        assert_eq!(r.width(), 384);
        assert_eq!(r.rows().count(), 0);
    }

    #[test]
    fn test_from_data_length_mismatch() {
        assert!(Raster::from_data(2, 2, vec![0; 3]).is_err());
        assert!(Raster::from_data(2, 2, vec![0; 4]).is_ok());
    }

    #[test]
    fn test_darken_full_and_partial() {
        let mut r = Raster::new(2, 1, PAPER);
        r.darken(0, 0, 1.0);
        r.darken(1, 0, 0.5);
        assert_eq!(r.get(0, 0), Some(INK));
        assert_eq!(r.get(1, 0), Some(128));

        // compounding only gets darker
        r.darken(1, 0, 0.5);
        assert_eq!(r.get(1, 0), Some(64));
    }

    #[test]
    fn test_darken_clips() {
        let mut r = Raster::new(2, 2, PAPER);
        r.darken(-1, 0, 1.0);
        r.darken(0, -1, 1.0);
        r.darken(2, 0, 1.0);
        r.darken(0, 2, 1.0);
        assert!(r.data().iter().all(|&v| v == PAPER));
    }

    #[test]
    fn test_invert_round_trip() {
        let r = Raster::from_data(3, 1, vec![0, 100, 255]).unwrap();
        let inv = r.inverted();
        assert_eq!(inv.data(), &[255, 155, 0]);
        assert_eq!(inv.inverted(), r);
    }

    #[test]
    fn test_rows() {
        let r = Raster::from_data(2, 2, vec![1, 2, 3, 4]).unwrap();
        let rows: Vec<&[u8]> = r.rows().collect();
        assert_eq!(rows, vec![&[1u8, 2][..], &[3u8, 4][..]]);
    }

    #[test]
    fn test_gray_image_keeps_pixels() {
        let r = Raster::from_data(2, 2, vec![0, 50, 200, 255]).unwrap();
        let img = r.to_gray_image().unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
        assert_eq!(img.as_raw(), r.data());
    }

    #[test]
    fn test_png_bytes_signature() {
        let r = Raster::new(8, 2, 255);
        let png = r.to_png_bytes().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_png_of_empty_raster_fails() {
        assert!(Raster::new(8, 0, 0).to_png_bytes().is_err());
    }
}
