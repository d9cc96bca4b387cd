//! Image file input: load, scale to the print width, binarize.

use std::path::Path;

use image::{DynamicImage, GrayImage, imageops::FilterType};

use super::dither::{self, Binarization};
use crate::error::CatprintError;
use crate::raster::Raster;

/// Load an image file and turn it into a print-ready raster (255 = print).
///
/// The image is converted to greyscale and scaled to exactly `print_width`
/// pixels wide, keeping its aspect ratio, then binarized. With
/// [`Binarization::None`] no scaling happens and the image must already be
/// `print_width` wide.
///
/// ## Errors
///
/// - [`CatprintError::InvalidWidth`] if `print_width` is zero
/// - [`CatprintError::Image`] if the file cannot be decoded, or has the
///   wrong width for [`Binarization::None`]
pub fn read_image<P: AsRef<Path>>(
    path: P,
    print_width: usize,
    binarization: Binarization,
) -> Result<Raster, CatprintError> {
    if print_width == 0 {
        return Err(CatprintError::InvalidWidth(print_width));
    }
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|e| CatprintError::Image(format!("Failed to open {}: {}", path.display(), e)))?;
    image_to_raster(&img, print_width, binarization)
}

/// Same as [`read_image`], for an already-decoded image.
pub fn image_to_raster(
    img: &DynamicImage,
    print_width: usize,
    binarization: Binarization,
) -> Result<Raster, CatprintError> {
    if print_width == 0 {
        return Err(CatprintError::InvalidWidth(print_width));
    }

    let gray = if binarization == Binarization::None {
        if img.width() as usize != print_width {
            return Err(CatprintError::Image(format!(
                "Without binarization the image must be exactly {} px wide (got {})",
                print_width,
                img.width()
            )));
        }
        img.to_luma8()
    } else {
        scale_to_width(img, print_width as u32)
    };

    dither::binarize(&gray, binarization)
}

/// Greyscale copy of `img`, resized to `width` keeping the aspect ratio.
fn scale_to_width(img: &DynamicImage, width: u32) -> GrayImage {
    let aspect_ratio = img.height() as f32 / img.width().max(1) as f32;
    let height = (width as f32 * aspect_ratio).round().max(1.0) as u32;
    img.resize_exact(width, height, FilterType::Lanczos3).to_luma8()
}
