//! # Image Rendering Module
//!
//! Tools for turning image files into rasters the printer can print.
//!
//! ## Modules
//!
//! - [`dither`]: Binarization algorithms (threshold, error diffusion, Bayer)
//! - [`image`]: Image loading and scaling to the print width
//!
//! ## Usage Example
//!
//! ```no_run
//! use catprint::render::{self, Binarization};
//!
//! let raster = render::read_image("photo.jpg", 384, Binarization::Atkinson)?;
//! assert_eq!(raster.width(), 384);
//! # Ok::<(), catprint::CatprintError>(())
//! ```

pub mod dither;
pub mod image;

pub use self::dither::Binarization;
pub use self::image::{image_to_raster, read_image};
