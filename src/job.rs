//! # Print Jobs
//!
//! Glue between the three stages of a print:
//!
//! ```text
//! PrintSource ──rasterize──► Raster ──encode──► commands ──Transport──► printer
//!   Text                      (255 = print)
//!   Message (queue body)
//!   Image (file + binarization)
//! ```

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::CatprintError;
use crate::message::text_from_queue_body;
use crate::printer::PrinterConfig;
use crate::protocol::{self, graphics::DEFAULT_ENERGY};
use crate::raster::Raster;
use crate::render::{self, Binarization};
use crate::text::{self, DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE, GlyphRenderer, TtfFont};
use crate::transport::Transport;

/// Where the content of a print comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintSource {
    /// Literal text.
    Text(String),
    /// Raw queue message body (JSON `{from, body}` or plain text).
    Message(String),
    /// Image file, binarized with the given algorithm.
    Image {
        path: PathBuf,
        binarization: Binarization,
    },
}

impl PrintSource {
    /// Text this source renders, or `None` for images.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Message(raw) => Some(text_from_queue_body(raw)),
            Self::Image { .. } => None,
        }
    }
}

/// Printer and rendering settings for a job.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintOptions {
    pub printer: PrinterConfig,
    /// Thermal energy, 0x0000 (light) to 0xFFFF (dark).
    pub energy: u16,
    pub font_path: PathBuf,
    pub font_size: f32,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            printer: PrinterConfig::default(),
            energy: DEFAULT_ENERGY,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// A source plus the settings to print it with.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintJob {
    pub source: PrintSource,
    pub options: PrintOptions,
}

impl PrintJob {
    pub fn new(source: PrintSource, options: PrintOptions) -> Self {
        Self { source, options }
    }

    /// Render the source, loading the font from the options only when text
    /// is involved.
    pub fn rasterize(&self) -> Result<Raster, CatprintError> {
        match &self.source {
            PrintSource::Image { .. } => self.rasterize_image(),
            PrintSource::Text(_) | PrintSource::Message(_) => {
                let width = self.options.printer.print_width();
                if width == 0 {
                    return Err(CatprintError::InvalidWidth(width));
                }
                let font = TtfFont::load(&self.options.font_path, self.options.font_size)?;
                self.rasterize_with(&font)
            }
        }
    }

    /// Render the source with an already-loaded font.
    pub fn rasterize_with<F: GlyphRenderer + ?Sized>(&self, font: &F) -> Result<Raster, CatprintError> {
        let Some(text) = self.source.text() else {
            return self.rasterize_image();
        };
        debug!(text = %text, "rendering text");
        let raster = text::render(&text, self.options.printer.print_width(), font)?;
        info!("Read image: ({}, {}) (h, w) pixels", raster.height(), raster.width());
        Ok(raster)
    }

    fn rasterize_image(&self) -> Result<Raster, CatprintError> {
        let PrintSource::Image { path, binarization } = &self.source else {
            return Err(CatprintError::Image("Source is not an image".to_string()));
        };
        let raster = render::read_image(path, self.options.printer.print_width(), *binarization)?;
        info!("Read image: ({}, {}) (h, w) pixels", raster.height(), raster.width());
        Ok(raster)
    }

    /// Rasterize and encode the full command stream.
    pub fn encode(&self) -> Result<Vec<u8>, CatprintError> {
        let raster = self.rasterize()?;
        self.encode_raster(&raster)
    }

    /// Encode an already rendered raster with this job's settings.
    pub fn encode_raster(&self, raster: &Raster) -> Result<Vec<u8>, CatprintError> {
        let data = protocol::encode(raster, self.options.energy, &self.options.printer)?;
        info!("Generated commands: {} bytes", data.len());
        Ok(data)
    }

    /// Rasterize, encode and send through `transport`.
    pub fn print<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<(), CatprintError> {
        let raster = self.rasterize()?;
        self.print_raster(&raster, transport)
    }

    /// Encode `raster` and send it through `transport`.
    pub fn print_raster<T: Transport + ?Sized>(
        &self,
        raster: &Raster,
        transport: &mut T,
    ) -> Result<(), CatprintError> {
        let data = self.encode_raster(raster)?;
        transport.write_all(&data)?;
        info!(
            printer = self.options.printer.name,
            "Printed {} rows ({:.1} mm)",
            raster.height(),
            self.options.printer.dots_to_mm(raster.height())
        );
        Ok(())
    }
}
