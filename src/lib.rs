//! # Catprint - Cat Thermal Printer Library
//!
//! Catprint prints text, images and SMS messages on the small Bluetooth
//! "cat" thermal printers (GB01, GB02, GB03). It provides:
//!
//! - **Text rasterization**: Greedy word wrap against real font metrics
//! - **Binarization**: Threshold, error diffusion and Bayer halftone for images
//! - **Protocol implementation**: Framed, CRC-checked printer commands
//! - **Transport**: Device-file communication (RFCOMM / serial bridge)
//! - **SMS server**: Webhook queue feeding a printer worker
//!
//! ## Quick Start
//!
//! ```no_run
//! use catprint::{
//!     job::{PrintJob, PrintOptions, PrintSource},
//!     transport::DeviceTransport,
//! };
//!
//! // Open connection to printer
//! let mut transport = DeviceTransport::open("/dev/rfcomm0")?;
//!
//! // Render, encode and send
//! let job = PrintJob::new(PrintSource::Text("Hello, cat!".into()), PrintOptions::default());
//! job.print(&mut transport)?;
//!
//! # Ok::<(), catprint::CatprintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`text`] | Word wrap and text rasterization |
//! | [`render`] | Image loading and binarization |
//! | [`raster`] | Single-channel pixel buffer |
//! | [`protocol`] | Printer command builders |
//! | [`job`] | Source → raster → commands pipeline |
//! | [`message`] | SMS queue messages |
//! | [`transport`] | Communication backends |
//! | [`server`] | SMS webhook server |
//! | [`printer`] | Printer configurations |
//! | [`error`] | Error types |
//!
//! ## Pixel Convention
//!
//! Rasters handed to [`protocol`] use 255 = print a dot, 0 = blank paper.
//! A dot prints when its value is at least 128.

pub mod error;
pub mod job;
pub mod message;
pub mod printer;
pub mod protocol;
pub mod raster;
pub mod render;
pub mod server;
pub mod text;
pub mod transport;

// Re-exports for convenience
pub use error::CatprintError;
pub use printer::PrinterConfig;
pub use raster::Raster;
pub use transport::DeviceTransport;
