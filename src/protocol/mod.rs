//! # Cat Printer Protocol Implementation
//!
//! This module provides low-level command builders for the BLE thermal
//! printers sold as GB01, GB02 and GB03 ("cat printers").
//!
//! ## Module Structure
//!
//! - [`commands`]: Packet framing, checksum, and fixed control commands
//! - [`graphics`]: Row encoding and whole-job encoding of a raster
//!
//! ## Usage Example
//!
//! ```
//! use catprint::printer::PrinterConfig;
//! use catprint::protocol::{commands, graphics};
//! use catprint::raster::Raster;
//!
//! // A 384-dot wide, 10-row black bar
//! let raster = Raster::new(384, 10, 255);
//! let data = graphics::encode(&raster, graphics::DEFAULT_ENERGY, &PrinterConfig::GB03)?;
//!
//! // Every job starts with a device state query
//! assert!(data.starts_with(&commands::get_device_state()));
//!
//! // Send `data` to printer via transport...
//! # Ok::<(), catprint::CatprintError>(())
//! ```

pub mod commands;
pub mod graphics;

pub use graphics::encode;
