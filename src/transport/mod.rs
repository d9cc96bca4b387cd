//! # Printer Transport Layer
//!
//! This module provides communication backends for sending command streams
//! to printers.
//!
//! ## Available Transports
//!
//! - [`device`]: A device file (serial bridge, RFCOMM, or capture file)
//! - [`MemoryTransport`]: Collects bytes in memory, for tests and dry runs

pub mod device;

pub use device::DeviceTransport;

use crate::error::CatprintError;

/// A sink for printer command streams.
pub trait Transport {
    /// Send all of `data` to the printer, in order.
    fn write_all(&mut self, data: &[u8]) -> Result<(), CatprintError>;
}

/// Transport that records everything written to it.
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    pub written: Vec<u8>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), CatprintError> {
        self.written.extend_from_slice(data);
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_all(&mut self, data: &[u8]) -> Result<(), CatprintError> {
        (**self).write_all(data)
    }
}
