//! # Device Transport
//!
//! Sends command streams to a printer exposed as a device file: a
//! Bluetooth serial bridge, a bound RFCOMM channel, or a plain file when
//! capturing a job for later replay.
//!
//! ## Pacing
//!
//! The printer's receive buffer is small, so writes are split into
//! [`CHUNK_SIZE`]-byte chunks with a short pause between them.
//!
//! ## TTY Configuration
//!
//! When the path is a terminal device it is switched to raw mode so binary
//! data is transmitted without modification:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//!
//! Regular files are written as-is.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::Transport;
use crate::error::CatprintError;

/// Default printer device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Default chunk size for writes (bytes)
pub const CHUNK_SIZE: usize = 128;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 20;

/// # Device Printer Transport
///
/// ## Example
///
/// ```no_run
/// use catprint::protocol::commands;
/// use catprint::transport::{DeviceTransport, Transport};
///
/// let mut transport = DeviceTransport::open("/dev/rfcomm0")?;
/// transport.write_all(&commands::get_device_state())?;
/// # Ok::<(), catprint::CatprintError>(())
/// ```
pub struct DeviceTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open the printer device for writing.
    ///
    /// Terminal devices are configured for raw binary communication.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the dialout group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, CatprintError> {
        let path = device.as_ref();

        let file = OpenOptions::new()
            .write(true)
            .create(!is_device_path(path))
            .truncate(!is_device_path(path))
            .open(path)
            .map_err(|e| {
                CatprintError::Transport(format!("Failed to open {}: {}", path.display(), e))
            })?;

        let fd = file.as_raw_fd();
        if is_tty(fd) {
            configure_tty_raw(fd)?;
        }

        debug!(device = %path.display(), "opened printer device");

        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Set the chunk size for large writes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Transport for DeviceTransport {
    /// Small writes are sent directly. Large writes are chunked with a
    /// pause after each chunk.
    fn write_all(&mut self, data: &[u8]) -> Result<(), CatprintError> {
        if data.len() <= self.chunk_size {
            self.file
                .write_all(data)
                .map_err(|e| CatprintError::Transport(format!("Write failed: {}", e)))?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                self.file
                    .write_all(chunk)
                    .map_err(|e| CatprintError::Transport(format!("Write failed: {}", e)))?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        self.file
            .flush()
            .map_err(|e| CatprintError::Transport(format!("Flush failed: {}", e)))?;

        debug!(bytes = data.len(), "wrote to printer device");
        Ok(())
    }
}

/// Paths under /dev are never created or truncated.
fn is_device_path(path: &Path) -> bool {
    path.starts_with("/dev")
}

fn is_tty(fd: i32) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Configure a file descriptor for raw TTY mode.
///
/// Note: IXON/IXOFF/IXANY disable XON/XOFF software flow control. This is critical
/// because 0x11 (XON/DC1) and 0x13 (XOFF/DC3) can appear in binary row data.
fn configure_tty_raw(fd: i32) -> Result<(), CatprintError> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(CatprintError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(CatprintError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
