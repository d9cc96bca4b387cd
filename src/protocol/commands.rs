//! # Cat Printer Commands
//!
//! Packet framing and the fixed command set understood by the GB01/GB02/GB03
//! family of Bluetooth thermal printers.
//!
//! ## Packet Structure
//!
//! Every command is one framed packet:
//!
//! ```text
//! ┌──────┬──────┬─────┬──────┬────────┬────────┬─────────┬──────┬──────┐
//! │ 0x51 │ 0x78 │ cmd │ 0x00 │ len_lo │ len_hi │ payload │ crc8 │ 0xFF │
//! └──────┴──────┴─────┴──────┴────────┴────────┴─────────┴──────┴──────┘
//! ```
//!
//! - `len` is the payload length, little-endian
//! - `crc8` is CRC-8 (polynomial 0x07, initial value 0) over the payload only
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// FRAMING CONSTANTS
// ============================================================================

/// Two-byte packet preamble.
pub const MAGIC: [u8; 2] = [0x51, 0x78];

/// Packet terminator.
pub const END: u8 = 0xFF;

/// Bytes of framing around each payload (6 header + crc + end).
pub const FRAME_OVERHEAD: usize = 8;

// ============================================================================
// COMMAND IDS
// ============================================================================

pub const CMD_FEED_LINES: u8 = 0xA1;
pub const CMD_BITMAP_ROW: u8 = 0xA2;
pub const CMD_GET_DEVICE_STATE: u8 = 0xA3;
pub const CMD_SET_QUALITY: u8 = 0xA4;
pub const CMD_LATTICE: u8 = 0xA6;
pub const CMD_SET_ENERGY: u8 = 0xAF;
pub const CMD_SET_SPEED: u8 = 0xBD;
pub const CMD_APPLY_ENERGY: u8 = 0xBE;
pub const CMD_RLE_ROW: u8 = 0xBF;

/// Quality byte for 200 DPI printing.
pub const QUALITY_200_DPI: u8 = 0x32;

const LATTICE_START: [u8; 11] = [
    0xAA, 0x55, 0x17, 0x38, 0x44, 0x5F, 0x5F, 0x5F, 0x44, 0x38, 0x2C,
];

const LATTICE_END: [u8; 11] = [
    0xAA, 0x55, 0x17, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x17,
];

// ============================================================================
// CHECKSUM
// ============================================================================

const CRC8_TABLE: [u8; 256] = crc8_table();

const fn crc8_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x07
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// CRC-8 (polynomial 0x07, initial value 0) of `data`.
///
/// ```
/// use catprint::protocol::commands::crc8;
///
/// assert_eq!(crc8(&[0x01]), 0x07);
/// assert_eq!(crc8(&[]), 0x00);
/// ```
pub fn crc8(data: &[u8]) -> u8 {
    data.iter()
        .fold(0u8, |crc, &byte| CRC8_TABLE[(crc ^ byte) as usize])
}

/// Convert u16 to little-endian bytes
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

// ============================================================================
// PACKET BUILDER
// ============================================================================

/// # Frame a Command Packet
///
/// Wraps `payload` with the preamble, command id, length, checksum and
/// terminator.
///
/// ## Example
///
/// ```
/// use catprint::protocol::commands::{packet, CMD_SET_QUALITY};
///
/// let cmd = packet(CMD_SET_QUALITY, &[0x32]);
/// assert_eq!(cmd, vec![0x51, 0x78, 0xA4, 0x00, 0x01, 0x00, 0x32, 0x9E, 0xFF]);
/// ```
pub fn packet(command: u8, payload: &[u8]) -> Vec<u8> {
    debug_assert!(
        payload.len() <= u16::MAX as usize,
        "Payload too long for a single packet: {} bytes",
        payload.len()
    );

    let [len_lo, len_hi] = u16_le(payload.len() as u16);
    let mut cmd = Vec::with_capacity(FRAME_OVERHEAD + payload.len());
    cmd.extend_from_slice(&MAGIC);
    cmd.push(command);
    cmd.push(0x00);
    cmd.push(len_lo);
    cmd.push(len_hi);
    cmd.extend_from_slice(payload);
    cmd.push(crc8(payload));
    cmd.push(END);
    cmd
}

// ============================================================================
// FIXED COMMANDS
// ============================================================================

/// Query printer state (0xA3). Sent before and after every job.
#[inline]
pub fn get_device_state() -> Vec<u8> {
    packet(CMD_GET_DEVICE_STATE, &[0x00])
}

/// Select 200 DPI print quality (0xA4).
#[inline]
pub fn set_quality_200_dpi() -> Vec<u8> {
    packet(CMD_SET_QUALITY, &[QUALITY_200_DPI])
}

/// Open a lattice (image) block (0xA6).
#[inline]
pub fn lattice_start() -> Vec<u8> {
    packet(CMD_LATTICE, &LATTICE_START)
}

/// Close a lattice (image) block (0xA6).
#[inline]
pub fn lattice_end() -> Vec<u8> {
    packet(CMD_LATTICE, &LATTICE_END)
}

/// # Set Thermal Energy (0xAF)
///
/// Darkness from 0x0000 (lightest) to 0xFFFF (darkest). Takes effect after
/// [`apply_energy`].
#[inline]
pub fn set_energy(energy: u16) -> Vec<u8> {
    packet(CMD_SET_ENERGY, &u16_le(energy))
}

/// Apply the energy set with [`set_energy`] (0xBE).
#[inline]
pub fn apply_energy() -> Vec<u8> {
    packet(CMD_APPLY_ENERGY, &[0x01])
}

/// Set the print/feed motor speed (0xBD).
#[inline]
pub fn set_speed(speed: u8) -> Vec<u8> {
    packet(CMD_SET_SPEED, &[speed])
}

/// Feed `lines` dot rows of blank paper (0xA1).
#[inline]
pub fn feed_lines(lines: u16) -> Vec<u8> {
    packet(CMD_FEED_LINES, &u16_le(lines))
}

// ============================================================================
// TESTS
// ============================================================================
