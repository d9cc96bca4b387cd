//! # Cat Printer Graphics
//!
//! Encodes a [`Raster`] into the row-by-row command stream the printer
//! expects, wrapped in the job prologue and epilogue.
//!
//! ## Pixel Threshold
//!
//! Rasters arrive with 255 meaning "print". Anything at or above
//! [`PRINT_THRESHOLD`] becomes a printed dot; anti-aliased edges below it are
//! left blank.
//!
//! ## Row Encodings
//!
//! Each dot row is sent as exactly one of:
//!
//! | Command | Encoding | Payload |
//! |---------|----------|---------|
//! | 0xBF | Run-length | one byte per run: `(bit << 7) \| length`, length 1-127 |
//! | 0xA2 | Packed bitmap | `width / 8` bytes, bit 0 (LSB) = leftmost dot |
//!
//! The run-length form is used whenever it is no longer than the packed form.
//!
//! ```text
//! Row (16 dots):   ████████░░░░░░░░
//! Run-length:      [0x88, 0x08]         (8 × on, 8 × off)
//! Packed:          [0xFF, 0x00]
//! ```
//!
//! Note the bit order is the reverse of most ESC/POS printers: the leftmost
//! dot is the least significant bit.
//!
//! ## Job Layout
//!
//! ```text
//! get_device_state
//! set_quality_200_dpi
//! set_energy(energy), apply_energy
//! lattice_start
//!   row 0 … row h-1
//! set_speed(25)
//! feed_lines(0x30) × 3
//! lattice_end
//! get_device_state
//! ```

use super::commands::{
    CMD_BITMAP_ROW, CMD_RLE_ROW, apply_energy, feed_lines, get_device_state, lattice_end,
    lattice_start, packet, set_energy, set_quality_200_dpi, set_speed,
};
use crate::error::CatprintError;
use crate::printer::PrinterConfig;
use crate::raster::Raster;

/// Minimum pixel value that prints a dot.
pub const PRINT_THRESHOLD: u8 = 128;

/// Default thermal energy (darkest).
pub const DEFAULT_ENERGY: u16 = 0xFFFF;

/// Longest run a single run-length byte can hold.
const MAX_RUN: usize = 0x7F;

/// Motor speed used while feeding out the finished print.
const FEED_SPEED: u8 = 25;

/// Blank rows fed per trailing feed command.
const TRAILING_FEED: u16 = 0x30;

/// Run-length encode one row of dots.
///
/// ## Example
///
/// ```
/// use catprint::protocol::graphics::run_length_encode;
///
/// let mut row = vec![true; 8];
/// row.extend(vec![false; 8]);
/// assert_eq!(run_length_encode(&row), vec![0x88, 0x08]);
/// ```
pub fn run_length_encode(row: &[bool]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut iter = row.iter().copied().peekable();

    while let Some(bit) = iter.next() {
        let mut run = 1;
        while iter.peek() == Some(&bit) {
            iter.next();
            run += 1;
        }
        push_run(&mut out, bit, run);
    }

    out
}

fn push_run(out: &mut Vec<u8>, bit: bool, mut run: usize) {
    let high = if bit { 0x80 } else { 0x00 };
    while run > MAX_RUN {
        out.push(high | MAX_RUN as u8);
        run -= MAX_RUN;
    }
    if run > 0 {
        out.push(high | run as u8);
    }
}

/// Pack one row of dots into bytes, leftmost dot in the least significant
/// bit. A trailing partial byte is padded with blank dots.
///
/// ## Example
///
/// ```
/// use catprint::protocol::graphics::pack_row_lsb;
///
/// assert_eq!(pack_row_lsb(&[true, false, false, false, false, false, false, false]), vec![0x01]);
/// let last_dot = [false, false, false, false, false, false, false, true];
/// assert_eq!(pack_row_lsb(&last_dot), vec![0x80]);
/// ```
pub fn pack_row_lsb(row: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; row.len().div_ceil(8)];
    for (i, &dot) in row.iter().enumerate() {
        if dot {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    bytes
}

/// Build the command for one dot row, picking the shorter encoding.
pub fn row_command(row: &[bool]) -> Vec<u8> {
    let rle = run_length_encode(row);
    let packed_len = row.len().div_ceil(8);
    if rle.len() > packed_len {
        packet(CMD_BITMAP_ROW, &pack_row_lsb(row))
    } else {
        packet(CMD_RLE_ROW, &rle)
    }
}

/// Threshold one raster row, padded with blank dots to `width`.
fn row_dots(row: &[u8], width: usize) -> Vec<bool> {
    let mut dots: Vec<bool> = row.iter().map(|&v| v >= PRINT_THRESHOLD).collect();
    dots.resize(width, false);
    dots
}

/// # Encode a Print Job
///
/// Converts a raster into the complete command stream for `config`.
/// Rasters narrower than the printer are padded on the right with blank
/// dots; a zero-height raster yields a job with no rows (just a feed).
///
/// ## Errors
///
/// Returns [`CatprintError::InvalidCommand`] if the raster is wider than
/// the printer.
///
/// ## Example
///
/// ```
/// use catprint::printer::PrinterConfig;
/// use catprint::protocol::graphics;
/// use catprint::raster::Raster;
///
/// let raster = Raster::new(384, 2, 0);
/// let data = graphics::encode(&raster, 0xFFFF, &PrinterConfig::GB03)?;
/// assert_eq!(&data[0..2], &[0x51, 0x78]);
/// # Ok::<(), catprint::CatprintError>(())
/// ```
pub fn encode(raster: &Raster, energy: u16, config: &PrinterConfig) -> Result<Vec<u8>, CatprintError> {
    let width = config.print_width();
    if raster.width() > width {
        return Err(CatprintError::InvalidCommand(format!(
            "Raster is {} dots wide but {} prints at most {}",
            raster.width(),
            config.name,
            width
        )));
    }

    let mut data = Vec::new();
    data.extend(get_device_state());
    data.extend(set_quality_200_dpi());
    data.extend(set_energy(energy));
    data.extend(apply_energy());
    data.extend(lattice_start());

    for row in raster.rows() {
        data.extend(row_command(&row_dots(row, width)));
    }

    data.extend(set_speed(FEED_SPEED));
    for _ in 0..3 {
        data.extend(feed_lines(TRAILING_FEED));
    }
    data.extend(lattice_end());
    data.extend(get_device_state());

    Ok(data)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::{FRAME_OVERHEAD, crc8};
    use pretty_assertions::assert_eq;

    /// Length of the fixed prologue + epilogue around the rows.
    fn framing_len() -> usize {
        let mut n = 0;
        n += get_device_state().len() * 2;
        n += set_quality_200_dpi().len();
        n += set_energy(0).len();
        n += apply_energy().len();
        n += lattice_start().len() + lattice_end().len();
        n += set_speed(FEED_SPEED).len();
        n += feed_lines(TRAILING_FEED).len() * 3;
        n
    }

    #[test]
    fn test_rle_single_run() {
        assert_eq!(run_length_encode(&[false; 384]), vec![0x7F, 0x7F, 0x7F, 0x03]);
        assert_eq!(run_length_encode(&[true; 5]), vec![0x85]);
    }

    #[test]
    fn test_rle_alternating_runs() {
        let row = [true, true, false, true, false, false, false];
        assert_eq!(run_length_encode(&row), vec![0x82, 0x01, 0x81, 0x03]);
    }

    #[test]
    fn test_rle_exact_max_run() {
        assert_eq!(run_length_encode(&[true; 127]), vec![0xFF]);
        assert_eq!(run_length_encode(&[true; 128]), vec![0xFF, 0x81]);
    }

    #[test]
    fn test_rle_empty() {
        assert!(run_length_encode(&[]).is_empty());
    }

    #[test]
    fn test_pack_row_lsb_first() {
        let row = [true, true, false, false, false, false, false, false, true];
        assert_eq!(pack_row_lsb(&row), vec![0x03, 0x01]);
    }

    #[test]
    fn test_row_command_prefers_rle_for_blank_row() {
        let cmd = row_command(&[false; 384]);
        assert_eq!(cmd[2], CMD_RLE_ROW);
        assert_eq!(cmd.len(), FRAME_OVERHEAD + 4);
    }

    #[test]
    fn test_row_command_falls_back_to_bitmap() {
        // 384 alternating dots → 384 RLE bytes vs 48 packed
        let row: Vec<bool> = (0..384).map(|i| i % 2 == 0).collect();
        let cmd = row_command(&row);
        assert_eq!(cmd[2], CMD_BITMAP_ROW);
        assert_eq!(&cmd[4..6], &[48, 0]);
        assert!(cmd[6..54].iter().all(|&b| b == 0x55));
        assert_eq!(cmd[54], crc8(&cmd[6..54]));
    }

    #[test]
    fn test_threshold() {
        let dots = row_dots(&[0, 127, 128, 255], 4);
        assert_eq!(dots, vec![false, false, true, true]);
    }

    #[test]
    fn test_narrow_row_padded() {
        let dots = row_dots(&[255, 255], 8);
        assert_eq!(dots, vec![true, true, false, false, false, false, false, false]);
    }

    #[test]
    fn test_encode_layout() {
        let raster = Raster::new(384, 3, 0);
        let data = encode(&raster, 0x8000, &PrinterConfig::GB03).unwrap();

        let mut expected = Vec::new();
        expected.extend(get_device_state());
        expected.extend(set_quality_200_dpi());
        expected.extend(set_energy(0x8000));
        expected.extend(apply_energy());
        expected.extend(lattice_start());
        for _ in 0..3 {
            expected.extend(row_command(&[false; 384]));
        }
        expected.extend(set_speed(25));
        for _ in 0..3 {
            expected.extend(feed_lines(0x30));
        }
        expected.extend(lattice_end());
        expected.extend(get_device_state());

        assert_eq!(data, expected);
    }

    #[test]
    fn test_encode_empty_raster() {
        let raster = Raster::new(384, 0, 0);
        let data = encode(&raster, DEFAULT_ENERGY, &PrinterConfig::GB03).unwrap();
        assert_eq!(data.len(), framing_len());
    }

    #[test]
    fn test_encode_too_wide() {
        let raster = Raster::new(385, 1, 0);
        assert!(matches!(
            encode(&raster, DEFAULT_ENERGY, &PrinterConfig::GB03),
            Err(CatprintError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_encode_narrow_raster_uses_full_rows() {
        let narrow = Raster::new(100, 1, 255);
        let data = encode(&narrow, DEFAULT_ENERGY, &PrinterConfig::GB03).unwrap();

        let mut row = vec![true; 100];
        row.resize(384, false);
        let expected_row = row_command(&row);
        assert_eq!(data.len(), framing_len() + expected_row.len());
        assert!(data.windows(expected_row.len()).any(|w| w == expected_row.as_slice()));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let raster = Raster::from_data(384, 1, (0..384).map(|i| (i % 256) as u8).collect()).unwrap();
        let a = encode(&raster, 0x1000, &PrinterConfig::GB01).unwrap();
        let b = encode(&raster, 0x1000, &PrinterConfig::GB01).unwrap();
        assert_eq!(a, b);
    }
}
