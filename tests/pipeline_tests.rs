//! # Pipeline Tests
//!
//! End-to-end checks from a print source to the bytes that reach the
//! transport. Most text tests use a fixed-metric font so results are exact;
//! one runs the bundled TrueType font through the whole pipeline.
//!
//! Every stream is split back into packets and checked for framing, CRC and
//! the expected command order.

use catprint::job::{PrintJob, PrintOptions, PrintSource};
use catprint::protocol::commands::{self, CMD_BITMAP_ROW, CMD_RLE_ROW, END, MAGIC, crc8};
use catprint::raster::Raster;
use catprint::render::Binarization;
use catprint::text::{self, GlyphRenderer};
use catprint::transport::MemoryTransport;
use image::{GrayImage, Luma};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Monospace block font: 8 px per char, glyphs 10 px tall with ink in the
/// top 8 rows.
struct MonoFont;

impl GlyphRenderer for MonoFont {
    fn measure_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * 8
    }

    fn bounding_box_height(&self, _glyph: char) -> u32 {
        10
    }

    fn draw_line(&self, text: &str, raster: &mut Raster, top: u32) {
        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let left = i as i32 * 8;
            for y in 0..8 {
                for x in 1..7 {
                    raster.darken(left + x, top as i32 + y, 1.0);
                }
            }
        }
    }
}

#[derive(Debug, PartialEq)]
struct Packet {
    command: u8,
    payload: Vec<u8>,
}

/// Split a command stream into packets, checking framing and CRC.
fn packets(mut data: &[u8]) -> Vec<Packet> {
    let mut out = Vec::new();
    while !data.is_empty() {
        assert_eq!(&data[0..2], &MAGIC, "bad preamble");
        assert_eq!(data[3], 0x00);
        let len = u16::from_le_bytes([data[4], data[5]]) as usize;
        let payload = data[6..6 + len].to_vec();
        assert_eq!(data[6 + len], crc8(&payload), "bad crc");
        assert_eq!(data[7 + len], END, "bad terminator");
        out.push(Packet {
            command: data[2],
            payload,
        });
        data = &data[8 + len..];
    }
    out
}

fn row_packets(stream: &[Packet]) -> usize {
    stream
        .iter()
        .filter(|p| p.command == CMD_RLE_ROW || p.command == CMD_BITMAP_ROW)
        .count()
}

fn temp_png(name: &str, img: &GrayImage) -> PathBuf {
    let path = std::env::temp_dir().join(format!("catprint-{}-{}.png", name, std::process::id()));
    img.save(&path).unwrap();
    path
}

// ============================================================================
// TEXT
// ============================================================================

#[test]
fn test_text_job_end_to_end() {
    let options = PrintOptions::default();
    let job = PrintJob::new(PrintSource::Text("hello world".into()), options);
    let raster = job.rasterize_with(&MonoFont).unwrap();
    assert_eq!(raster.width(), 384);
    assert_eq!(raster.height(), 10);

    let mut transport = MemoryTransport::new();
    job.print_raster(&raster, &mut transport).unwrap();

    let stream = packets(&transport.written);
    assert_eq!(row_packets(&stream), 10);
    assert_eq!(stream.first().unwrap().command, 0xA3);
    assert_eq!(stream.last().unwrap().command, 0xA3);
}

#[test]
fn test_wrapped_lines_stack_by_reference_height() {
    let raster = text::render("hello world", 64, &MonoFont).unwrap();
    assert_eq!(text::wrap_lines("hello world", 64, &MonoFont), vec!["hello", "world"]);
    assert_eq!(raster.height(), 20);
    // Top row of each line box has ink, the last two rows do not
    assert_eq!(raster.get(1, 0), Some(255));
    assert_eq!(raster.get(1, 8), Some(0));
    assert_eq!(raster.get(1, 10), Some(255));
    assert_eq!(raster.get(1, 19), Some(0));
}

#[test]
fn test_ink_rows_use_rle_and_blank_rows_stay_short() {
    let job = PrintJob::new(PrintSource::Text("a".into()), PrintOptions::default());
    let raster = job.rasterize_with(&MonoFont).unwrap();
    let stream = packets(&job.encode_raster(&raster).unwrap());
    let rows: Vec<&Packet> = stream.iter().filter(|p| p.command == CMD_RLE_ROW).collect();
    assert_eq!(rows.len(), 10);

    // Ink row: 1 blank, 6 ink, 377 blank (127 + 127 + 123)
    assert_eq!(rows[0].payload, vec![0x01, 0x86, 0x7F, 0x7F, 0x7B]);
    // Blank row
    assert_eq!(rows[9].payload, vec![0x7F, 0x7F, 0x7F, 0x03]);
}

#[test]
fn test_bundled_font_job_end_to_end() {
    let job = PrintJob::new(
        PrintSource::Text("Hello from the bundled font".into()),
        PrintOptions::default(),
    );
    let raster = job.rasterize().unwrap();
    assert_eq!(raster.width(), 384);
    assert!(raster.height() > 0);
    assert_eq!(raster.height() % 19, 0);

    let mut transport = MemoryTransport::new();
    job.print(&mut transport).unwrap();
    assert_eq!(row_packets(&packets(&transport.written)), raster.height());
}

#[test]
fn test_queue_message_job() {
    let body = r#"{"from":"+15551234567","to":"+15557654321","body":"hi"}"#;
    let job = PrintJob::new(PrintSource::Message(body.into()), PrintOptions::default());
    let raster = job.rasterize_with(&MonoFont).unwrap();

    let expected = text::render("From +15551234567: hi", 384, &MonoFont).unwrap();
    assert_eq!(raster, expected);
}

#[test]
fn test_blank_text_sends_framing_only() {
    let job = PrintJob::new(PrintSource::Text("   ".into()), PrintOptions::default());
    let raster = job.rasterize_with(&MonoFont).unwrap();
    assert!(raster.is_empty());

    let mut transport = MemoryTransport::new();
    job.print_raster(&raster, &mut transport).unwrap();
    assert_eq!(row_packets(&packets(&transport.written)), 0);
}

// ============================================================================
// IMAGES
// ============================================================================

#[test]
fn test_image_job_end_to_end() {
    // Left half black, right half white
    let img = GrayImage::from_fn(96, 24, |x, _| if x < 48 { Luma([0]) } else { Luma([255]) });
    let path = temp_png("halves", &img);

    let job = PrintJob::new(
        PrintSource::Image {
            path: path.clone(),
            binarization: Binarization::MeanThreshold,
        },
        PrintOptions::default(),
    );
    let raster = job.rasterize().unwrap();
    std::fs::remove_file(&path).unwrap();

    // Scaled 4x to the print width
    assert_eq!(raster.width(), 384);
    assert_eq!(raster.height(), 96);
    assert_eq!(raster.get(10, 50), Some(255));
    assert_eq!(raster.get(370, 50), Some(0));

    let stream = packets(&job.encode_raster(&raster).unwrap());
    assert_eq!(row_packets(&stream), 96);
}

#[test]
fn test_image_without_binarization_keeps_pixels() {
    let img = GrayImage::from_fn(384, 2, |x, y| Luma([if (x + y) % 2 == 0 { 0 } else { 255 }]));
    let path = temp_png("checker", &img);

    let job = PrintJob::new(
        PrintSource::Image {
            path: path.clone(),
            binarization: Binarization::None,
        },
        PrintOptions::default(),
    );
    let raster = job.rasterize().unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(raster.height(), 2);
    // A checkerboard row is cheaper packed than run-length encoded
    let stream = packets(&job.encode_raster(&raster).unwrap());
    let bitmap_rows: Vec<&Packet> = stream.iter().filter(|p| p.command == CMD_BITMAP_ROW).collect();
    assert_eq!(bitmap_rows.len(), 2);
    assert_eq!(bitmap_rows[0].payload, vec![0x55; 48]);
    assert_eq!(bitmap_rows[1].payload, vec![0xAA; 48]);
}

// ============================================================================
// COMMAND STREAM
// ============================================================================

#[test]
fn test_stream_is_the_concatenation_of_commands() {
    let job = PrintJob::new(PrintSource::Text(String::new()), PrintOptions::default());
    let mut transport = MemoryTransport::new();
    job.print_raster(&Raster::new(384, 0, 0), &mut transport).unwrap();

    let mut expected = Vec::new();
    expected.extend(commands::get_device_state());
    expected.extend(commands::set_quality_200_dpi());
    expected.extend(commands::set_energy(0xFFFF));
    expected.extend(commands::apply_energy());
    expected.extend(commands::lattice_start());
    expected.extend(commands::set_speed(25));
    for _ in 0..3 {
        expected.extend(commands::feed_lines(0x30));
    }
    expected.extend(commands::lattice_end());
    expected.extend(commands::get_device_state());
    assert_eq!(transport.written, expected);
}
