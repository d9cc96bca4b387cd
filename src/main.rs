//! # Catprint CLI
//!
//! Command-line interface for cat thermal printers.
//!
//! ## Usage
//!
//! ```bash
//! # Print a line of text
//! catprint print --text "Hello, cat!"
//!
//! # Print an image with Atkinson dithering
//! catprint print --file photo.jpg --binarization atkinson
//!
//! # Print a queued SMS body
//! catprint print --message-file message.json
//!
//! # Save a preview instead of printing
//! catprint print --text "Hello" --png preview.png
//!
//! # Run the SMS webhook server
//! catprint serve --listen 0.0.0.0:8080 --device /dev/rfcomm0
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catprint::{
    CatprintError, PrinterConfig,
    job::{PrintJob, PrintOptions, PrintSource},
    render::Binarization,
    server::{self, ServerConfig},
    text::{DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE},
    transport::{DeviceTransport, device::DEFAULT_DEVICE},
};

/// Catprint - Cat thermal printer utility
#[derive(Parser, Debug)]
#[command(name = "catprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log verbosity (overridden by RUST_LOG)
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Printer and rendering settings shared by every subcommand.
#[derive(Args, Debug)]
struct PrinterArgs {
    /// Printer device path
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: String,

    /// Printer model (GB01, GB02, GB03)
    #[arg(long, default_value = "GB03", value_parser = parse_printer)]
    printer: PrinterConfig,

    /// Thermal energy in hex, 0x0000 (light) to 0xffff (dark)
    #[arg(long, default_value = "0xffff", value_parser = parse_energy)]
    energy: u16,

    /// TrueType font for text
    #[arg(long, value_name = "FILE", default_value = DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Font size in pixels per em
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    font_size: f32,
}

impl PrinterArgs {
    fn options(&self) -> PrintOptions {
        PrintOptions {
            printer: self.printer,
            energy: self.energy,
            font_path: self.font.clone(),
            font_size: self.font_size,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print text, an image, or a queued message
    Print {
        /// Text to print
        #[arg(long, conflicts_with_all = ["file", "message_file"])]
        text: Option<String>,

        /// Image file to print
        #[arg(long, value_name = "FILE", conflicts_with = "message_file")]
        file: Option<PathBuf>,

        /// File holding a queue message body (JSON or plain text)
        #[arg(long, value_name = "FILE")]
        message_file: Option<PathBuf>,

        /// Binarization algorithm for images
        #[arg(long, default_value_t = Binarization::default())]
        binarization: Binarization,

        /// Output to PNG file instead of printing
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        #[command(flatten)]
        printer: PrinterArgs,
    },

    /// Run the SMS webhook server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        #[command(flatten)]
        printer: PrinterArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(command: Commands) -> Result<(), CatprintError> {
    match command {
        Commands::Print {
            text,
            file,
            message_file,
            binarization,
            png,
            printer,
        } => {
            let source = print_source(text, file, message_file, binarization)?;
            let job = PrintJob::new(source, printer.options());
            let raster = job.rasterize()?;

            if let Some(png_path) = png {
                raster.save_png(&png_path)?;
                info!("Saved to {}", png_path.display());
            } else {
                let mut transport = DeviceTransport::open(&printer.device)?;
                job.print_raster(&raster, &mut transport)?;
                info!("Printed successfully!");
            }
        }
        Commands::Serve { listen, printer } => {
            let config = ServerConfig {
                device_path: printer.device.clone(),
                listen_addr: listen,
                options: printer.options(),
            };
            tokio::runtime::Runtime::new()?.block_on(server::serve(config))?;
        }
    }

    Ok(())
}

/// Resolve the print source, failing before any rendering if a file is missing.
fn print_source(
    text: Option<String>,
    file: Option<PathBuf>,
    message_file: Option<PathBuf>,
    binarization: Binarization,
) -> Result<PrintSource, CatprintError> {
    match (text, file, message_file) {
        (Some(text), None, None) => Ok(PrintSource::Text(text)),
        (None, Some(path), None) => {
            if !path.is_file() {
                return Err(CatprintError::InvalidCommand(format!(
                    "File not found: {}",
                    path.display()
                )));
            }
            Ok(PrintSource::Image { path, binarization })
        }
        (None, None, Some(path)) => {
            let raw = fs::read_to_string(&path).map_err(|e| {
                CatprintError::InvalidCommand(format!("Failed to read {}: {}", path.display(), e))
            })?;
            Ok(PrintSource::Message(raw))
        }
        _ => Err(CatprintError::InvalidCommand(
            "Provide exactly one of --text, --file or --message-file".to_string(),
        )),
    }
}

fn parse_printer(s: &str) -> Result<PrinterConfig, String> {
    PrinterConfig::by_name(s).ok_or_else(|| {
        format!(
            "Unknown printer '{}'. Use one of: {}",
            s,
            PrinterConfig::ALL.map(|p| p.name).join(", ")
        )
    })
}

fn parse_energy(s: &str) -> Result<u16, String> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|e| format!("Invalid energy '{}': {}", s, e))
}
