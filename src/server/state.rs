//! Server state and configuration.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::job::PrintOptions;
use crate::text::GlyphRenderer;

/// Font shared between request handlers and the printer worker.
pub type SharedFont = Arc<dyn GlyphRenderer + Send + Sync>;

/// Messages waiting in the in-process queue before the worker blocks.
pub const QUEUE_CAPACITY: usize = 64;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the printer device (e.g., "/dev/rfcomm0")
    pub device_path: String,
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Printer model, energy and font used for every queued message
    pub options: PrintOptions,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Sender half of the print queue; bodies are JSON [`SmsMessage`]s.
    ///
    /// [`SmsMessage`]: crate::message::SmsMessage
    pub queue: mpsc::Sender<String>,
    pub font: SharedFont,
}

impl AppState {
    pub fn new(config: ServerConfig, queue: mpsc::Sender<String>, font: SharedFont) -> Self {
        Self { config, queue, font }
    }
}
