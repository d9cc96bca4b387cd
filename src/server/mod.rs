//! # SMS Print Server
//!
//! Receives SMS webhooks and prints each message on the cat printer.
//!
//! ```text
//! SMS provider ──POST /sms──► queue (mpsc) ──► worker ──► DeviceTransport
//!                  │                             │
//!                  └─ 200 empty TwiML            └─ "From +1555…: hello"
//! ```
//!
//! ## Routes
//!
//! | Route | Description |
//! |-------|-------------|
//! | `POST /sms` | Webhook form (`From`, `To`, `Body`); queues a print |
//! | `POST /api/preview` | JSON `{"text": ...}`; returns the rendered PNG |
//! | `GET /health` | Liveness check |
//!
//! ## Usage
//!
//! ```bash
//! catprint serve --listen 0.0.0.0:8080 --device /dev/rfcomm0
//! ```

mod handlers;
mod state;
pub mod worker;

pub use handlers::sms::EMPTY_TWIML;
pub use state::{AppState, QUEUE_CAPACITY, ServerConfig, SharedFont};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::CatprintError;
use crate::text::TtfFont;
use crate::transport::DeviceTransport;

/// Build the router for `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sms", post(handlers::sms::receive))
        .route("/api/preview", post(handlers::preview::preview))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and the printer worker.
///
/// The font is loaded once up front; a missing font fails startup rather
/// than every print.
///
/// ## Example
///
/// ```no_run
/// use catprint::job::PrintOptions;
/// use catprint::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), catprint::CatprintError> {
/// let config = ServerConfig {
///     device_path: "/dev/rfcomm0".to_string(),
///     listen_addr: "0.0.0.0:8080".to_string(),
///     options: PrintOptions::default(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), CatprintError> {
    let font: SharedFont = Arc::new(TtfFont::load(
        &config.options.font_path,
        config.options.font_size,
    )?);

    let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);

    let device_path = config.device_path.clone();
    tokio::spawn(worker::run(
        rx,
        config.options.clone(),
        font.clone(),
        move || DeviceTransport::open(&device_path),
    ));

    let app = router(Arc::new(AppState::new(config.clone(), tx, font)));

    info!(
        listen = %config.listen_addr,
        device = %config.device_path,
        printer = config.options.printer.name,
        paper_mm = %format_args!("{:.1}", config.options.printer.width_mm()),
        "catprint server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            CatprintError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| CatprintError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
