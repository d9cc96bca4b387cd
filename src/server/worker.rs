//! Printer worker: drains the print queue one message at a time.
//!
//! Each message is rendered and sent on a blocking thread. A failed print
//! is logged and the message is dropped; the worker moves on to the next.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use super::state::SharedFont;
use crate::error::CatprintError;
use crate::job::{PrintJob, PrintOptions, PrintSource};
use crate::transport::Transport;

/// Run until every sender of `queue` is dropped.
///
/// `open` is called once per message to get a fresh transport, so a printer
/// that was off for one message can still print the next.
pub async fn run<F, T>(
    mut queue: mpsc::Receiver<String>,
    options: PrintOptions,
    font: SharedFont,
    open: F,
) where
    F: Fn() -> Result<T, CatprintError> + Send + Sync + 'static,
    T: Transport + 'static,
{
    let open = Arc::new(open);

    while let Some(body) = queue.recv().await {
        let job = PrintJob::new(PrintSource::Message(body), options.clone());
        let font = font.clone();
        let open = open.clone();

        let result = tokio::task::spawn_blocking(move || print_message(&job, font, open.as_ref())).await;

        match result {
            Ok(Ok(())) => info!("message printed"),
            Ok(Err(e)) => error!(error = %e, "print failed"),
            Err(e) => error!(error = %e, "print task panicked"),
        }
    }

    info!("print queue closed, worker exiting");
}

fn print_message<F, T>(job: &PrintJob, font: SharedFont, open: &F) -> Result<(), CatprintError>
where
    F: Fn() -> Result<T, CatprintError>,
    T: Transport,
{
    let raster = job.rasterize_with(font.as_ref())?;
    let mut transport = open()?;
    job.print_raster(&raster, &mut transport)
}
