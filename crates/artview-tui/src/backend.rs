use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use artview_core::{FetchError, LoadTicket, PageSource, load_page};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Listen for backend commands until the command channel closes.
///
/// Each page load runs as its own task with its own cancel token; a new
/// `LoadPage` cancels the previous token, so a superseded load never reports
/// back. The app still checks tickets, since a response may already be
/// queued when the cancel lands.
pub async fn run(
    source: Arc<dyn PageSource>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    let mut inflight = CancellationToken::new();

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::LoadPage { ticket } => {
                inflight.cancel();
                inflight = CancellationToken::new();

                let source = source.clone();
                let tx = tx.clone();
                let cancel = inflight.clone();
                tokio::spawn(async move {
                    match fetch(source.as_ref(), ticket, &cancel).await {
                        Err(FetchError::Cancelled) => {
                            tracing::debug!(seq = ticket.seq, page = ticket.page, "load superseded");
                        }
                        result => {
                            let _ = tx.send(into_event(ticket, result));
                        }
                    }
                });
            }
        }
    }

    inflight.cancel();
}

async fn fetch(
    source: &dyn PageSource,
    ticket: LoadTicket,
    cancel: &CancellationToken,
) -> Result<artview_core::PageWindow, FetchError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(FetchError::Cancelled),
        result = load_page(source, ticket.page) => result,
    }
}

fn into_event(
    ticket: LoadTicket,
    result: Result<artview_core::PageWindow, FetchError>,
) -> BackendEvent {
    match result {
        Ok(window) => BackendEvent::PageLoaded { ticket, window },
        Err(e) => {
            tracing::warn!(page = ticket.page, error = %e, "failed to load artworks");
            BackendEvent::PageFailed {
                ticket,
                error: e.to_string(),
            }
        }
    }
}
