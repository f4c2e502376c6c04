use artview_core::{LoadTicket, PageWindow};

/// Commands sent from the TUI to the backend.
#[derive(Debug, Clone, Copy)]
pub enum BackendCommand {
    /// Load a page. Supersedes any load still in flight.
    LoadPage { ticket: LoadTicket },
}

/// Events flowing from the backend to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    PageLoaded {
        ticket: LoadTicket,
        window: PageWindow,
    },
    PageFailed {
        ticket: LoadTicket,
        error: String,
    },
}
