/// Severity of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient message shown above the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    /// Tick at which the message was posted (info messages fade out).
    pub posted_at: usize,
}

/// Info messages disappear after this many ticks.
pub const INFO_TTL_TICKS: usize = 40;

impl StatusMessage {
    pub fn info(text: impl Into<String>, tick: usize) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
            posted_at: tick,
        }
    }

    pub fn error(text: impl Into<String>, tick: usize) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
            posted_at: tick,
        }
    }

    /// Errors stay until replaced; info messages expire.
    pub fn expired(&self, tick: usize) -> bool {
        self.kind == StatusKind::Info && tick.wrapping_sub(self.posted_at) > INFO_TTL_TICKS
    }
}
