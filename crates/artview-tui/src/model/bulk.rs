use artview_core::{BulkCount, SelectionError};

/// Whether the overlay adds or removes rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkMode {
    #[default]
    Select,
    Deselect,
}

impl BulkMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Deselect => "Deselect",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Select => Self::Deselect,
            Self::Deselect => Self::Select,
        }
    }
}

/// State of the "Select Multiple Rows" overlay.
#[derive(Debug, Clone, Default)]
pub struct BulkPanelState {
    pub active: bool,
    pub mode: BulkMode,
    pub input: String,
    /// Validation message shown under the input.
    pub error: Option<String>,
}

impl BulkPanelState {
    pub fn open(&mut self) {
        self.active = true;
        self.mode = BulkMode::Select;
        self.input.clear();
        self.error = None;
    }

    pub fn close(&mut self) {
        self.active = false;
        self.input.clear();
        self.error = None;
    }

    /// Only digits are accepted; anything else would fail validation anyway.
    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.input.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.error = None;
    }

    /// Validate the typed count, recording the message on failure.
    pub fn parse(&mut self) -> Result<BulkCount, SelectionError> {
        BulkCount::parse(&self.input).inspect_err(|e| self.error = Some(e.to_string()))
    }
}
