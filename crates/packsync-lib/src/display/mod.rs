//! Terminal display
//!
//! User-facing output, kept apart from logging: status lines on stdout and a
//! progress bar on stderr. Styling adapts to the resolved colour setting and
//! to whether the terminal can render unicode symbols.

pub mod progress;
pub mod status;
pub mod styling;

pub use progress::ProgressDisplay;
pub use status::StatusLine;
pub use styling::StyleManager;

/// Entry point for user-facing output
#[derive(Debug, Clone, Copy)]
pub struct Display {
    styling: StyleManager,
}

impl Display {
    /// Display for the current stderr terminal
    pub fn new(color: bool) -> Self {
        Self {
            styling: StyleManager::detect(color),
        }
    }

    pub fn with_styling(styling: StyleManager) -> Self {
        Self { styling }
    }

    pub fn styling(&self) -> &StyleManager {
        &self.styling
    }

    /// Status lines with semantic intent
    pub fn status(&self) -> StatusLine<'_> {
        StatusLine::new(&self.styling)
    }

    /// Percentage progress bar for a reconcile run
    pub fn progress(&self, message: &str) -> ProgressDisplay {
        ProgressDisplay::new(self.styling, message)
    }
}
