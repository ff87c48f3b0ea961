//! Percentage progress bar
//!
//! Reconcile progress arrives as a percentage, so the bar has a fixed length
//! of 100 and each report sets its position directly.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::StyleManager;
use crate::reconcile::ProgressSink;

/// Bar length; positions are whole percentages
pub const PROGRESS_LENGTH: u64 = 100;

/// indicatif bar driven by reconcile progress reports
pub struct ProgressDisplay {
    bar: ProgressBar,
    styling: StyleManager,
}

impl ProgressDisplay {
    /// Visible bar on stderr
    pub fn new(styling: StyleManager, message: &str) -> Self {
        let bar = ProgressBar::new(PROGRESS_LENGTH);
        bar.set_style(Self::bar_style(&styling));
        bar.set_message(message.to_string());
        Self { bar, styling }
    }

    /// Bar that never draws
    pub fn hidden(styling: StyleManager) -> Self {
        let bar = ProgressBar::with_draw_target(Some(PROGRESS_LENGTH), ProgressDrawTarget::hidden());
        Self { bar, styling }
    }

    fn bar_style(styling: &StyleManager) -> ProgressStyle {
        let (template, chars) = if styling.unicode() {
            ("{msg} [{wide_bar:.cyan/blue}] {pos:>3}%", "█▉▊▋▌▍▎▏  ")
        } else {
            ("{msg} [{wide_bar}] {pos:>3}%", "##-")
        };

        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(chars)
    }

    /// Current position in percent
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self, message: &str) {
        self.bar
            .finish_with_message(self.styling.format_success(message));
    }

    pub fn abandon(&self, message: &str) {
        self.bar
            .abandon_with_message(self.styling.format_error(message));
    }
}

impl ProgressSink for ProgressDisplay {
    fn report(&mut self, percent: f64) {
        let position = percent.clamp(0.0, PROGRESS_LENGTH as f64).round() as u64;
        self.bar.set_position(position);
    }
}

#[cfg(test)]
mod tests {
    include!("progress.test.rs");
}
