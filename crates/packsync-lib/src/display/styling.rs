//! Symbols and colours for status output

use console::{Term, style};

/// Chooses symbols and colours for the current terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleManager {
    color: bool,
    unicode: bool,
}

impl StyleManager {
    pub fn new(color: bool, unicode: bool) -> Self {
        Self { color, unicode }
    }

    /// Unicode support from the stderr terminal's features
    pub fn detect(color: bool) -> Self {
        let unicode = Term::stderr().features().wants_emoji();
        Self::new(color, unicode)
    }

    /// No colour, ASCII symbols
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn unicode(&self) -> bool {
        self.unicode
    }

    pub fn checkmark(&self) -> &'static str {
        if self.unicode { "✓" } else { "+" }
    }

    pub fn cross(&self) -> &'static str {
        if self.unicode { "✗" } else { "x" }
    }

    pub fn warning_sign(&self) -> &'static str {
        "!"
    }

    pub fn bullet(&self) -> &'static str {
        if self.unicode { "•" } else { "-" }
    }

    pub fn format_success(&self, text: &str) -> String {
        format!(
            "{} {}",
            style(self.checkmark()).green().force_styling(self.color),
            text
        )
    }

    pub fn format_error(&self, text: &str) -> String {
        format!(
            "{} {}",
            style(self.cross()).red().force_styling(self.color),
            text
        )
    }

    pub fn format_warning(&self, text: &str) -> String {
        format!(
            "{} {}",
            style(self.warning_sign()).yellow().force_styling(self.color),
            text
        )
    }

    pub fn format_info(&self, text: &str) -> String {
        format!("{} {}", style("·").cyan().force_styling(self.color), text)
    }

    pub fn style_emphasis(&self, text: &str) -> String {
        style(text).bold().force_styling(self.color).to_string()
    }

    pub fn style_subtle(&self, text: &str) -> String {
        style(text).dim().force_styling(self.color).to_string()
    }
}

#[cfg(test)]
mod tests {
    include!("styling.test.rs");
}
