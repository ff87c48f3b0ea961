//! Status lines for command output

use super::styling::StyleManager;

/// Writes semantic status lines to stdout
pub struct StatusLine<'a> {
    styling: &'a StyleManager,
}

impl<'a> StatusLine<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    fn detail(item: &str, details: &str) -> String {
        if details.is_empty() {
            item.to_string()
        } else {
            format!("{item}: {details}")
        }
    }

    /// `✓ item: details`
    pub fn success(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_success(&Self::detail(item, details)));
    }

    /// `✗ item: details`
    pub fn error(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_error(&Self::detail(item, details)));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    pub fn message(&self, text: &str) {
        println!("{text}");
    }

    pub fn emphasis(&self, text: &str) {
        println!("{}", self.styling.style_emphasis(text));
    }

    pub fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    /// Aligned `key: value` rows
    pub fn properties(&self, rows: &[(&str, String)]) {
        let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in rows {
            println!("  {:<width$}  {}", self.styling.style_subtle(key), value);
        }
    }

    pub fn list(&self, items: &[String]) {
        for item in items {
            println!("  {} {}", self.styling.bullet(), item);
        }
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}
