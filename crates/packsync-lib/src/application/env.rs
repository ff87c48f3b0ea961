//! Standard colour environment variables
//!
//! `NO_COLOR`, `FORCE_COLOR`, `CLICOLOR` and `CI`, read through envy.

use crate::primitives::{ColorIntent, ConfigError};
use serde::Deserialize;

/// Environment variables that affect output styling
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// Any non-empty value disables colour
    pub no_color: Option<String>,
    /// 0/false disables, 1/2/3/true enables
    pub force_color: Option<String>,
    /// 0 disables colour
    pub clicolor: Option<String>,
    /// Any value means a CI run
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    /// Read from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Read from explicit `(NAME, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars).map_err(|source| ConfigError::EnvironmentParsingFailed { source })
    }

    /// Apply the variables to a colour intent
    ///
    /// Precedence: CI, then CLICOLOR < NO_COLOR < FORCE_COLOR
    pub fn apply_color_config(&self, mut color: ColorIntent) -> ColorIntent {
        if self.ci.is_some() {
            return ColorIntent::Never;
        }

        if self.clicolor.as_deref() == Some("0") {
            color = ColorIntent::Never;
        }

        if self.no_color.as_deref().is_some_and(|v| !v.is_empty()) {
            color = ColorIntent::Never;
        }

        if let Some(force_color) = &self.force_color {
            match force_color.as_str() {
                "0" | "false" => color = ColorIntent::Never,
                "1" | "2" | "3" | "true" => color = ColorIntent::Always,
                _ => {} // unrecognised values are ignored
            }
        }

        color
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
