//! Application configuration
//!
//! Precedence: defaults -> .env files -> environment variables -> CLI args.
//! clap reads the `PACKSYNC_*` variables itself; loading the .env files first
//! makes their values visible to it.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration values
pub mod defaults {
    use crate::primitives::{ColorIntent, LogFormat, LogOutput};

    pub const LOG_LEVEL: u8 = 0; // errors only
    pub const LOG_FORMAT: LogFormat = LogFormat::Text;
    pub const LOG_OUTPUT: LogOutput = LogOutput::Stderr;
    pub const NET_TIMEOUT: u64 = 30;
    pub const COLOR: ColorIntent = ColorIntent::Auto;
}

/// serde default hooks
mod default_fns {
    use super::defaults;
    use crate::primitives::{ColorIntent, LogFormat, LogOutput};

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT
    }

    pub fn net_timeout() -> u64 {
        defaults::NET_TIMEOUT
    }

    pub fn color() -> ColorIntent {
        defaults::COLOR
    }
}

/// Global options shared by every command
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Instance directory to reconcile
    #[arg(short, long, env = "PACKSYNC_INSTANCE", global = true)]
    #[serde(default)]
    pub instance: Option<PathBuf>,

    /// Download timeout in seconds
    #[arg(long, env = "PACKSYNC_NET_TIMEOUT", default_value_t = defaults::NET_TIMEOUT, global = true)]
    #[serde(default = "default_fns::net_timeout")]
    pub net_timeout: u64,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(
        long,
        env = "PACKSYNC_LOG_LEVEL",
        default_value_t = defaults::LOG_LEVEL,
        value_parser = clap::value_parser!(u8).range(0..=4),
        global = true
    )]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, env = "PACKSYNC_LOG_FORMAT", value_enum, default_value_t = defaults::LOG_FORMAT, global = true)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "PACKSYNC_LOG_OUTPUT", value_enum, default_value_t = defaults::LOG_OUTPUT, global = true)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(long, env = "PACKSYNC_COLOR", value_enum, default_value_t = defaults::COLOR, global = true)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance: None,
            net_timeout: default_fns::net_timeout(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color.resolve(),
        }
    }

    /// Merge with `other`, taking its non-default values
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.instance.is_some() {
            self.instance = other.instance;
        }

        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if other.net_timeout != default_fns::net_timeout() {
            self.net_timeout = other.net_timeout;
        }

        if other.log_format != defaults::LOG_FORMAT {
            self.log_format = other.log_format;
        }
        if other.log_output != defaults::LOG_OUTPUT {
            self.log_output = other.log_output;
        }
        if other.color != defaults::COLOR {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    ///
    /// The instance is not checked here; commands that need one call
    /// [`AppConfig::require_instance`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.net_timeout == 0 {
            return Err(ConfigError::ParseError {
                value: self.net_timeout.to_string(),
                reason: "net timeout must be at least one second".to_string(),
            });
        }

        Ok(())
    }

    /// Instance directory for commands that touch an instance
    pub fn require_instance(&self) -> Result<&Path, ConfigError> {
        let instance = self.instance.as_deref().ok_or(ConfigError::NoInstance)?;
        if !instance.is_dir() {
            return Err(ConfigError::InvalidInstance {
                path: instance.to_path_buf(),
            });
        }
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
