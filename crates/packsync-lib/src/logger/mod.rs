use crate::primitives::*;
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger implementation using tracing with indicatif progress integration
#[derive(Debug)]
pub struct Logger;

/// Build the default filter directives for a verbosity level
///
/// packsync crates log at the requested level, HTTP plumbing stays at warn.
pub fn filter_directives(level: LogLevel) -> String {
    let level_str = level.as_directive();
    format!(
        "packsync={level_str},packsync_lib={level_str},hyper_util=warn,reqwest=warn,h2=warn,tokio=warn,mio=warn,want=warn,{level_str}"
    )
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        // Log lines are routed through the indicatif writers so they don't tear
        // the reconcile progress bar
        let indicatif_layer = IndicatifLayer::new();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directives(config.level)));

        let fmt_layer = match (config.output, config.format) {
            (LogOutput::Stderr, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(config.color)
                .compact()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Yaml) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(config.color)
                .pretty()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(config.color)
                .compact()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Yaml) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(config.color)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        GLOBAL_LOGGER
            .set(Logger)
            .map_err(|_| LoggerError::AlreadyInitialized)?;

        tracing::info!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            color = config.color,
            "Logger initialized"
        );

        GLOBAL_LOGGER.get().ok_or(LoggerError::AlreadyInitialized)
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    /// Check if logger is initialized
    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    /// Log an error message with optional context
    pub fn error(&self, message: &str, context: Option<LogContext>) {
        if let Some(ctx) = context {
            tracing::error!(
                operation = %ctx.operation,
                current = ctx.current_item,
                total = ctx.total_items,
                "{}", message
            );
        } else {
            tracing::error!("{}", message);
        }
    }

    /// Log a warning message with optional context
    pub fn warn(&self, message: &str, context: Option<LogContext>) {
        if let Some(ctx) = context {
            tracing::warn!(
                operation = %ctx.operation,
                current = ctx.current_item,
                total = ctx.total_items,
                "{}", message
            );
        } else {
            tracing::warn!("{}", message);
        }
    }

    /// Log an info message with optional context
    pub fn info(&self, message: &str, context: Option<LogContext>) {
        if let Some(ctx) = context {
            tracing::info!(
                operation = %ctx.operation,
                current = ctx.current_item,
                total = ctx.total_items,
                "{}", message
            );
        } else {
            tracing::info!("{}", message);
        }
    }

    /// Log a debug message with optional context
    pub fn debug(&self, message: &str, context: Option<LogContext>) {
        if let Some(ctx) = context {
            tracing::debug!(
                operation = %ctx.operation,
                current = ctx.current_item,
                total = ctx.total_items,
                "{}", message
            );
        } else {
            tracing::debug!("{}", message);
        }
    }
}

/// Quick logging macros that use the global logger if available, fall back to tracing macros
#[macro_export]
macro_rules! log_error {
    ($msg:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.error($msg, None);
        } else {
            tracing::error!("{}", $msg);
        }
    };
    ($msg:expr, $ctx:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.error($msg, Some($ctx));
        } else {
            tracing::error!("{}", $msg);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.info($msg, None);
        } else {
            tracing::info!("{}", $msg);
        }
    };
    ($msg:expr, $ctx:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.info($msg, Some($ctx));
        } else {
            tracing::info!("{}", $msg);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($msg:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.warn($msg, None);
        } else {
            tracing::warn!("{}", $msg);
        }
    };
    ($msg:expr, $ctx:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.warn($msg, Some($ctx));
        } else {
            tracing::warn!("{}", $msg);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($msg:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.debug($msg, None);
        } else {
            tracing::debug!("{}", $msg);
        }
    };
    ($msg:expr, $ctx:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.debug($msg, Some($ctx));
        } else {
            tracing::debug!("{}", $msg);
        }
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
