//! # packsync Library
//!
//! Applies modpack update plans to a local game instance.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types and errors
//! - [`logger`] - Structured logging with progress-bar-safe output
//! - [`plan`] - Update plan model and loading
//! - [`reconcile`] - Five-phase plan execution against an instance directory
//! - [`networking`] - HTTP client configuration and content fetching
//! - [`instance`] - `minecraftinstance.json` metadata
//! - [`display`] - Status lines and progress bars
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! packsync_lib::main().await
//! # }
//! ```

pub mod application;
pub mod display;
pub mod instance;
pub mod logger;
pub mod networking;
pub mod plan;
pub mod primitives;
pub mod reconcile;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use application::{AppConfig, Cli, Commands, execute_command};
pub use instance::InstanceManifest;
pub use logger::Logger;
pub use networking::{ContentFetcher, HttpContentFetcher, NetworkingConfig};
pub use plan::{OverrideEntry, Phase, UpdateFile, UpdatePlan};
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use reconcile::{ProgressSink, ReconcileError, ReconcileReport, Reconciler};

use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    let config = CliConfig::load()?;
    Logger::init(config.app_config.to_logger_config())?;
    execute_command(config).await
}
