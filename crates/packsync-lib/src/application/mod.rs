//! Application layer
//!
//! CLI surface, configuration loading and command handlers.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;

pub use cli::{Cli, CliConfig, Commands};
pub use commands::{apply_plan, execute_command, execute_command_with_config};
pub use config::AppConfig;
pub use env::EnvironmentConfig;
pub use loader::load_env_files;
