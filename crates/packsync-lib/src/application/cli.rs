use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;

/// packsync CLI - modpack update reconciliation
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "packsync")]
#[command(about = "Apply modpack update plans to a local game instance")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration resolved from all sources, plus the requested command
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

/// Available packsync commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Apply an update plan to the instance
    Apply {
        /// Plan file (.json, .yml or .yaml)
        #[arg(help = "Path to the update plan")]
        plan: PathBuf,
    },

    /// Summarize an update plan without touching the instance
    Inspect {
        /// Plan file (.json, .yml or .yaml)
        #[arg(help = "Path to the update plan")]
        plan: PathBuf,
    },

    /// Show metadata from the instance's minecraftinstance.json
    Instance,

    /// Show version information
    Version,
}

impl Commands {
    /// Whether the command needs `--instance`
    pub fn requires_instance(&self) -> bool {
        match self {
            Commands::Apply { .. } => true,
            Commands::Instance => true,
            Commands::Inspect { .. } => false,
            Commands::Version => false,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
