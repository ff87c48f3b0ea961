//! Configuration loading
//!
//! Coordinates .env files, environment variables and the command line into a
//! single [`CliConfig`].

use clap::Parser;
use dotenvy::from_filename;
use tracing::debug;

use super::cli::{Cli, CliConfig};
use super::config::AppConfig;
use super::env::EnvironmentConfig;
use crate::primitives::ConfigError;

/// Env files tried in order; earlier files win since dotenvy never overrides
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env` into the process environment
///
/// Missing files are ignored. Files that exist but cannot be read or parsed
/// are an error.
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        match from_filename(env_file) {
            Ok(path) => debug!(path = %path.display(), "Loaded env file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl AppConfig {
    /// Resolve a parsed command line against the colour environment
    pub fn resolve(cli_config: AppConfig, env: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env.apply_color_config(config.color);
        config = config.merge_with(cli_config);
        config.validate()?;
        Ok(config)
    }
}

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files()?;
        let cli = Cli::parse();
        let env = EnvironmentConfig::load()?;
        Self::from_cli(cli, &env)
    }

    pub fn from_cli(cli: Cli, env: &EnvironmentConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            app_config: AppConfig::resolve(cli.config, env)?,
            command: cli.command,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
