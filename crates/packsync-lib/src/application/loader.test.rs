use super::*;
use crate::application::cli::Commands;
use crate::primitives::ColorIntent;
use tempfile::TempDir;

fn env_with(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string()))).unwrap()
}

#[test]
fn test_resolve_applies_environment_color() {
    let config = AppConfig::resolve(AppConfig::default(), &env_with(&[("NO_COLOR", "1")])).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_cli_color_beats_environment() {
    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    let config = AppConfig::resolve(cli, &env_with(&[("NO_COLOR", "1")])).unwrap();
    assert_eq!(config.color, ColorIntent::Always);
}

#[test]
fn test_from_cli_keeps_command_and_instance() {
    let temp_dir = TempDir::new().unwrap();
    let instance = temp_dir.path().to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["packsync", "-i", instance.as_str(), "instance"]).unwrap();
    let config = CliConfig::from_cli(cli, &EnvironmentConfig::default()).unwrap();
    assert_eq!(config.command, Some(Commands::Instance));
    assert_eq!(config.app_config.instance.as_deref(), Some(temp_dir.path()));

}

#[test]
fn test_stale_instance_does_not_block_loading() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing").to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["packsync", "-i", missing.as_str(), "version"]).unwrap();
    let config = CliConfig::from_cli(cli, &EnvironmentConfig::default()).unwrap();
    assert_eq!(config.command, Some(Commands::Version));
    assert!(matches!(
        config.app_config.require_instance(),
        Err(ConfigError::InvalidInstance { .. })
    ));
}
