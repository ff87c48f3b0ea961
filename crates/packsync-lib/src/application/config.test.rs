use super::*;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.instance, None);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.net_timeout, 30);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_merge_takes_non_default_values() {
    let base = AppConfig {
        instance: Some(PathBuf::from("/from/env")),
        net_timeout: 10,
        ..AppConfig::default()
    };
    let cli = AppConfig {
        log_level: 3,
        color: ColorIntent::Never,
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };

    let merged = base.merge_with(cli);
    assert_eq!(merged.instance, Some(PathBuf::from("/from/env")));
    assert_eq!(merged.net_timeout, 10);
    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.color, ColorIntent::Never);
    assert_eq!(merged.log_format, LogFormat::Json);
}

#[test]
fn test_merge_prefers_cli_instance() {
    let base = AppConfig {
        instance: Some(PathBuf::from("/a")),
        ..AppConfig::default()
    };
    let cli = AppConfig {
        instance: Some(PathBuf::from("/b")),
        ..AppConfig::default()
    };
    assert_eq!(base.merge_with(cli).instance, Some(PathBuf::from("/b")));
}

#[test]
fn test_require_instance() {
    let config = AppConfig::default();
    assert!(matches!(
        config.require_instance(),
        Err(ConfigError::NoInstance)
    ));
    assert!(
        ConfigError::NoInstance
            .to_string()
            .starts_with("No instance defined")
    );

    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        instance: Some(temp_dir.path().to_path_buf()),
        ..AppConfig::default()
    };
    assert_eq!(config.require_instance().unwrap(), temp_dir.path());
}

#[test]
fn test_require_instance_must_be_directory() {
    let temp_dir = TempDir::new().unwrap();
    let missing = AppConfig {
        instance: Some(temp_dir.path().join("missing")),
        ..AppConfig::default()
    };
    assert!(matches!(
        missing.require_instance(),
        Err(ConfigError::InvalidInstance { .. })
    ));
}

#[test]
fn test_validate_ignores_stale_instance() {
    let config = AppConfig {
        instance: Some(PathBuf::from("/definitely/not/an/instance")),
        ..AppConfig::default()
    };
    assert!(config.validate().is_ok());
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let config = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_logger_config_maps_verbosity() {
    let config = AppConfig {
        log_level: 2,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    let logger = config.to_logger_config();
    assert_eq!(logger.level, LogLevel::Info);
    assert!(!logger.color);
}
