use super::*;

#[test]
fn test_default_config() {
    let config = NetworkingConfig::default();
    assert_eq!(config.timeout_seconds, 30);
    assert!(config.user_agent.starts_with("packsync/"));
}

#[test]
fn test_build_client_with_custom_timeout() {
    let config = NetworkingConfig::default().with_timeout(5);
    assert_eq!(config.timeout_seconds, 5);
    assert!(config.build_client().is_ok());
}

#[test]
fn test_zero_timeout_rejected() {
    let result = NetworkingConfig::default().with_timeout(0).build_client();
    assert!(matches!(
        result,
        Err(NetworkingError::InvalidTimeout { seconds: 0 })
    ));
}
