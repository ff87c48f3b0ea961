use super::*;

fn env_of(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    )
    .unwrap()
}

#[test]
fn test_no_variables_keep_intent() {
    let env = env_of(&[("PATH", "/usr/bin")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
    assert_eq!(env.apply_color_config(ColorIntent::Always), ColorIntent::Always);
}

#[test]
fn test_no_color() {
    let env = env_of(&[("NO_COLOR", "1")]);
    assert_eq!(env.no_color.as_deref(), Some("1"));
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let env = env_of(&[("NO_COLOR", "")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_force_color_wins_over_no_color_and_clicolor() {
    let env = env_of(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_force_color_disable() {
    let env = env_of(&[("FORCE_COLOR", "false")]);
    assert_eq!(env.apply_color_config(ColorIntent::Always), ColorIntent::Never);
}

#[test]
fn test_invalid_force_color_ignored() {
    let env = env_of(&[("FORCE_COLOR", "sometimes")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_ci_disables_color() {
    let env = env_of(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_clicolor_zero() {
    let env = env_of(&[("CLICOLOR", "0")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);

    let env = env_of(&[("CLICOLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}
