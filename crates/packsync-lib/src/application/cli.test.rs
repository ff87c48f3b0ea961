use super::*;
use crate::primitives::ColorIntent;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_apply_with_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "packsync",
        "apply",
        "plan.json",
        "--instance",
        "/games/pack",
        "--color",
        "never",
    ])
    .unwrap();

    assert_eq!(
        cli.command,
        Some(Commands::Apply {
            plan: PathBuf::from("plan.json")
        })
    );
    assert_eq!(cli.config.instance, Some(PathBuf::from("/games/pack")));
    assert_eq!(cli.config.color, ColorIntent::Never);
}

#[test]
fn test_parse_inspect_and_version() {
    let cli = Cli::try_parse_from(["packsync", "inspect", "plan.yml"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Inspect {
            plan: PathBuf::from("plan.yml")
        })
    );

    let cli = Cli::try_parse_from(["packsync", "version"]).unwrap();
    assert_eq!(cli.command, Some(Commands::Version));
}

#[test]
fn test_log_level_range_enforced() {
    assert!(Cli::try_parse_from(["packsync", "--log-level", "4", "version"]).is_ok());
    assert!(Cli::try_parse_from(["packsync", "--log-level", "5", "version"]).is_err());
}

#[test]
fn test_apply_requires_plan_argument() {
    assert!(Cli::try_parse_from(["packsync", "apply"]).is_err());
}

#[test]
fn test_requires_instance() {
    assert!(Commands::Apply { plan: PathBuf::from("p.json") }.requires_instance());
    assert!(Commands::Instance.requires_instance());
    assert!(!Commands::Inspect { plan: PathBuf::from("p.json") }.requires_instance());
    assert!(!Commands::Version.requires_instance());
}
