use super::*;
use crate::display::StyleManager;
use crate::networking::MockContentFetcher;
use crate::plan::UpdateFile;
use crate::primitives::ConfigError;
use crate::testing::InstanceFixture;
use std::path::PathBuf;
use tempfile::TempDir;

fn display() -> Display {
    Display::with_styling(StyleManager::plain())
}

fn write_plan(dir: &TempDir, name: &str, plan: &serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string(plan).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn test_apply_requires_instance() {
    let err = execute_command_with_config(
        Commands::Apply {
            plan: PathBuf::from("plan.json"),
        },
        &AppConfig::default(),
        &display(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::NoInstance)
    ));
}

#[tokio::test]
async fn test_instance_requires_instance() {
    let err = execute_command_with_config(Commands::Instance, &AppConfig::default(), &display())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No instance defined"));
}

#[tokio::test]
async fn test_inspect_does_not_need_instance() {
    let dir = TempDir::new().unwrap();
    let plan = write_plan(
        &dir,
        "plan.json",
        &serde_json::json!({
            "newAddons": [{ "filename": "a.jar" }],
            "overridesTotal": 0
        }),
    );

    execute_command_with_config(Commands::Inspect { plan }, &AppConfig::default(), &display())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_stale_instance_only_blocks_instance_commands() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        instance: Some(dir.path().join("gone")),
        ..AppConfig::default()
    };

    execute_command_with_config(Commands::Version, &config, &display())
        .await
        .unwrap();

    let plan = write_plan(&dir, "plan.json", &serde_json::json!({ "overridesTotal": 0 }));
    execute_command_with_config(Commands::Inspect { plan }, &config, &display())
        .await
        .unwrap();

    let err = execute_command_with_config(Commands::Instance, &config, &display())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidInstance { .. })
    ));
}

#[tokio::test]
async fn test_inspect_missing_plan_has_context() {
    let err = execute_command_with_config(
        Commands::Inspect {
            plan: PathBuf::from("/definitely/not/here.json"),
        },
        &AppConfig::default(),
        &display(),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().starts_with("Failed to load plan"));
}

#[tokio::test]
async fn test_instance_command_reads_manifest() {
    let instance = InstanceFixture::new()
        .unwrap()
        .with_manifest(&serde_json::json!({
            "name": "Test Pack",
            "gameVersion": "1.20.1",
            "installedAddons": []
        }))
        .unwrap();
    let config = AppConfig {
        instance: Some(instance.root().to_path_buf()),
        ..AppConfig::default()
    };

    execute_command_with_config(Commands::Instance, &config, &display())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_version_command() {
    execute_command_with_config(Commands::Version, &AppConfig::default(), &display())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_apply_plan_reports_progress_and_summary() {
    let instance = InstanceFixture::new()
        .unwrap()
        .with_mod("old.jar", "old")
        .unwrap();
    let fetcher = MockContentFetcher::new()
        .with_response("https://cdn.test/new.jar", "new")
        .await;
    let reconciler = Reconciler::new(LiveFileMutator::new(), fetcher);

    let plan = UpdatePlan {
        new_addons: vec![UpdateFile::new("new.jar").with_download_url("https://cdn.test/new.jar")],
        disabled_addons: vec![UpdateFile::new("old.jar")],
        ..UpdatePlan::default()
    };

    let report = apply_plan(&reconciler, plan, instance.root(), &display())
        .await
        .unwrap();

    assert_eq!(report.completed, 2);
    assert_eq!(report.percent(), 100.0);
    assert_eq!(instance.mod_names().unwrap(), vec!["new.jar", "old.jar.disabled"]);
}

#[tokio::test]
async fn test_apply_plan_fatal_failure_is_update_failed() {
    let instance = InstanceFixture::new().unwrap();
    let fetcher = MockContentFetcher::new()
        .with_failure("https://cdn.test/a.jar", "connection refused")
        .await;
    let reconciler = Reconciler::new(LiveFileMutator::new(), fetcher);

    let plan = UpdatePlan {
        new_addons: vec![UpdateFile::new("a.jar").with_download_url("https://cdn.test/a.jar")],
        ..UpdatePlan::default()
    };

    let err = apply_plan(&reconciler, plan, instance.root(), &display())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "update failed");
    assert!(err
        .downcast_ref::<crate::reconcile::ReconcileError>()
        .is_some());
}
