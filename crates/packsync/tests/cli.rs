//! CLI runs of the packsync binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn packsync() -> Command {
    let mut cmd = Command::cargo_bin("packsync").unwrap();
    cmd.env_remove("PACKSYNC_INSTANCE")
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn cli_version() {
    packsync()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("packsync"));
}

#[test]
fn cli_version_ignores_stale_instance_variable() {
    let dir = TempDir::new().unwrap();

    packsync()
        .env("PACKSYNC_INSTANCE", dir.path().join("gone"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("packsync"));
}

#[test]
fn cli_apply_without_instance_fails() {
    let dir = TempDir::new().unwrap();
    let plan = dir.path().join("plan.json");
    std::fs::write(&plan, "{}").unwrap();

    packsync()
        .current_dir(dir.path())
        .arg("apply")
        .arg(&plan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No instance defined"));
}

#[test]
fn cli_inspect_lists_skipped_entries() {
    let dir = TempDir::new().unwrap();
    let plan = dir.path().join("plan.json");
    let body = serde_json::json!({
        "overridesTotal": 1,
        "overrides": [{ "key": "overrides/README", "isFile": true }],
        "newAddons": [{ "filename": "no-url.jar" }]
    });
    std::fs::write(&plan, body.to_string()).unwrap();

    packsync()
        .current_dir(dir.path())
        .arg("inspect")
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("no-url.jar"))
        .stdout(predicate::str::contains("2 entries will be skipped"));
}

#[test]
fn cli_apply_disables_and_removes_via_env_instance() {
    let instance = TempDir::new().unwrap();
    let mods = instance.path().join("mods");
    std::fs::create_dir_all(&mods).unwrap();
    std::fs::write(mods.join("old.jar"), "x").unwrap();
    std::fs::write(mods.join("gone.jar"), "x").unwrap();

    let dir = TempDir::new().unwrap();
    let plan = dir.path().join("plan.json");
    let body = serde_json::json!({
        "overridesTotal": 1,
        "overrides": [{ "key": "overrides/options.txt", "content": "Zm92Ojkw", "isFile": true }],
        "disabledAddons": [{ "filename": "old.jar" }],
        "removedAddons": [{ "filename": "gone.jar" }]
    });
    std::fs::write(&plan, body.to_string()).unwrap();

    packsync()
        .current_dir(dir.path())
        .env("PACKSYNC_INSTANCE", instance.path())
        .arg("apply")
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("3/3"));

    assert!(mods.join("old.jar.disabled").exists());
    assert!(!mods.join("gone.jar").exists());
    assert_eq!(
        std::fs::read_to_string(instance.path().join("options.txt")).unwrap(),
        "fov:90"
    );
}

#[test]
fn cli_apply_remove_failure_reports_update_failed() {
    let instance = TempDir::new().unwrap();
    std::fs::create_dir_all(instance.path().join("mods")).unwrap();

    let dir = TempDir::new().unwrap();
    let plan = dir.path().join("plan.json");
    let body = serde_json::json!({ "removedAddons": [{ "filename": "missing.jar" }] });
    std::fs::write(&plan, body.to_string()).unwrap();

    packsync()
        .current_dir(dir.path())
        .arg("--instance")
        .arg(instance.path())
        .arg("apply")
        .arg(&plan)
        .assert()
        .failure()
        .stderr(predicate::str::contains("update failed"));
}
