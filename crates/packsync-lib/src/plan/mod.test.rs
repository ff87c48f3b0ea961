use super::*;
use tempfile::TempDir;

const SAMPLE_PLAN: &str = r#"{
  "overrides": [
    { "key": "overrides/config/foo.txt", "content": "Zm9v", "isFile": true },
    { "key": "overrides/config", "isFile": false }
  ],
  "overridesTotal": 1,
  "newAddons": [
    {
      "name": "Alpha",
      "filename": "a.jar",
      "addonID": 1001,
      "fileID": 2001,
      "downloadUrl": "https://x/a.jar",
      "required": true
    }
  ],
  "changedAddons": [
    {
      "name": "Beta",
      "filename": "b-2.jar",
      "oldFilename": "b-1.jar",
      "addonID": 1002,
      "fileID": 2002,
      "downloadUrl": "https://x/b-2.jar",
      "required": false
    }
  ],
  "disabledAddons": [{ "name": "Gamma", "filename": "c.jar", "addonID": 1003, "fileID": 2003, "required": false }],
  "removedAddons": []
}"#;

#[test]
fn test_parse_camel_case_plan() {
    let plan = UpdatePlan::from_json_str(SAMPLE_PLAN).unwrap();

    assert_eq!(plan.overrides.len(), 2);
    assert!(!plan.overrides[1].is_file);
    assert_eq!(plan.overrides[1].content, None);
    assert_eq!(plan.new_addons[0].addon_id, 1001);
    assert_eq!(plan.new_addons[0].file_id, 2001);
    assert!(plan.new_addons[0].required);
    assert_eq!(
        plan.changed_addons[0].old_filename.as_deref(),
        Some("b-1.jar")
    );
    assert_eq!(plan.disabled_addons[0].download_url, None);
}

#[test]
fn test_total_uses_overrides_total_not_override_len() {
    let plan = UpdatePlan::from_json_str(SAMPLE_PLAN).unwrap();

    // 1 override (directory excluded upstream) + 1 new + 1 changed + 1 disabled
    assert_eq!(plan.total(), 4);
    assert_eq!(plan.phase_len(Phase::Overrides), 2);
}

#[test]
fn test_empty_plan_defaults() {
    let plan = UpdatePlan::from_json_str("{}").unwrap();
    assert_eq!(plan, UpdatePlan::default());
    assert_eq!(plan.total(), 0);
}

#[test]
fn test_override_is_file_defaults_to_true() {
    let plan = UpdatePlan::from_json_str(r#"{"overrides":[{"key":"a.txt","content":"x"}]}"#)
        .unwrap();
    assert!(plan.overrides[0].is_file);
}

#[test]
fn test_skipped_entries_are_reported() {
    let plan = UpdatePlan {
        new_addons: vec![UpdateFile::new("no-url.jar")],
        changed_addons: vec![
            UpdateFile::new("no-old.jar").with_download_url("https://x/no-old.jar"),
            UpdateFile::new("ok.jar")
                .with_download_url("https://x/ok.jar")
                .with_old_filename("ok-old.jar"),
        ],
        overrides: vec![OverrideEntry {
            key: "overrides/empty.txt".to_string(),
            content: None,
            is_file: true,
        }],
        overrides_total: 1,
        ..UpdatePlan::default()
    };

    let skipped = plan.skipped();
    assert_eq!(skipped.len(), 3);
    assert_eq!(skipped[0].phase, Phase::Add);
    assert_eq!(skipped[0].reason, "no downloadUrl");
    assert_eq!(skipped[1].entry, "no-old.jar");
    assert_eq!(skipped[1].reason, "no oldFilename");
    assert_eq!(skipped[2].phase, Phase::Overrides);
    assert_eq!(skipped[2].reason, "no content");
}

#[test]
fn test_load_json_and_yaml_from_disk() {
    let temp_dir = TempDir::new().unwrap();

    let json_path = temp_dir.path().join("plan.json");
    std::fs::write(&json_path, SAMPLE_PLAN).unwrap();
    let from_json = UpdatePlan::load(&json_path).unwrap();
    assert_eq!(from_json.total(), 4);

    let yaml_path = temp_dir.path().join("plan.yaml");
    std::fs::write(
        &yaml_path,
        "overridesTotal: 0\nremovedAddons:\n  - filename: old.jar\n",
    )
    .unwrap();
    let from_yaml = UpdatePlan::load(&yaml_path).unwrap();
    assert_eq!(from_yaml.removed_addons[0].filename, "old.jar");
    assert_eq!(from_yaml.total(), 1);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = UpdatePlan::load(&temp_dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, PlanError::Io { .. }));
}

#[test]
fn test_phase_order_and_fatality() {
    assert_eq!(Phase::ALL[0], Phase::Add);
    assert_eq!(Phase::ALL[4], Phase::Overrides);
    assert!(Phase::Add.is_fatal());
    assert!(Phase::Replace.is_fatal());
    assert!(Phase::Remove.is_fatal());
    assert!(!Phase::Disable.is_fatal());
    assert!(!Phase::Overrides.is_fatal());
    assert_eq!(Phase::Overrides.to_string(), "overrides");
}
