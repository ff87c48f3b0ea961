use super::*;
use serde_json::json;
use tempfile::TempDir;

fn sample_manifest() -> Value {
    json!({
        "name": "All The Mods 9",
        "gameVersion": "1.20.1",
        "baseModLoader": { "name": "forge-47.2.0" },
        "installedAddons": [
            { "addonID": 238222, "installedFile": { "fileName": "jei-1.20.1-forge.jar" } },
            { "addonID": 32274, "installedFile": {} },
            { "installedFile": { "fileName": "orphan.jar" } }
        ],
        "unknownField": [1, 2, 3]
    })
}

/// Write `manifest` into a fresh instance root and load it back
fn load(manifest: &Value) -> (TempDir, InstanceManifest) {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(MANIFEST_FILE),
        serde_json::to_string(manifest).unwrap(),
    )
    .unwrap();
    let manifest = InstanceManifest::load(temp_dir.path()).unwrap();
    (temp_dir, manifest)
}

#[test]
fn test_accessors() {
    let (_dir, manifest) = load(&sample_manifest());

    assert_eq!(manifest.name(), Some("All The Mods 9"));
    assert_eq!(manifest.game_version(), Some("1.20.1"));
    assert_eq!(manifest.mod_loader(), Some("forge-47.2.0"));
    assert_eq!(
        manifest.installed_addons(),
        vec![
            InstalledAddon {
                addon_id: 238222,
                file_name: Some("jei-1.20.1-forge.jar".to_string()),
            },
            InstalledAddon {
                addon_id: 32274,
                file_name: None,
            },
        ]
    );
}

#[test]
fn test_missing_fields() {
    let (_dir, manifest) = load(&json!({}));
    assert_eq!(manifest.name(), None);
    assert_eq!(manifest.game_version(), None);
    assert!(manifest.installed_addons().is_empty());
}

#[test]
fn test_load_records_path() {
    let (temp_dir, manifest) = load(&sample_manifest());
    assert_eq!(manifest.path(), temp_dir.path().join(MANIFEST_FILE));
}

#[test]
fn test_load_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let err = InstanceManifest::load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, InstanceError::NotFound { .. }));
}

#[test]
fn test_load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(MANIFEST_FILE), "{ not json").unwrap();

    let err = InstanceManifest::load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, InstanceError::Parse { .. }));
}
