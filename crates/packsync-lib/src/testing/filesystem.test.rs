use super::*;

#[test]
fn test_creates_temp_dir_and_writes_file() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;

    fixture.create_dir("config")?;
    fixture.write_file("config/options.txt", "fov:90")?;

    assert!(fixture.file_exists("config/options.txt"));
    assert_eq!(fixture.read_file("config/options.txt")?, "fov:90");
    assert!(fixture.path().join("config").is_dir());

    Ok(())
}

#[test]
fn test_temp_dir_isolation() -> Result<(), Box<dyn std::error::Error>> {
    let fixture1 = TempDirFixture::new()?;
    let fixture2 = TempDirFixture::new()?;

    fixture1.write_file("a.txt", "one")?;

    assert_ne!(fixture1.path(), fixture2.path());
    assert!(!fixture2.file_exists("a.txt"));

    Ok(())
}

#[test]
fn test_instance_fixture_layout() -> Result<(), Box<dyn std::error::Error>> {
    let instance = InstanceFixture::new()?
        .with_mod("b.jar", "b")?
        .with_mod("a.jar", "a")?
        .with_manifest(&serde_json::json!({ "name": "Test Pack" }))?;

    assert!(instance.mods_dir().is_dir());
    assert!(instance.has_mod("a.jar"));
    assert_eq!(instance.read_mod("b.jar")?, "b");
    assert_eq!(instance.mod_names()?, vec!["a.jar", "b.jar"]);
    assert!(instance.file_exists(MANIFEST_FILE));

    Ok(())
}
