use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_write_atomic_creates_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("config").join("nested").join("a.cfg");

    let written = LiveFileMutator::new()
        .write_atomic(&target, b"key=value", true)
        .await
        .unwrap();

    assert!(written);
    assert_eq!(std::fs::read(&target).unwrap(), b"key=value");
}

#[tokio::test]
async fn test_write_atomic_without_parent_creation_fails_on_missing_dir() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("missing").join("a.cfg");

    let result = LiveFileMutator::new()
        .write_atomic(&target, b"x", false)
        .await;

    assert!(result.is_err());
    assert!(!target.exists());
}

#[tokio::test]
async fn test_write_atomic_overwrites_and_leaves_no_temp_files() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("options.txt");
    std::fs::write(&target, "old").unwrap();

    LiveFileMutator::new()
        .write_atomic(&target, b"new", true)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    let count = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(count, 1, "Only the target file should remain");
}

#[tokio::test]
async fn test_no_overwrite_declines_existing_target() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("options.txt");
    std::fs::write(&target, "keep").unwrap();

    let written = LiveFileMutator::no_overwrite()
        .write_atomic(&target, b"replace", true)
        .await
        .unwrap();

    assert!(!written);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "keep");
}

#[tokio::test]
async fn test_no_overwrite_still_writes_new_files() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("fresh.txt");

    let written = LiveFileMutator::no_overwrite()
        .write_atomic(&target, b"hello", true)
        .await
        .unwrap();

    assert!(written);
    assert!(target.exists());
}

#[tokio::test]
async fn test_rename_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("b.jar");
    let dst = temp_dir.path().join("b.jar.disabled");
    std::fs::write(&src, "jar").unwrap();

    let mutator = LiveFileMutator::new();
    mutator.rename(&src, &dst).await.unwrap();
    assert!(!src.exists());
    assert!(dst.exists());

    mutator.delete(&dst).await.unwrap();
    assert!(!dst.exists());
}

#[tokio::test]
async fn test_missing_source_errors() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.jar");
    let mutator = LiveFileMutator::new();

    let rename = mutator
        .rename(&missing, &temp_dir.path().join("x.disabled"))
        .await;
    assert_eq!(rename.unwrap_err().kind(), io::ErrorKind::NotFound);

    let delete = mutator.delete(&missing).await;
    assert_eq!(delete.unwrap_err().kind(), io::ErrorKind::NotFound);
}
