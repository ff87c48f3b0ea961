//! Filesystem fixtures with automatic cleanup
//!
//! `TempDirFixture` is a bare scratch directory. `InstanceFixture` lays out
//! an instance root with a `mods/` directory and an optional
//! `minecraftinstance.json`.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::instance::MANIFEST_FILE;
use crate::reconcile::MODS_DIR;

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Temporary directory fixture, removed on drop
pub struct TempDirFixture {
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    pub fn new() -> FixtureResult<Self> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a subdirectory (and parents)
    pub fn create_dir(&self, subdir: &str) -> FixtureResult<PathBuf> {
        let dir_path = self.path().join(subdir);
        fs::create_dir_all(&dir_path)?;
        Ok(dir_path)
    }

    /// Write `content` to a relative path, creating parent directories
    pub fn write_file(&self, file_path: &str, content: impl AsRef<[u8]>) -> FixtureResult<PathBuf> {
        let full_path = self.path().join(file_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    pub fn read_file(&self, file_path: &str) -> FixtureResult<String> {
        Ok(fs::read_to_string(self.path().join(file_path))?)
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }
}

/// Instance root with a `mods/` directory
pub struct InstanceFixture {
    dir: TempDirFixture,
}

impl InstanceFixture {
    pub fn new() -> FixtureResult<Self> {
        let dir = TempDirFixture::new()?;
        dir.create_dir(MODS_DIR)?;
        Ok(Self { dir })
    }

    /// Instance root directory
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.root().join(MODS_DIR)
    }

    /// Place a mod file under `mods/`
    pub fn with_mod(self, filename: &str, content: &str) -> FixtureResult<Self> {
        self.dir.write_file(&format!("{MODS_DIR}/{filename}"), content)?;
        Ok(self)
    }

    /// Write `minecraftinstance.json`
    pub fn with_manifest(self, manifest: &serde_json::Value) -> FixtureResult<Self> {
        self.dir
            .write_file(MANIFEST_FILE, serde_json::to_vec_pretty(manifest)?)?;
        Ok(self)
    }

    pub fn has_mod(&self, filename: &str) -> bool {
        self.mods_dir().join(filename).exists()
    }

    pub fn read_mod(&self, filename: &str) -> FixtureResult<String> {
        self.dir.read_file(&format!("{MODS_DIR}/{filename}"))
    }

    /// Sorted file names currently in `mods/`
    pub fn mod_names(&self) -> FixtureResult<Vec<String>> {
        let mut names = fs::read_dir(self.mods_dir())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(names)
    }

    /// Read a file relative to the instance root
    pub fn read_file(&self, file_path: &str) -> FixtureResult<String> {
        self.dir.read_file(file_path)
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        self.dir.file_exists(file_path)
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
