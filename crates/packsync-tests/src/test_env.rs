//! Hermetic test environment
//!
//! An instance directory plus a scratch directory for plan files, both
//! removed when the environment drops.

use anyhow::Result;
use packsync_lib::testing::{InstanceFixture, TempDirFixture};
use std::path::{Path, PathBuf};

pub struct TestEnvironment {
    pub instance: InstanceFixture,
    scratch: TempDirFixture,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            instance: InstanceFixture::new().map_err(|e| anyhow::anyhow!("{e}"))?,
            scratch: TempDirFixture::new().map_err(|e| anyhow::anyhow!("{e}"))?,
        })
    }

    /// Seed `mods/` with files
    pub fn with_mods(mut self, filenames: &[&str]) -> Result<Self> {
        for filename in filenames {
            self.instance = self
                .instance
                .with_mod(filename, filename)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
        }
        Ok(self)
    }

    pub fn instance_root(&self) -> &Path {
        self.instance.root()
    }

    /// Write a plan file into the scratch directory
    pub fn write_plan(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.scratch
            .write_file(name, content)
            .map_err(|e| anyhow::anyhow!("{e}"))
    }

    pub fn mod_names(&self) -> Result<Vec<String>> {
        self.instance.mod_names().map_err(|e| anyhow::anyhow!("{e}"))
    }
}
