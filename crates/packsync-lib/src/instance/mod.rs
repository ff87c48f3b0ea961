//! Instance metadata
//!
//! Reads `minecraftinstance.json` from an instance root. The document is kept
//! as raw JSON; only the handful of fields packsync reports on are typed.

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Instance manifest filename, relative to the instance root
pub const MANIFEST_FILE: &str = "minecraftinstance.json";

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("No minecraftinstance.json found in {}", root.display())]
    NotFound { root: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid instance manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// An addon recorded as installed in the instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledAddon {
    pub addon_id: u64,
    pub file_name: Option<String>,
}

/// Parsed `minecraftinstance.json`
#[derive(Debug, Clone)]
pub struct InstanceManifest {
    path: PathBuf,
    raw: Value,
}

impl InstanceManifest {
    /// Load the manifest from `root`
    pub fn load(root: &Path) -> Result<Self, InstanceError> {
        let path = root.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                InstanceError::NotFound {
                    root: root.to_path_buf(),
                }
            } else {
                InstanceError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let raw = serde_json::from_str(&content).map_err(|source| InstanceError::Parse {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded instance manifest");
        Ok(Self { path, raw })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.raw.get("name").and_then(Value::as_str)
    }

    pub fn game_version(&self) -> Option<&str> {
        self.raw.get("gameVersion").and_then(Value::as_str)
    }

    /// Mod loader name, e.g. `forge-47.2.0`
    pub fn mod_loader(&self) -> Option<&str> {
        self.raw
            .get("baseModLoader")
            .and_then(|loader| loader.get("name"))
            .and_then(Value::as_str)
    }

    /// Installed addons; entries without a numeric `addonID` are ignored
    pub fn installed_addons(&self) -> Vec<InstalledAddon> {
        let Some(addons) = self.raw.get("installedAddons").and_then(Value::as_array) else {
            return Vec::new();
        };

        addons
            .iter()
            .filter_map(|addon| {
                let addon_id = addon.get("addonID")?.as_u64()?;
                let file_name = addon
                    .get("installedFile")
                    .and_then(|file| file.get("fileName"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(InstalledAddon { addon_id, file_name })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
