//! Update plan data model
//!
//! An [`UpdatePlan`] is the precomputed diff between a remote modpack manifest
//! and a local instance. It is produced elsewhere, loaded once, and consumed by
//! exactly one reconcile run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Plan loading errors
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Failed to read plan file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON plan: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid YAML plan: {reason}")]
    Yaml { reason: String },
}

/// One mod file action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFile {
    /// Display name, informational only
    #[serde(default)]
    pub name: String,

    /// Current or target filename inside `mods/`
    pub filename: String,

    /// File to remove before the replacement is fetched (changed entries only)
    #[serde(
        rename = "oldFilename",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub old_filename: Option<String>,

    #[serde(rename = "addonID", default)]
    pub addon_id: u64,

    #[serde(rename = "fileID", default)]
    pub file_id: u64,

    /// Absent means there is nothing to fetch for this entry
    #[serde(
        rename = "downloadUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url: Option<String>,

    #[serde(default)]
    pub required: bool,
}

impl UpdateFile {
    /// Minimal entry identified by filename only
    pub fn new(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            name: filename.clone(),
            filename,
            old_filename: None,
            addon_id: 0,
            file_id: 0,
            download_url: None,
            required: false,
        }
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    pub fn with_old_filename(mut self, old_filename: impl Into<String>) -> Self {
        self.old_filename = Some(old_filename.into());
        self
    }
}

/// One arbitrary file written verbatim into the instance root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Logical path, optionally prefixed with `overrides/`
    pub key: String,

    /// Raw text or a data-URI / base64 payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(rename = "isFile", default = "default_is_file")]
    pub is_file: bool,
}

fn default_is_file() -> bool {
    true
}

impl OverrideEntry {
    pub fn file(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content: Some(content.into()),
            is_file: true,
        }
    }
}

/// Full instruction set for one reconcile run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,

    /// Overrides expected to produce writes; directory entries are excluded upstream
    #[serde(default)]
    pub overrides_total: u64,

    #[serde(default)]
    pub new_addons: Vec<UpdateFile>,

    #[serde(default)]
    pub changed_addons: Vec<UpdateFile>,

    #[serde(default)]
    pub disabled_addons: Vec<UpdateFile>,

    #[serde(default)]
    pub removed_addons: Vec<UpdateFile>,
}

/// Reconcile phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Add,
    Replace,
    Disable,
    Remove,
    Overrides,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Add,
        Phase::Replace,
        Phase::Disable,
        Phase::Remove,
        Phase::Overrides,
    ];

    /// Whether an entry failure in this phase aborts the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Phase::Add | Phase::Replace | Phase::Remove)
    }

    /// Human-facing name of the plan list feeding this phase
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Add => "New addons",
            Phase::Replace => "Changed addons",
            Phase::Disable => "Disabled addons",
            Phase::Remove => "Removed addons",
            Phase::Overrides => "Overrides",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Add => "add",
            Phase::Replace => "replace",
            Phase::Disable => "disable",
            Phase::Remove => "remove",
            Phase::Overrides => "overrides",
        };
        f.write_str(name)
    }
}

/// An entry that will be passed over without action or progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub phase: Phase,
    pub entry: String,
    pub reason: &'static str,
}

impl UpdatePlan {
    /// Load a plan from disk; `.yml`/`.yaml` parse as YAML, everything else as JSON
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let data = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&data),
            _ => Self::from_json_str(&data),
        }
    }

    pub fn from_json_str(data: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_yaml_str(data: &str) -> Result<Self, PlanError> {
        serde_saphyr::from_str(data).map_err(|e| PlanError::Yaml {
            reason: e.to_string(),
        })
    }

    /// Fixed progress denominator for a run over this plan
    pub fn total(&self) -> u64 {
        self.overrides_total
            + self.new_addons.len() as u64
            + self.changed_addons.len() as u64
            + self.disabled_addons.len() as u64
            + self.removed_addons.len() as u64
    }

    /// Number of entries listed for a phase
    pub fn phase_len(&self, phase: Phase) -> usize {
        match phase {
            Phase::Add => self.new_addons.len(),
            Phase::Replace => self.changed_addons.len(),
            Phase::Disable => self.disabled_addons.len(),
            Phase::Remove => self.removed_addons.len(),
            Phase::Overrides => self.overrides.len(),
        }
    }

    /// Entries that lack the optional fields their phase needs
    ///
    /// These are still part of [`UpdatePlan::total`], so a run containing any
    /// of them finishes below 100%.
    pub fn skipped(&self) -> Vec<SkippedEntry> {
        let mut skipped = Vec::new();

        for addon in &self.new_addons {
            if addon.download_url.is_none() {
                skipped.push(SkippedEntry {
                    phase: Phase::Add,
                    entry: addon.filename.clone(),
                    reason: "no downloadUrl",
                });
            }
        }

        for addon in &self.changed_addons {
            let reason = match (&addon.download_url, &addon.old_filename) {
                (None, _) => "no downloadUrl",
                (Some(_), None) => "no oldFilename",
                _ => continue,
            };
            skipped.push(SkippedEntry {
                phase: Phase::Replace,
                entry: addon.filename.clone(),
                reason,
            });
        }

        for entry in &self.overrides {
            let reason = if !entry.is_file {
                "directory entry"
            } else if entry.content.is_none() {
                "no content"
            } else {
                continue;
            };
            skipped.push(SkippedEntry {
                phase: Phase::Overrides,
                entry: entry.key.clone(),
                reason,
            });
        }

        skipped
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
