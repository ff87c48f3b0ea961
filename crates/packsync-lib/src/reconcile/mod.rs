//! Plan reconciliation
//!
//! Applies an [`UpdatePlan`] to an instance directory in five strictly ordered
//! phases: add, replace, disable, remove, overrides. Entries run one at a time.
//! A changed entry relies on its old file being deleted before the new one is
//! fetched, and destination names may repeat across phases.
//!
//! Add, replace and remove failures abort the run. Disable and override
//! failures are logged, collected into the [`ReconcileReport`], and skipped.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::networking::{ContentFetcher, FetchError};
use crate::plan::{OverrideEntry, Phase, UpdateFile, UpdatePlan};
use crate::primitives::LogContext;

pub mod mutator;
pub mod overrides;

pub use mutator::{FileMutator, LiveFileMutator};
pub use overrides::{DecodeError, DecodedOverride, OverrideDecoder, is_binary_key};

/// Mods live here, relative to the instance root
pub const MODS_DIR: &str = "mods";

/// Suffix appended to disabled mod files
pub const DISABLED_SUFFIX: &str = ".disabled";

/// Fatal reconcile errors; the instance is left partially updated
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Instance directory not found: {path}")]
    InstanceNotFound { path: PathBuf },

    #[error("Failed to add {filename}: {source}")]
    AddFailed {
        filename: String,
        source: FetchError,
    },

    #[error("Failed to delete {old_filename} while replacing it with {filename}: {source}")]
    ReplaceDeleteFailed {
        filename: String,
        old_filename: String,
        source: io::Error,
    },

    #[error("Failed to fetch replacement {filename}: {source}")]
    ReplaceFetchFailed {
        filename: String,
        source: FetchError,
    },

    #[error("Failed to remove {filename}: {source}")]
    RemoveFailed {
        filename: String,
        source: io::Error,
    },
}

impl ReconcileError {
    /// Phase the run aborted in, if it got that far
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ReconcileError::InstanceNotFound { .. } => None,
            ReconcileError::AddFailed { .. } => Some(Phase::Add),
            ReconcileError::ReplaceDeleteFailed { .. }
            | ReconcileError::ReplaceFetchFailed { .. } => Some(Phase::Replace),
            ReconcileError::RemoveFailed { .. } => Some(Phase::Remove),
        }
    }
}

/// A logged-and-skipped failure from a recoverable phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverableFailure {
    pub phase: Phase,
    /// Filename or override key of the offending entry
    pub entry: String,
    pub message: String,
}

/// Outcome of a run that reached the end of the plan
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileReport {
    /// Entries that reached their action
    pub completed: u64,
    /// Fixed denominator computed before the run
    pub total: u64,
    /// Entries passed over for missing optional fields or declined writes
    pub skipped: u64,
    pub recoverable: Vec<RecoverableFailure>,
}

impl ReconcileReport {
    pub fn percent(&self) -> f64 {
        progress_percent(self.completed, self.total)
    }

    /// Whether every counted entry reported progress
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// Receives progress percentages in `[0, 100]`
pub trait ProgressSink {
    fn report(&mut self, percent: f64);
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn report(&mut self, percent: f64) {
        self(percent)
    }
}

/// `completed / total * 100`, clamped to `[0, 100]`; an empty plan is complete
pub fn progress_percent(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (completed as f64 / total as f64 * 100.0).min(100.0)
}

/// Per-run execution context; owns the shared progress counter
struct RunState<'p> {
    completed: u64,
    total: u64,
    skipped: u64,
    recoverable: Vec<RecoverableFailure>,
    progress: &'p mut (dyn ProgressSink + Send),
}

impl<'p> RunState<'p> {
    fn new(total: u64, progress: &'p mut (dyn ProgressSink + Send)) -> Self {
        Self {
            completed: 0,
            total,
            skipped: 0,
            recoverable: Vec::new(),
            progress,
        }
    }

    fn advance(&mut self) {
        self.completed += 1;
        let percent = progress_percent(self.completed, self.total);
        debug!(
            current = self.completed,
            total = self.total,
            percent,
            "progress"
        );
        self.progress.report(percent);
    }

    fn context(&self) -> LogContext {
        let mut context = LogContext::with_progress("reconcile", self.total);
        context.set_progress(self.completed);
        context
    }

    fn skip(&mut self, phase: Phase, entry: &str, reason: &str) {
        self.skipped += 1;
        crate::log_debug!(
            &format!("{phase}: skipped {entry} ({reason})"),
            self.context()
        );
    }

    fn recover(&mut self, phase: Phase, entry: &str, message: String) {
        crate::log_warn!(
            &format!("{phase}: {entry} failed, continuing: {message}"),
            self.context()
        );
        self.recoverable.push(RecoverableFailure {
            phase,
            entry: entry.to_string(),
            message,
        });
    }

    fn into_report(self) -> ReconcileReport {
        ReconcileReport {
            completed: self.completed,
            total: self.total,
            skipped: self.skipped,
            recoverable: self.recoverable,
        }
    }
}

/// Executes update plans against an instance directory
pub struct Reconciler<M, F> {
    mutator: M,
    fetcher: F,
}

impl<M: FileMutator, F: ContentFetcher> Reconciler<M, F> {
    pub fn new(mutator: M, fetcher: F) -> Self {
        Self { mutator, fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Apply `plan` to `instance_root`, reporting progress after each actioned entry
    ///
    /// # Errors
    /// Returns the first fatal failure; later entries and phases never run.
    pub async fn apply(
        &self,
        plan: UpdatePlan,
        instance_root: &Path,
        progress: &mut (dyn ProgressSink + Send),
    ) -> Result<ReconcileReport, ReconcileError> {
        let is_dir = tokio::fs::metadata(instance_root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(ReconcileError::InstanceNotFound {
                path: instance_root.to_path_buf(),
            });
        }

        let total = plan.total();
        let mods = instance_root.join(MODS_DIR);
        let mut state = RunState::new(total, progress);

        info!(
            instance = %instance_root.display(),
            total,
            new = plan.new_addons.len(),
            changed = plan.changed_addons.len(),
            disabled = plan.disabled_addons.len(),
            removed = plan.removed_addons.len(),
            overrides = plan.overrides.len(),
            "Reconciling instance"
        );

        self.add_phase(&plan.new_addons, &mods, &mut state).await?;
        self.replace_phase(&plan.changed_addons, &mods, &mut state)
            .await?;
        self.disable_phase(&plan.disabled_addons, &mods, &mut state)
            .await;
        self.remove_phase(&plan.removed_addons, &mods, &mut state)
            .await?;
        self.overrides_phase(&plan.overrides, instance_root, &mut state)
            .await;

        let report = state.into_report();
        info!(
            completed = report.completed,
            total = report.total,
            skipped = report.skipped,
            recoverable = report.recoverable.len(),
            "Reconcile finished"
        );
        Ok(report)
    }

    async fn add_phase(
        &self,
        addons: &[UpdateFile],
        mods: &Path,
        state: &mut RunState<'_>,
    ) -> Result<(), ReconcileError> {
        for addon in addons {
            let Some(url) = addon.download_url.as_deref() else {
                state.skip(Phase::Add, &addon.filename, "no downloadUrl");
                continue;
            };

            self.fetcher
                .fetch(url, mods, Some(addon.filename.as_str()))
                .await
                .map_err(|source| ReconcileError::AddFailed {
                    filename: addon.filename.clone(),
                    source,
                })?;

            debug!(filename = %addon.filename, "Added");
            state.advance();
        }
        Ok(())
    }

    async fn replace_phase(
        &self,
        addons: &[UpdateFile],
        mods: &Path,
        state: &mut RunState<'_>,
    ) -> Result<(), ReconcileError> {
        for addon in addons {
            let (Some(url), Some(old_filename)) =
                (addon.download_url.as_deref(), addon.old_filename.as_deref())
            else {
                state.skip(
                    Phase::Replace,
                    &addon.filename,
                    "no downloadUrl or oldFilename",
                );
                continue;
            };

            self.mutator
                .delete(&mods.join(old_filename))
                .await
                .map_err(|source| ReconcileError::ReplaceDeleteFailed {
                    filename: addon.filename.clone(),
                    old_filename: old_filename.to_string(),
                    source,
                })?;

            self.fetcher
                .fetch(url, mods, Some(addon.filename.as_str()))
                .await
                .map_err(|source| ReconcileError::ReplaceFetchFailed {
                    filename: addon.filename.clone(),
                    source,
                })?;

            debug!(old = old_filename, new = %addon.filename, "Replaced");
            state.advance();
        }
        Ok(())
    }

    async fn disable_phase(&self, addons: &[UpdateFile], mods: &Path, state: &mut RunState<'_>) {
        for addon in addons {
            let src = mods.join(&addon.filename);
            let dst = mods.join(format!("{}{}", addon.filename, DISABLED_SUFFIX));

            match self.mutator.rename(&src, &dst).await {
                Ok(()) => debug!(filename = %addon.filename, "Disabled"),
                Err(e) => state.recover(Phase::Disable, &addon.filename, e.to_string()),
            }
            state.advance();
        }
    }

    async fn remove_phase(
        &self,
        addons: &[UpdateFile],
        mods: &Path,
        state: &mut RunState<'_>,
    ) -> Result<(), ReconcileError> {
        for addon in addons {
            self.mutator
                .delete(&mods.join(&addon.filename))
                .await
                .map_err(|source| ReconcileError::RemoveFailed {
                    filename: addon.filename.clone(),
                    source,
                })?;

            debug!(filename = %addon.filename, "Removed");
            state.advance();
        }
        Ok(())
    }

    async fn overrides_phase(
        &self,
        entries: &[OverrideEntry],
        instance_root: &Path,
        state: &mut RunState<'_>,
    ) {
        for entry in entries {
            if !entry.is_file {
                state.skip(Phase::Overrides, &entry.key, "directory entry");
                continue;
            }
            let Some(content) = entry.content.as_deref() else {
                state.skip(Phase::Overrides, &entry.key, "no content");
                continue;
            };

            let decoded = match OverrideDecoder::decode(&entry.key, content) {
                Ok(decoded) => decoded,
                Err(e) => {
                    state.recover(Phase::Overrides, &entry.key, e.to_string());
                    continue;
                }
            };

            let target = instance_root.join(&decoded.relative_path);
            match self
                .mutator
                .write_atomic(&target, &decoded.bytes, true)
                .await
            {
                Ok(true) => {
                    debug!(key = %entry.key, path = %target.display(), binary = decoded.binary, "Override written");
                    state.advance();
                }
                Ok(false) => state.skip(Phase::Overrides, &entry.key, "write declined"),
                Err(e) => state.recover(Phase::Overrides, &entry.key, e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
