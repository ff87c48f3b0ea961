//! Filesystem mutations against the instance directory

use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::trace;

/// Rename, delete, and safe-write primitives used by the reconciler
pub trait FileMutator {
    /// Rename `src` to `dst`
    fn rename(&self, src: &Path, dst: &Path) -> impl Future<Output = io::Result<()>> + Send;

    /// Delete the file at `path`
    fn delete(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;

    /// Write `bytes` to `path` through a temporary sibling and atomic replace
    ///
    /// # Returns
    /// `Ok(false)` when the write was declined because the target exists and
    /// overwriting is disabled
    fn write_atomic(
        &self,
        path: &Path,
        bytes: &[u8],
        create_parent_dirs: bool,
    ) -> impl Future<Output = io::Result<bool>> + Send;
}

/// Live implementation backed by tokio::fs and tempfile
#[derive(Debug, Clone)]
pub struct LiveFileMutator {
    overwrite: bool,
}

impl LiveFileMutator {
    pub fn new() -> Self {
        Self { overwrite: true }
    }

    /// Mutator whose safe-writes leave existing files untouched
    pub fn no_overwrite() -> Self {
        Self { overwrite: false }
    }
}

impl Default for LiveFileMutator {
    fn default() -> Self {
        Self::new()
    }
}

impl FileMutator for LiveFileMutator {
    async fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        trace!(src = %src.display(), dst = %dst.display(), "rename");
        tokio::fs::rename(src, dst).await
    }

    async fn delete(&self, path: &Path) -> io::Result<()> {
        trace!(path = %path.display(), "delete");
        tokio::fs::remove_file(path).await
    }

    async fn write_atomic(
        &self,
        path: &Path,
        bytes: &[u8],
        create_parent_dirs: bool,
    ) -> io::Result<bool> {
        if !self.overwrite && tokio::fs::try_exists(path).await? {
            trace!(path = %path.display(), "target exists, write declined");
            return Ok(false);
        }

        let parent = match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
            Some(parent) => parent.to_path_buf(),
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "Path has no parent directory",
                ));
            }
        };

        if create_parent_dirs {
            tokio::fs::create_dir_all(&parent).await?;
        }

        let target = path.to_path_buf();
        let content = bytes.to_vec();

        // tempfile is synchronous; keep it off the runtime threads
        tokio::task::spawn_blocking(move || -> io::Result<()> {
            // Same directory as the target so the final rename stays atomic
            let mut temp_file = NamedTempFile::new_in(&parent)?;
            temp_file.write_all(&content)?;
            temp_file.flush()?;
            temp_file.persist(&target)?;
            Ok(())
        })
        .await
        .map_err(io::Error::other)??;

        trace!(path = %path.display(), bytes = bytes.len(), "safe-write complete");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    include!("mutator.test.rs");
}
