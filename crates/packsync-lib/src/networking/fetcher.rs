//! Content fetching for mod downloads
//!
//! Provides the production HTTP fetcher and a scripted mock. Both write the
//! fetched bytes into a destination directory and return the written path.
//! Fetches are single-stream: one connection per file, fully written before
//! the call returns.

use percent_encoding::percent_decode_str;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, trace};

const PARTIAL_SUFFIX: &str = ".partial";

/// Content fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request for {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("Download failed for {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Cannot derive a safe filename for {url} (got {filename:?})")]
    InvalidFilename { url: String, filename: String },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Mock fetch failed for {url}: {message}")]
    Mock { url: String, message: String },
}

/// Fetches remote content into a directory
pub trait ContentFetcher {
    /// Download `url` into `destination_dir`
    ///
    /// # Arguments
    /// * `url` - Source URL
    /// * `destination_dir` - Directory receiving the file (created if missing)
    /// * `filename` - Target filename; derived from the response when `None`
    ///
    /// # Returns
    /// Path of the written file
    fn fetch(
        &self,
        url: &str,
        destination_dir: &Path,
        filename: Option<&str>,
    ) -> impl Future<Output = Result<PathBuf, FetchError>> + Send;
}

/// Reject names that would land outside the destination directory
fn validate_filename(url: &str, filename: &str) -> Result<(), FetchError> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains('/')
        || filename.contains('\\');

    if invalid {
        return Err(FetchError::InvalidFilename {
            url: url.to_string(),
            filename: filename.to_string(),
        });
    }
    Ok(())
}

/// Extract the filename from a `Content-Disposition` header value
///
/// Prefers the RFC 5987 `filename*=` form over plain `filename=`.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;

    for param in header.split(';').map(str::trim) {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };

        match name.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                // charset'lang'percent-encoded
                let Some(encoded) = value.trim().splitn(3, '\'').nth(2) else {
                    continue;
                };
                let decoded = percent_decode_str(encoded).decode_utf8_lossy().into_owned();
                if !decoded.is_empty() {
                    return Some(decoded);
                }
            }
            "filename" => {
                let value = value.trim().trim_matches('"');
                if !value.is_empty() {
                    plain = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    plain
}

/// Last non-empty path segment of `url`, percent-decoded
pub fn filename_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy().into_owned();
    (!decoded.is_empty()).then_some(decoded)
}

async fn ensure_dir(path: &Path) -> Result<(), FetchError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Production fetcher streaming HTTP responses to disk
#[derive(Debug, Clone)]
pub struct HttpContentFetcher {
    client: Client,
}

impl HttpContentFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn stream_to_disk(
        &self,
        mut response: reqwest::Response,
        url: &str,
        partial_path: &Path,
    ) -> Result<u64, FetchError> {
        let io_err = |source| FetchError::Io {
            path: partial_path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::create(partial_path)
            .await
            .map_err(io_err)?;
        let mut written = 0u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?
        {
            file.write_all(&chunk).await.map_err(io_err)?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(io_err)?;
        Ok(written)
    }
}

impl ContentFetcher for HttpContentFetcher {
    async fn fetch(
        &self,
        url: &str,
        destination_dir: &Path,
        filename: Option<&str>,
    ) -> Result<PathBuf, FetchError> {
        debug!(url, "Fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let filename = match filename {
            Some(name) => name.to_string(),
            None => response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok())
                .and_then(filename_from_content_disposition)
                .or_else(|| filename_from_url(response.url()))
                .unwrap_or_default(),
        };
        validate_filename(url, &filename)?;

        ensure_dir(destination_dir).await?;
        let target = destination_dir.join(&filename);
        let partial = destination_dir.join(format!("{filename}{PARTIAL_SUFFIX}"));

        let written = match self.stream_to_disk(response, url, &partial).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, &target)
            .await
            .map_err(|source| FetchError::Io {
                path: target.clone(),
                source,
            })?;

        trace!(url, path = %target.display(), bytes = written, "Fetch complete");
        Ok(target)
    }
}

/// Mock fetcher (testing)
///
/// Serves scripted bodies per URL and records every call in order.
pub struct MockContentFetcher {
    responses: Arc<Mutex<HashMap<String, Result<Vec<u8>, String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockContentFetcher {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `body` for `url`
    pub async fn with_response(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .lock()
            .await
            .insert(url.to_string(), Ok(body.into()));
        self
    }

    /// Fail every fetch of `url`
    pub async fn with_failure(self, url: &str, message: &str) -> Self {
        self.responses
            .lock()
            .await
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    /// URLs fetched so far, in call order
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockContentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFetcher for MockContentFetcher {
    async fn fetch(
        &self,
        url: &str,
        destination_dir: &Path,
        filename: Option<&str>,
    ) -> Result<PathBuf, FetchError> {
        self.calls.lock().await.push(url.to_string());

        let body = match self.responses.lock().await.get(url) {
            Some(Ok(body)) => body.clone(),
            Some(Err(message)) => {
                return Err(FetchError::Mock {
                    url: url.to_string(),
                    message: message.clone(),
                });
            }
            None => {
                return Err(FetchError::Mock {
                    url: url.to_string(),
                    message: "no mock response".to_string(),
                });
            }
        };

        let filename = match filename {
            Some(name) => name.to_string(),
            None => Url::parse(url)
                .ok()
                .as_ref()
                .and_then(filename_from_url)
                .unwrap_or_default(),
        };
        validate_filename(url, &filename)?;

        ensure_dir(destination_dir).await?;
        let target = destination_dir.join(filename);
        tokio::fs::write(&target, body)
            .await
            .map_err(|source| FetchError::Io {
                path: target.clone(),
                source,
            })?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    include!("fetcher.test.rs");
}
