use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

pub mod fetcher;

pub use fetcher::{ContentFetcher, FetchError, HttpContentFetcher, MockContentFetcher};

/// Networking setup errors
#[derive(Debug, Error)]
pub enum NetworkingError {
    #[error("HTTP client construction failed: {source}")]
    ClientBuildFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("Invalid timeout: {seconds}s (must be > 0)")]
    InvalidTimeout { seconds: u64 },
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct NetworkingConfig {
    /// Whole-request timeout in seconds
    pub timeout_seconds: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for NetworkingConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("packsync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NetworkingConfig {
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Build the shared HTTP client
    pub fn build_client(&self) -> Result<Client, NetworkingError> {
        if self.timeout_seconds == 0 {
            return Err(NetworkingError::InvalidTimeout {
                seconds: self.timeout_seconds,
            });
        }

        trace!(
            timeout = self.timeout_seconds,
            user_agent = %self.user_agent,
            "Building HTTP client"
        );

        Ok(Client::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .user_agent(&self.user_agent)
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
