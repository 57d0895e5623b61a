//! Clients for the remote verification backend.
//!
//! Connectivity failures are not errors for the verification and news
//! clients: they answer with offline data from [`fallback`] instead.

use thiserror::Error;

mod client;
pub mod config;
pub mod fallback;
pub mod health;
pub mod news;
pub mod text;
pub mod verification;

pub use client::ApiClient;
pub use config::{ApiConfig, LatencyRange};
pub use health::HealthStatus;
pub use news::NewsClient;
pub use text::{ExtractedArticle, Translation};
pub use verification::{VerificationClient, DEFAULT_LANGUAGE};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach {url}: {source}")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}

impl ApiError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_connect() || err.is_timeout() {
            ApiError::Connectivity { url, source: err }
        } else {
            ApiError::Transport { url, source: err }
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity { .. })
    }
}
