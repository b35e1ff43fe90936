use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while collecting repository metrics.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("empty repository list")]
    EmptyRepositoryList,

    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("access token contains characters that are not valid in an HTTP header")]
    InvalidAccessToken,

    #[error("could not create HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("invalid repository identifier '{0}', expected '<owner>/<name>'")]
    InvalidIdentifier(String),

    #[error("request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to '{url}' returned HTTP {status}")]
    Http { url: String, status: StatusCode },

    #[error("request to '{url}' was not authorized (HTTP {status})")]
    Authorization { url: String, status: StatusCode },

    #[error("request to '{url}' was rate limited until {reset_at}")]
    RateLimited { url: String, reset_at: DateTime<Utc> },

    #[error("could not decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("releases of '{repository}' span more than {pages} pages")]
    ReleasePageLimit { repository: String, pages: u32 },
}

impl CollectError {
    /// Returns `true` for errors caused by the collector's configuration rather than by a
    /// single repository. These abort the whole collection cycle.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyRepositoryList | Self::InvalidBaseUrl { .. } | Self::InvalidAccessToken | Self::ClientSetup(_)
        )
    }
}
