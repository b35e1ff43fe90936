//! GitHub API client
//!
//! Minimal GitHub REST API client for fetching repository, release, and traffic data.

use super::{CollectError, RepositoryIdentifier};
use chrono::{DateTime, Utc};
use core::str::FromStr;
use core::time::Duration;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Base URL of the public GitHub API
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com/";

const ENTERPRISE_API_PATH: &str = "api/v3/";
const USER_AGENT: &str = "github-stats";
const GITHUB_JSON: &str = "application/vnd.github+json";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

#[derive(Debug, Deserialize)]
#[expect(clippy::struct_field_names, reason = "field names match GitHub API exactly")]
pub struct RepositoryInfo {
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub subscribers_count: u64,
}

/// A release with only the fields we need
#[derive(Debug, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseAsset {
    #[serde(default)]
    pub download_count: u64,
}

/// Response of the traffic views endpoint; the 14-day totals are not used
#[derive(Debug, Deserialize)]
pub struct TrafficViews {
    #[serde(default)]
    pub views: Vec<TrafficView>,
}

/// A single per-day traffic sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TrafficView {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub uniques: u64,
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// A successfully decoded API response
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub has_next_page: bool,
    pub rate_limit: Option<RateLimitInfo>,
}

/// GitHub API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: Url,
    authenticated: bool,
}

impl Client {
    /// Create a new API client.
    ///
    /// An empty `base_url` selects the public GitHub API. `timeout` bounds both connection
    /// setup and the complete request.
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, CollectError> {
        let base_url = resolve_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        if let Some(t) = token {
            let Ok(mut auth_val) = HeaderValue::from_str(&format!("Bearer {t}")) else {
                return Err(CollectError::InvalidAccessToken);
            };
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(CollectError::ClientSetup)?;

        Ok(Self {
            client,
            base_url,
            authenticated: token.is_some(),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether requests carry an access token
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Construct the API URL `repos/{owner}/{name}/{tail...}`, percent-encoding every segment.
    #[must_use]
    pub fn repo_url(&self, id: &RepositoryIdentifier, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            let _ = segments.pop_if_empty().push("repos").push(id.owner()).push(id.name()).extend(tail);
        }
        url
    }

    /// Issue a GET request and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>, CollectError> {
        let url_text = url.to_string();

        let resp = self.client.get(url).send().await.map_err(|source| CollectError::Transport {
            url: url_text.clone(),
            source,
        })?;

        // Extract rate limit info from response headers before checking status
        let rate_limit = extract_rate_limit_from_headers(resp.headers());

        let status = resp.status();
        if !status.is_success() {
            return Err(classify_failure(url_text, status, rate_limit));
        }

        let has_next_page = resp
            .headers()
            .get(LINK)
            .and_then(|h| h.to_str().ok())
            .is_some_and(|link_str| link_str.contains(r#"rel="next""#));

        let body = resp.bytes().await.map_err(|source| CollectError::Transport {
            url: url_text.clone(),
            source,
        })?;
        let data = serde_json::from_slice(&body).map_err(|source| CollectError::Decode { url: url_text, source })?;

        Ok(ApiResponse {
            data,
            has_next_page,
            rate_limit,
        })
    }
}

/// Resolve the configured base URL into the URL all endpoints are joined to.
///
/// An empty string selects the public API. Anything else is treated as a GitHub Enterprise
/// server, which serves its API below `/api/v3/` unless the host is itself an API host.
pub fn resolve_base_url(base_url: &str) -> Result<Url, CollectError> {
    let text = if base_url.is_empty() { DEFAULT_API_BASE_URL } else { base_url };
    let invalid = |source: url::ParseError| CollectError::InvalidBaseUrl {
        url: text.to_string(),
        source,
    };

    let mut url = Url::parse(text).map_err(invalid)?;
    if url.cannot_be_a_base() {
        return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    let host = url.host_str().unwrap_or_default();
    if !url.path().ends_with("/api/v3/") && !host.starts_with("api.") && !host.contains(".api.") {
        let path = format!("{}{ENTERPRISE_API_PATH}", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Map a non-success status to the matching error.
fn classify_failure(url: String, status: StatusCode, rate_limit: Option<RateLimitInfo>) -> CollectError {
    if matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
        && let Some(rl) = rate_limit
        && rl.remaining == 0
    {
        return CollectError::RateLimited { url, reset_at: rl.reset_at };
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CollectError::Authorization { url, status },
        _ => CollectError::Http { url, status },
    }
}

/// Extract rate limit information from API response headers
///
/// Both headers must be present and numeric; `x-ratelimit-reset` is in epoch seconds.
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    fn numeric<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
        headers.get(name)?.to_str().ok()?.trim().parse().ok()
    }

    Some(RateLimitInfo {
        remaining: numeric(headers, RATE_LIMIT_REMAINING)?,
        reset_at: DateTime::from_timestamp(numeric(headers, RATE_LIMIT_RESET)?, 0)?,
    })
}
