//! Repository statistics collection from the GitHub REST API
//!
//! For every configured `owner/name` identifier the [`Collector`] issues up to three read-only
//! requests: the repository itself, its releases, and (only when an access token is
//! configured) its per-day traffic views. The responses are reduced into a
//! [`RepositorySnapshot`]:
//!
//! - forks, stargazers and subscribers are copied from the repository resource
//! - the download counts of every asset of every release are summed
//! - views and unique views come from the traffic sample with the latest timestamp
//!
//! Repositories are processed one after another. A failure for one repository is reported
//! through the accumulator and the cycle moves on; only configuration problems such as an
//! empty repository list abort the cycle. Nothing is cached and nothing is retried.

mod client;
mod collector;
mod error;
mod repo_id;
mod snapshot;

pub use client::{DEFAULT_API_BASE_URL, Release, ReleaseAsset, RepositoryInfo, TrafficView, resolve_base_url};
pub use collector::{Collector, CollectorOptions, DEFAULT_MAX_RELEASE_PAGES, DEFAULT_TIMEOUT};
pub use error::CollectError;
pub use repo_id::RepositoryIdentifier;
pub use snapshot::{RepositorySnapshot, latest_traffic_view, total_download_count};
