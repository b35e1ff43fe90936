use super::client::{Release, RepositoryInfo, TrafficView};
use serde::{Deserialize, Serialize};

/// Aggregated statistics of a single repository for one collection cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub forks_count: u64,
    pub stargazers_count: u64,
    pub subscribers_count: u64,
    pub total_download_count: u64,
    pub total_views: u64,
    pub unique_views: u64,
}

impl RepositorySnapshot {
    /// Reduce the fetched API resources into the snapshot fields.
    ///
    /// `latest_view` is `None` when traffic data is unavailable, in which case both view
    /// counts are zero.
    #[must_use]
    pub fn new(info: &RepositoryInfo, releases: &[Release], latest_view: Option<&TrafficView>) -> Self {
        Self {
            forks_count: info.forks_count,
            stargazers_count: info.stargazers_count,
            subscribers_count: info.subscribers_count,
            total_download_count: total_download_count(releases),
            total_views: latest_view.map_or(0, |v| v.count),
            unique_views: latest_view.map_or(0, |v| v.uniques),
        }
    }
}

/// Sum of the download counts of every asset of every release.
#[must_use]
pub fn total_download_count(releases: &[Release]) -> u64 {
    releases
        .iter()
        .flat_map(|release| &release.assets)
        .map(|asset| asset.download_count)
        .fold(0, u64::saturating_add)
}

/// The sample with the most recent timestamp. When several samples share that timestamp the
/// first one wins.
#[must_use]
pub fn latest_traffic_view(views: &[TrafficView]) -> Option<&TrafficView> {
    views
        .iter()
        .reduce(|latest, view| if view.timestamp > latest.timestamp { view } else { latest })
}
