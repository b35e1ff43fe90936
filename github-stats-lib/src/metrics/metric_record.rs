use crate::github::{RepositoryIdentifier, RepositorySnapshot};

/// Measurement name of the emitted records
pub const MEASUREMENT: &str = "repository_info";

/// Tag carrying the `owner/name` identifier
pub const REPOSITORY_TAG: &str = "repository";

/// A single counter-type metric record: a name, tags, and unsigned integer fields.
///
/// Tags and fields keep their insertion order so rendered output is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    name: &'static str,
    tags: Vec<(&'static str, String)>,
    fields: Vec<(&'static str, u64)>,
}

impl MetricRecord {
    #[must_use]
    pub fn from_snapshot(id: &RepositoryIdentifier, snapshot: &RepositorySnapshot) -> Self {
        Self {
            name: MEASUREMENT,
            tags: vec![(REPOSITORY_TAG, id.to_string())],
            fields: vec![
                ("forks_count", snapshot.forks_count),
                ("stargazers_count", snapshot.stargazers_count),
                ("subscribers_count", snapshot.subscribers_count),
                ("total_download_count", snapshot.total_download_count),
                ("total_views", snapshot.total_views),
                ("unique_views", snapshot.unique_views),
            ],
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn tags(&self) -> &[(&'static str, String)] {
        &self.tags
    }

    #[must_use]
    pub fn fields(&self) -> &[(&'static str, u64)] {
        &self.fields
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<u64> {
        self.fields.iter().find(|(k, _)| *k == key).map(|&(_, v)| v)
    }
}
