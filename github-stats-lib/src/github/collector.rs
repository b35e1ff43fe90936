use super::client::{ApiResponse, Client, RateLimitInfo, Release, RepositoryInfo, TrafficView, TrafficViews};
use super::snapshot::{RepositorySnapshot, latest_traffic_view};
use super::{CollectError, RepositoryIdentifier};
use crate::metrics::{Accumulator, Logger, MetricRecord};
use core::fmt::{Arguments, Debug, Formatter};
use core::time::Duration;
use log::Level;
use std::sync::Arc;

/// Default request and connect timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default limit on the number of release pages followed for one repository
pub const DEFAULT_MAX_RELEASE_PAGES: u32 = 1000;

const RELEASES_PAGE_SIZE: u8 = 100;

/// Settings of a [`Collector`]
#[derive(Debug, Clone)]
pub struct CollectorOptions {
    /// Repositories to collect, as `owner/name`
    pub repos: Vec<String>,

    /// API base URL, empty for the public GitHub API
    pub api_base_url: String,

    /// Access token; enables traffic views and authenticated rate limits
    pub access_token: Option<String>,

    pub timeout: Duration,

    /// Emit verbose progress messages through the logger
    pub debug: bool,

    /// Release pages followed before the repository fails with
    /// [`CollectError::ReleasePageLimit`]
    pub max_release_pages: u32,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            api_base_url: String::new(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            max_release_pages: DEFAULT_MAX_RELEASE_PAGES,
        }
    }
}

/// Collects one [`MetricRecord`] per configured repository.
pub struct Collector {
    client: Client,
    repos: Vec<String>,
    debug: bool,
    max_release_pages: u32,
    logger: Arc<dyn Logger>,
}

impl Debug for Collector {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collector")
            .field("client", &self.client)
            .field("repos", &self.repos)
            .field("debug", &self.debug)
            .field("max_release_pages", &self.max_release_pages)
            .finish_non_exhaustive()
    }
}

impl Collector {
    /// Create a collector. No request is issued until [`Collector::gather`] or
    /// [`Collector::collect`] is called.
    pub fn new(options: CollectorOptions, logger: Arc<dyn Logger>) -> Result<Self, CollectError> {
        let token = options.access_token.as_deref().filter(|t| !t.is_empty());

        let collector_debug = options.debug;
        if collector_debug {
            logger.debug(format_args!("Creating GitHub client..."));
            if token.is_some() {
                logger.debug(format_args!("Using access token..."));
            }
        }

        let client = Client::new(&options.api_base_url, token, options.timeout)?;
        if collector_debug && !options.api_base_url.is_empty() {
            logger.debug(format_args!("Using API base URL '{}'...", client.base_url()));
        }

        Ok(Self {
            client,
            repos: options.repos,
            debug: collector_debug,
            max_release_pages: options.max_release_pages.max(1),
            logger,
        })
    }

    #[must_use]
    pub fn repos(&self) -> &[String] {
        &self.repos
    }

    /// Run one collection cycle.
    ///
    /// Every repository yields either a record or an error in `acc`; a failing repository
    /// does not stop the others. An empty repository list fails the whole cycle before any
    /// request is made.
    pub async fn gather<A: Accumulator + ?Sized>(&self, acc: &mut A) -> Result<(), CollectError> {
        if self.repos.is_empty() {
            return Err(CollectError::EmptyRepositoryList);
        }

        for repo in &self.repos {
            match self.collect(repo).await {
                Ok(record) => acc.add_counter(record),
                Err(e) => acc.add_error(e),
            }
        }

        Ok(())
    }

    /// Collect the record of a single `owner/name` repository.
    pub async fn collect(&self, identifier: &str) -> Result<MetricRecord, CollectError> {
        self.verbose(Level::Info, format_args!("Processing repository '{identifier}'"));

        let id = RepositoryIdentifier::parse(identifier)?;
        let snapshot = self.fetch_snapshot(&id).await?;

        Ok(MetricRecord::from_snapshot(&id, &snapshot))
    }

    /// Fetch and aggregate the three resources of a repository.
    pub async fn fetch_snapshot(&self, id: &RepositoryIdentifier) -> Result<RepositorySnapshot, CollectError> {
        let info = self.fetch_repository_info(id).await?;
        let releases = self.fetch_releases(id).await?;

        // the traffic endpoint requires push access
        let views = if self.client.is_authenticated() {
            self.fetch_traffic_views(id).await?
        } else {
            self.verbose(
                Level::Debug,
                format_args!("Skipping traffic views for '{id}', no access token configured"),
            );
            Vec::new()
        };

        Ok(RepositorySnapshot::new(&info, &releases, latest_traffic_view(&views)))
    }

    pub async fn fetch_repository_info(&self, id: &RepositoryIdentifier) -> Result<RepositoryInfo, CollectError> {
        let url = self.client.repo_url(id, &[]);

        let resp: ApiResponse<RepositoryInfo> = self.client.get_json(url).await?;
        self.note_rate_limit(id, resp.rate_limit);

        Ok(resp.data)
    }

    /// Fetch all releases, following pagination to the last page.
    ///
    /// A repository whose releases span more than the configured page limit fails instead of
    /// yielding a partial list.
    pub async fn fetch_releases(&self, id: &RepositoryIdentifier) -> Result<Vec<Release>, CollectError> {
        let mut releases = Vec::new();
        let mut page_num: u32 = 1;

        loop {
            let mut url = self.client.repo_url(id, &["releases"]);
            let _ = url
                .query_pairs_mut()
                .append_pair("per_page", &RELEASES_PAGE_SIZE.to_string())
                .append_pair("page", &page_num.to_string());

            let resp: ApiResponse<Vec<Release>> = self.client.get_json(url).await?;
            self.note_rate_limit(id, resp.rate_limit);

            let last_page = resp.data.is_empty() || !resp.has_next_page;
            releases.extend(resp.data);

            if last_page {
                break;
            }

            if page_num >= self.max_release_pages {
                return Err(CollectError::ReleasePageLimit {
                    repository: id.to_string(),
                    pages: self.max_release_pages,
                });
            }

            page_num += 1;
        }

        if page_num > 1 {
            self.verbose(
                Level::Debug,
                format_args!("Fetched {} release(s) of '{id}' in {page_num} pages", releases.len()),
            );
        }

        Ok(releases)
    }

    /// Fetch the per-day traffic view samples.
    pub async fn fetch_traffic_views(&self, id: &RepositoryIdentifier) -> Result<Vec<TrafficView>, CollectError> {
        let mut url = self.client.repo_url(id, &["traffic", "views"]);
        let _ = url.query_pairs_mut().append_pair("per", "day");

        let resp: ApiResponse<TrafficViews> = self.client.get_json(url).await?;
        self.note_rate_limit(id, resp.rate_limit);

        Ok(resp.data.views)
    }

    fn note_rate_limit(&self, id: &RepositoryIdentifier, rate_limit: Option<RateLimitInfo>) {
        if let Some(rl) = rate_limit {
            self.verbose(
                Level::Debug,
                format_args!(
                    "GitHub API rate limit after request for '{id}': {} remaining, resets at {}",
                    rl.remaining,
                    rl.reset_at.with_timezone(&chrono::Local).format("%T")
                ),
            );
        }
    }

    fn verbose(&self, level: Level, args: Arguments<'_>) {
        if self.debug {
            self.logger.log(level, args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FacadeLogger, RecordingAccumulator};

    fn collector(repos: &[&str]) -> Collector {
        let options = CollectorOptions {
            repos: repos.iter().map(ToString::to_string).collect(),
            // nothing listens here; tests below must not reach the network
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..CollectorOptions::default()
        };

        Collector::new(options, Arc::new(FacadeLogger)).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = CollectorOptions::default();
        assert!(options.repos.is_empty());
        assert!(options.api_base_url.is_empty());
        assert!(options.access_token.is_none());
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert!(!options.debug);
        assert_eq!(options.max_release_pages, 1000);
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let options = CollectorOptions {
            api_base_url: "::".to_string(),
            ..CollectorOptions::default()
        };

        let err = Collector::new(options, Arc::new(FacadeLogger)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let options = CollectorOptions {
            access_token: Some(String::new()),
            ..CollectorOptions::default()
        };

        let collector = Collector::new(options, Arc::new(FacadeLogger)).unwrap();
        assert!(!collector.client.is_authenticated());
    }

    #[tokio::test]
    async fn test_gather_empty_repository_list() {
        let collector = collector(&[]);
        let mut acc = RecordingAccumulator::new();

        let err = collector.gather(&mut acc).await.unwrap_err();

        assert!(matches!(err, CollectError::EmptyRepositoryList));
        assert!(acc.records().is_empty());
        assert!(acc.errors().is_empty());
    }

    #[tokio::test]
    async fn test_collect_invalid_identifier_makes_no_request() {
        let collector = collector(&["not-a-repo"]);

        let err = collector.collect("not-a-repo").await.unwrap_err();
        assert!(matches!(err, CollectError::InvalidIdentifier(ref s) if s == "not-a-repo"));
    }

    #[tokio::test]
    async fn test_gather_reports_invalid_identifiers_individually() {
        let collector = collector(&["one", "two/three/four"]);
        let mut acc = RecordingAccumulator::new();

        collector.gather(&mut acc).await.unwrap();

        assert!(acc.records().is_empty());
        assert_eq!(acc.errors().len(), 2);
        assert!(acc.errors().iter().all(|e| matches!(e, CollectError::InvalidIdentifier(_))));
    }
}
