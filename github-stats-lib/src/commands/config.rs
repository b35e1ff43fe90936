use crate::Result;
use crate::github::{CollectorOptions, RepositoryIdentifier};
use camino::Utf8Path;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Configuration file looked up in the current directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "github-stats.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repositories to query, as `owner/name`
    #[serde(default)]
    pub repos: Vec<String>,

    /// API base URL; empty selects the public GitHub API
    #[serde(default)]
    pub api_base_url: String,

    /// Personal access token; empty means unauthenticated
    #[serde(default)]
    pub access_token: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Enable debug output of the collector
    #[serde(default)]
    pub debug: bool,

    /// Time between collection cycles of the `watch` command
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

const fn default_timeout() -> u64 {
    10
}

const fn default_interval() -> Duration {
    Duration::from_secs(60)
}

impl Config {
    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid values
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading github-stats configuration file '{path}'"))?;

        let config = Self::parse(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;
        config.validate()?;

        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// Repository identifiers are not checked here: a malformed identifier only fails its
    /// own repository when metrics are gathered. Use [`Config::invalid_repos`] to find them.
    fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            return Err(app_err!("timeout must be at least 1 second"));
        }

        if self.interval.is_zero() {
            return Err(app_err!("interval must be greater than zero"));
        }

        Ok(())
    }

    /// Repository entries that are not valid `owner/name` identifiers
    #[must_use]
    pub fn invalid_repos(&self) -> Vec<&str> {
        self.repos
            .iter()
            .map(String::as_str)
            .filter(|repo| RepositoryIdentifier::parse(repo).is_err())
            .collect()
    }

    /// Build the collector settings, letting `token_override` replace the configured token
    #[must_use]
    pub fn collector_options(&self, token_override: Option<&str>) -> CollectorOptions {
        let token = token_override.unwrap_or(&self.access_token);

        CollectorOptions {
            repos: self.repos.clone(),
            api_base_url: self.api_base_url.clone(),
            access_token: (!token.is_empty()).then(|| token.to_string()),
            timeout: Duration::from_secs(self.timeout),
            debug: self.debug,
            ..CollectorOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG_TOML).unwrap();
        config.validate().unwrap();

        assert_eq!(config.repos, ["influxdata/telegraf"]);
        assert!(config.api_base_url.is_empty());
        assert!(config.access_token.is_empty());
        assert_eq!(config.timeout, 10);
        assert!(!config.debug);
        assert_eq!(config.interval, Duration::from_secs(60));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::parse(r#"repos = ["a/b"]"#).unwrap();

        assert_eq!(config.timeout, 10);
        assert_eq!(config.interval, Duration::from_secs(60));
        assert!(!config.debug);
    }

    #[test]
    fn test_empty_config_has_no_repos() {
        let config = Config::parse("").unwrap();
        config.validate().unwrap();
        assert!(config.repos.is_empty());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let _ = Config::parse("repositories = [\"a/b\"]").unwrap_err();
    }

    #[test]
    fn test_humantime_interval() {
        let config = Config::parse("interval = \"5m 30s\"").unwrap();
        assert_eq!(config.interval, Duration::from_secs(330));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = Config::parse("timeout = 0").unwrap();
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let config = Config::parse("interval = \"0s\"").unwrap();
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_invalid_repos() {
        let config = Config::parse(r#"repos = ["a/b", "c", "d/e/f", "g/h"]"#).unwrap();
        assert_eq!(config.invalid_repos(), ["c", "d/e/f"]);
    }

    #[test]
    fn test_collector_options() {
        let config = Config::parse(
            r#"
            repos = ["a/b"]
            api_base_url = "https://github.example.com"
            access_token = "from_file"
            timeout = 3
            debug = true
            "#,
        )
        .unwrap();

        let options = config.collector_options(None);
        assert_eq!(options.repos, ["a/b"]);
        assert_eq!(options.api_base_url, "https://github.example.com");
        assert_eq!(options.access_token.as_deref(), Some("from_file"));
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert!(options.debug);

        let options = config.collector_options(Some("from_env"));
        assert_eq!(options.access_token.as_deref(), Some("from_env"));
    }

    #[test]
    fn test_empty_token_means_unauthenticated() {
        let config = Config::parse(r#"repos = ["a/b"]"#).unwrap();
        assert!(config.collector_options(None).access_token.is_none());
        assert!(config.collector_options(Some("")).access_token.is_none());
    }

    #[test]
    fn test_load_and_save_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("github-stats.toml")).unwrap();

        Config::save_default(&path).unwrap();
        let config = Config::load(&path).unwrap();

        assert_eq!(config.repos, ["influxdata/telegraf"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("missing.toml")).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.toml"));
    }
}
