use crate::Result;
use crate::metrics::MetricRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use core::fmt::Write;
use serde_json::json;

#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate<W: Write>(records: &[MetricRecord], timestamp: DateTime<Utc>, writer: &mut W) -> Result<()> {
    let timestamp = timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut metrics = Vec::with_capacity(records.len());

    for record in records {
        let mut tags = serde_json::Map::new();
        for (key, value) in record.tags() {
            tags.insert((*key).to_string(), json!(value));
        }

        let mut fields = serde_json::Map::new();
        for (key, value) in record.fields() {
            fields.insert((*key).to_string(), json!(value));
        }

        metrics.push(json!({
            "name": record.name(),
            "tags": tags,
            "fields": fields,
            "timestamp": timestamp,
        }));
    }

    let output = json!({
        "metrics": metrics
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{RepositoryIdentifier, RepositorySnapshot};
    use chrono::TimeZone;

    #[test]
    fn test_json_report() {
        let snapshot = RepositorySnapshot {
            forks_count: 2,
            stargazers_count: 1,
            subscribers_count: 3,
            total_download_count: 24,
            total_views: 0,
            unique_views: 0,
        };
        let record = MetricRecord::from_snapshot(&RepositoryIdentifier::parse("repo_owner/repo_name").unwrap(), &snapshot);
        let timestamp = Utc.with_ymd_and_hms(2022, 10, 24, 0, 0, 0).unwrap();

        let mut output = String::new();
        generate(&[record], timestamp, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let metric = &value["metrics"][0];
        assert_eq!(metric["name"], "repository_info");
        assert_eq!(metric["tags"]["repository"], "repo_owner/repo_name");
        assert_eq!(metric["fields"]["forks_count"], 2);
        assert_eq!(metric["fields"]["stargazers_count"], 1);
        assert_eq!(metric["fields"]["subscribers_count"], 3);
        assert_eq!(metric["fields"]["total_download_count"], 24);
        assert_eq!(metric["fields"]["total_views"], 0);
        assert_eq!(metric["fields"]["unique_views"], 0);
        assert_eq!(metric["timestamp"], "2022-10-24T00:00:00Z");
    }

    #[test]
    fn test_empty_json_report() {
        let mut output = String::new();
        generate(&[], Utc::now(), &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["metrics"].as_array().map(Vec::len), Some(0));
    }
}
