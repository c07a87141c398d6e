//! Runtime configuration: built-in defaults, an optional YAML file, and CLI overrides.
//!
//! Precedence is CLI flag (or its environment variable) over YAML over the
//! defaults defined here.
//!
//! # YAML format
//!
//! ```yaml
//! csv_url: "https://docs.google.com/spreadsheets/d/e/.../pub?output=csv"
//! display_count: 10
//! cache_ttl_secs: 300
//! columns:
//!   published_at: "발행일"
//!   total_score: "총점"
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Published sheet the dashboard reads when nothing else is configured.
pub const DEFAULT_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vStTkfygze7Y_6ZCiUiJNTCHDmaniooxZWdKmvZLOOjK25NPfc-6i7Or6d4MQRgRS-S3po6pUychIMD/pub?output=csv";

pub const DEFAULT_DISPLAY_COUNT: usize = 5;
pub const MIN_DISPLAY_COUNT: usize = 1;
pub const MAX_DISPLAY_COUNT: usize = 50;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Header names of the columns the loader knows about.
///
/// Matching is exact, so non-ASCII names must be given byte-for-byte as they
/// appear in the sheet's header row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub title: String,
    pub importance_grade: String,
    pub total_score: String,
    pub published_at: String,
    pub outlet: String,
    pub summary: String,
    pub llm_evaluation: String,
    pub link: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            title: "제목".to_string(),
            importance_grade: "중요도 등급".to_string(),
            total_score: "총점".to_string(),
            published_at: "발행일".to_string(),
            outlet: "언론사".to_string(),
            summary: "요약".to_string(),
            llm_evaluation: "LLM 평가 요약".to_string(),
            link: "링크".to_string(),
        }
    }
}

/// Contents of the optional YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub csv_url: Option<String>,
    pub display_count: Option<usize>,
    pub cache_ttl_secs: Option<u64>,
    pub columns: ColumnNames,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    #[instrument(level = "info", skip_all, fields(%path))]
    pub async fn load(path: &str) -> Result<Self, ConfigError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_string(),
                source,
            })?;
        let config = Self::from_yaml(&text)?;
        info!("Loaded YAML configuration");
        Ok(config)
    }
}

/// Fully resolved settings for one dashboard session.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub csv_url: Url,
    pub display_count: usize,
    pub cache_ttl: Duration,
    pub columns: ColumnNames,
}

impl FeedConfig {
    /// Merge CLI arguments over an optional file config and validate the result.
    pub fn resolve(cli: &Cli, file: Option<FileConfig>) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let raw_url = cli
            .csv_url
            .clone()
            .or(file.csv_url)
            .unwrap_or_else(|| DEFAULT_CSV_URL.to_string());
        let csv_url = parse_source_url(&raw_url)?;

        let display_count = validate_count(
            cli.count
                .or(file.display_count)
                .unwrap_or(DEFAULT_DISPLAY_COUNT),
        )?;

        let ttl_secs = cli
            .cache_ttl_secs
            .or(file.cache_ttl_secs)
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        let config = Self {
            csv_url,
            display_count,
            cache_ttl: Duration::from_secs(ttl_secs),
            columns: file.columns,
        };
        debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

/// Accept only absolute http(s) URLs.
pub fn parse_source_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::InvalidUrl(raw.to_string())),
    }
}

pub fn validate_count(count: usize) -> Result<usize, ConfigError> {
    if (MIN_DISPLAY_COUNT..=MAX_DISPLAY_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(ConfigError::CountOutOfRange(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["sheet_news_clipping"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_defaults_when_nothing_given() {
        let config = FeedConfig::resolve(&cli(&[]), None).unwrap();
        assert_eq!(config.csv_url.as_str(), DEFAULT_CSV_URL);
        assert_eq!(config.display_count, 5);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.columns, ColumnNames::default());
    }

    #[test]
    fn test_yaml_partial_columns_keep_defaults() {
        let file = FileConfig::from_yaml(
            "display_count: 12\ncolumns:\n  total_score: \"Score\"\n",
        )
        .unwrap();
        assert_eq!(file.display_count, Some(12));
        assert_eq!(file.columns.total_score, "Score");
        assert_eq!(file.columns.published_at, "발행일");
        assert_eq!(file.columns.llm_evaluation, "LLM 평가 요약");
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let file = FileConfig::from_yaml(
            "csv_url: \"https://example.com/a.csv\"\ndisplay_count: 12\ncache_ttl_secs: 10\n",
        )
        .unwrap();
        let config = FeedConfig::resolve(
            &cli(&["--count", "3", "--csv-url", "https://example.com/b.csv"]),
            Some(file),
        )
        .unwrap();
        assert_eq!(config.csv_url.as_str(), "https://example.com/b.csv");
        assert_eq!(config.display_count, 3);
        assert_eq!(config.cache_ttl, Duration::from_secs(10));
    }

    #[test]
    fn test_yaml_count_out_of_range_rejected() {
        let file = FileConfig::from_yaml("display_count: 80\n").unwrap();
        let err = FeedConfig::resolve(&cli(&[]), Some(file)).unwrap_err();
        assert!(matches!(err, ConfigError::CountOutOfRange(80)));
    }

    #[test]
    fn test_parse_source_url() {
        assert!(parse_source_url("https://example.com/pub?output=csv").is_ok());
        assert!(parse_source_url("  http://localhost:8080/x.csv ").is_ok());
        assert!(matches!(
            parse_source_url("ftp://example.com/x.csv"),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_source_url("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_count_bounds() {
        assert!(validate_count(0).is_err());
        assert_eq!(validate_count(1).unwrap(), 1);
        assert_eq!(validate_count(50).unwrap(), 50);
        assert!(validate_count(51).is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            FileConfig::from_yaml("display_count: [unclosed"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
