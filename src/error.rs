//! Error types for feed loading and configuration.
//!
//! Per-cell problems (an unparseable date, a non-numeric score) are not errors;
//! they are absorbed during normalization. Only transport and structural
//! failures surface as [`FeedError`].

use thiserror::Error;

/// Remediation hint shown alongside load failures and empty results.
pub const LOAD_HINT: &str =
    "Google Sheet가 CSV로 제대로 게시되었는지, URL이 올바른지 확인해주세요.";

/// Failure to fetch or parse the published CSV.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV has no header row")]
    MissingHeader,

    #[error("CSV line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Invalid startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Display count {0} is out of range (1-{max})", max = crate::config::MAX_DISPLAY_COUNT)]
    CountOutOfRange(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_display() {
        assert_eq!(FeedError::MissingHeader.to_string(), "CSV has no header row");
        assert_eq!(
            FeedError::RaggedRow {
                line: 3,
                expected: 2,
                found: 4
            }
            .to_string(),
            "CSV line 3 has 4 fields, header has 2"
        );
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::CountOutOfRange(51).to_string(),
            "Display count 51 is out of range (1-50)"
        );
        assert_eq!(
            ConfigError::InvalidUrl("ftp://x".to_string()).to_string(),
            "Invalid URL: ftp://x"
        );
    }
}
