//! Data models for scored news articles read from the published sheet.
//!
//! - [`ArticleRecord`]: one normalized sheet row
//! - [`Dashboard`]: the ranked selection handed to the output writers
//!
//! Text fields stay `Option` all the way through; the display defaults below
//! are substituted only when a card is rendered.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_TITLE: &str = "제목 없음";
pub const DEFAULT_GRADE: &str = "미정";
pub const DEFAULT_OUTLET: &str = "정보 없음";
pub const DEFAULT_SUMMARY: &str = "요약 없음";
pub const DEFAULT_EVALUATION: &str = "LLM 평가 요약 없음";
pub const DEFAULT_LINK: &str = "#";
pub const DEFAULT_DATE: &str = "날짜 없음";

/// Display format for `published_at`.
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One article row after date parsing and score coercion.
///
/// `total_score` is never NaN. `published_at` carries no offset: RFC 2822
/// style offsets are cut off before parsing and ISO offsets are dropped, keeping
/// the wall-clock time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ArticleRecord {
    pub title: Option<String>,
    pub importance_grade: Option<String>,
    pub total_score: f64,
    pub published_at: Option<NaiveDateTime>,
    pub outlet: Option<String>,
    pub summary: Option<String>,
    pub llm_evaluation: Option<String>,
    pub link: Option<String>,
    /// Non-empty cells of columns the loader has no field for, keyed by header.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ArticleRecord {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn display_grade(&self) -> &str {
        self.importance_grade.as_deref().unwrap_or(DEFAULT_GRADE)
    }

    pub fn display_outlet(&self) -> &str {
        self.outlet.as_deref().unwrap_or(DEFAULT_OUTLET)
    }

    pub fn display_summary(&self) -> &str {
        self.summary.as_deref().unwrap_or(DEFAULT_SUMMARY)
    }

    pub fn display_evaluation(&self) -> &str {
        self.llm_evaluation.as_deref().unwrap_or(DEFAULT_EVALUATION)
    }

    pub fn display_link(&self) -> &str {
        self.link.as_deref().unwrap_or(DEFAULT_LINK)
    }

    pub fn display_date(&self) -> String {
        match self.published_at {
            Some(at) => at.format(DATE_DISPLAY_FORMAT).to_string(),
            None => DEFAULT_DATE.to_string(),
        }
    }

    /// Integral scores print without a fractional part ("10", not "10.0").
    pub fn display_score(&self) -> String {
        let score = self.total_score;
        if score.is_finite() && score.fract() == 0.0 {
            format!("{score:.0}")
        } else {
            score.to_string()
        }
    }
}

/// The ranked selection for one render, plus any load problem to report.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    /// Local time the dashboard was assembled, `YYYY-MM-DD HH:MM:SS`.
    pub generated_at: String,
    pub source_url: String,
    /// Number of records the sheet produced before selection.
    pub total_available: usize,
    pub articles: Vec<ArticleRecord>,
    /// Message of the most recent failed load, if the last load failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}
