//! Markdown rendering of the dashboard.
//!
//! The same text goes to stdout and, when requested, to a Markdown file. Each
//! selected article becomes one card:
//!
//! ```text
//! ### [A] SK 하이닉스 HBM 공급 확대
//! **총점:** 92점 | **발행일:** 2025-06-03 14:30 | **언론사:** 연합뉴스
//!
//! **요약:** ...
//!
//! **LLM 평가:** ...
//!
//! [기사 원문 보기](https://...)
//!
//! ---
//! ```

use crate::error::LOAD_HINT;
use crate::models::{ArticleRecord, Dashboard};
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::fmt::Write;
use tokio::fs;
use tracing::{info, instrument};

pub const PAGE_TITLE: &str = "📰 오늘의 SK 뉴스 클리핑 (Gemini 중요도 평가)";

/// Render a single article card, substituting placeholders for missing fields.
pub fn article_to_markdown(article: &ArticleRecord) -> String {
    let mut md = String::new();
    writeln!(md, "### [{}] {}", article.display_grade(), article.display_title()).unwrap();
    writeln!(
        md,
        "**총점:** {}점 | **발행일:** {} | **언론사:** {}\n",
        article.display_score(),
        article.display_date(),
        article.display_outlet()
    )
    .unwrap();
    writeln!(md, "**요약:** {}\n", article.display_summary()).unwrap();
    writeln!(md, "**LLM 평가:** {}\n", article.display_evaluation()).unwrap();
    writeln!(md, "[기사 원문 보기]({})\n", article.display_link()).unwrap();
    writeln!(md, "---").unwrap();
    md
}

/// Render the whole page: title, an error or empty-state notice, then the cards.
pub fn dashboard_to_markdown(dashboard: &Dashboard) -> String {
    let mut md = String::new();
    writeln!(md, "# {}\n", PAGE_TITLE).unwrap();

    if let Some(err) = &dashboard.load_error {
        writeln!(md, "> **오류:** CSV 데이터를 로드하는 중 오류 발생: {}", err).unwrap();
        writeln!(md, ">\n> {}\n", LOAD_HINT).unwrap();
    }

    if dashboard.articles.is_empty() {
        writeln!(md, "뉴스 데이터를 찾을 수 없습니다. {}", LOAD_HINT).unwrap();
        return md;
    }

    writeln!(
        md,
        "## 중요도별 최신 {}개 기사 목록\n",
        dashboard.articles.len()
    )
    .unwrap();
    for article in &dashboard.articles {
        md.push_str(&article_to_markdown(article));
        md.push('\n');
    }
    writeln!(
        md,
        "<small>{} 기준 · 전체 {}건 중 {}건 표시</small>",
        dashboard.generated_at,
        dashboard.total_available,
        dashboard.articles.len()
    )
    .unwrap();
    md
}

/// Write rendered Markdown to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn write_markdown(markdown: &str, path: &str) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path).await?;
    fs::write(path, markdown).await?;
    info!(bytes = markdown.len(), "Wrote dashboard Markdown");
    Ok(())
}
