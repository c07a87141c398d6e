//! Turn the published sheet into normalized [`ArticleRecord`]s.
//!
//! The loader is forgiving about content. Missing columns switch off the field
//! they feed, bad dates become `None`, bad scores become `0`, and only rows
//! whose every cell is an NA token are dropped. Structure is checked: a row
//! wider than the header (typically an HTML page served instead of CSV) fails
//! the whole load, as does a transport error. [`load`] logs such failures and
//! hands back an empty list.

use crate::config::ColumnNames;
use crate::error::{FeedError, LOAD_HINT};
use crate::feed::dates::parse_published_at;
use crate::feed::source::FeedSource;
use crate::models::ArticleRecord;
use crate::utils::truncate_for_log;
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument};

/// Cell values read as missing, matching the pandas `read_csv` defaults the
/// sheet's consumers expect. Comparison is exact; `"  "` is a value.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell counts as missing.
pub fn is_na_cell(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

/// Fetch and normalize the sheet, swallowing failures.
///
/// This is the library-level entry point for callers that only want records;
/// [`FeedCache`](crate::feed::cache::FeedCache) uses [`try_load`] instead so it
/// can keep the error for display.
///
/// # Arguments
///
/// * `source` - Transport used to fetch the CSV text
/// * `url` - Address of the sheet published as CSV
/// * `columns` - Header names of the known columns
///
/// # Returns
///
/// The normalized records in sheet order, or an empty vector if the fetch or
/// parse failed. Failures are logged with [`LOAD_HINT`].
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn load<S: FeedSource>(source: &S, url: &str, columns: &ColumnNames) -> Vec<ArticleRecord> {
    match try_load(source, url, columns).await {
        Ok(records) => records,
        Err(e) => {
            report_load_failure(&e);
            Vec::new()
        }
    }
}

/// Log a failed load together with the remediation hint.
pub(crate) fn report_load_failure(e: &FeedError) {
    error!(error = %e, hint = LOAD_HINT, "Failed to load sheet CSV");
}

/// Fetch and normalize the sheet, reporting failures to the caller.
///
/// # Arguments
///
/// * `source` - Transport used to fetch the CSV text
/// * `url` - Address of the sheet published as CSV
/// * `columns` - Header names of the known columns
///
/// # Returns
///
/// The normalized records in sheet order.
///
/// # Errors
///
/// Returns [`FeedError::Http`] when the fetch fails or the status is not 2xx,
/// and [`FeedError::Csv`], [`FeedError::MissingHeader`] or
/// [`FeedError::RaggedRow`] when the body is not usable CSV.
pub async fn try_load<S: FeedSource>(
    source: &S,
    url: &str,
    columns: &ColumnNames,
) -> Result<Vec<ArticleRecord>, FeedError> {
    let body = source.fetch_csv(url).await?;
    parse_csv(&body, columns).inspect_err(|e| {
        debug!(error = %e, body_preview = %truncate_for_log(&body, 300), "CSV body rejected");
    })
}

/// Parse CSV text (header row first) into records, in row order.
///
/// Short rows are padded with missing cells. A row with more cells than the
/// header is an error.
pub fn parse_csv(text: &str, columns: &ColumnNames) -> Result<Vec<ArticleRecord>, FeedError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FeedError::MissingHeader);
    }

    let layout = ColumnLayout::new(&headers, columns);
    debug!(?layout, header_count = headers.len(), "Resolved column layout");

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.records() {
        let row = row?;
        if row.len() > headers.len() {
            return Err(FeedError::RaggedRow {
                line: row.position().map_or(0, |p| p.line()),
                expected: headers.len(),
                found: row.len(),
            });
        }
        match layout.normalize(&headers, &row) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    info!(count = records.len(), dropped_empty = dropped, "Parsed sheet rows");
    Ok(records)
}

/// Coerce a score cell to a number. Empty, non-numeric and NaN become `0`.
///
/// `-0` is folded into `0` so the two tie when ranking.
pub fn coerce_score(cell: Option<&str>) -> f64 {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .map_or(0.0, |v| v + 0.0)
}

/// Positions of the known columns in this particular header row.
#[derive(Debug, Default)]
struct ColumnLayout {
    title: Option<usize>,
    importance_grade: Option<usize>,
    total_score: Option<usize>,
    published_at: Option<usize>,
    outlet: Option<usize>,
    summary: Option<usize>,
    llm_evaluation: Option<usize>,
    link: Option<usize>,
}

impl ColumnLayout {
    fn new(headers: &[String], columns: &ColumnNames) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            title: find(&columns.title),
            importance_grade: find(&columns.importance_grade),
            total_score: find(&columns.total_score),
            published_at: find(&columns.published_at),
            outlet: find(&columns.outlet),
            summary: find(&columns.summary),
            llm_evaluation: find(&columns.llm_evaluation),
            link: find(&columns.link),
        }
    }

    fn is_known(&self, idx: usize) -> bool {
        [
            self.title,
            self.importance_grade,
            self.total_score,
            self.published_at,
            self.outlet,
            self.summary,
            self.llm_evaluation,
            self.link,
        ]
        .contains(&Some(idx))
    }

    /// `None` when every cell of the row is an NA token.
    fn normalize(&self, headers: &[String], row: &StringRecord) -> Option<ArticleRecord> {
        // Short rows: cells past the end read as missing.
        let cells: Vec<Option<&str>> = (0..headers.len())
            .map(|i| row.get(i).filter(|c| !is_na_cell(c)))
            .collect();
        if cells.iter().all(Option::is_none) {
            return None;
        }

        let text = |idx: Option<usize>| idx.and_then(|i| cells[i]).map(str::to_string);

        let extra: BTreeMap<String, String> = cells
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_known(*i))
            .filter_map(|(i, cell)| cell.map(|v| (headers[i].clone(), v.to_string())))
            .collect();

        Some(ArticleRecord {
            title: text(self.title),
            importance_grade: text(self.importance_grade),
            total_score: coerce_score(self.total_score.and_then(|i| cells[i])),
            published_at: self
                .published_at
                .and_then(|i| cells[i])
                .and_then(parse_published_at),
            outlet: text(self.outlet),
            summary: text(self.summary),
            llm_evaluation: text(self.llm_evaluation),
            link: text(self.link),
            extra,
        })
    }
}
