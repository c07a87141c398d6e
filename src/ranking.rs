//! Order articles by importance and pick the ones to show.

use crate::models::ArticleRecord;
use std::cmp::Ordering;

/// Descending order on (total_score, published_at). A missing date sorts below
/// every real date.
pub fn compare_desc(a: &ArticleRecord, b: &ArticleRecord) -> Ordering {
    b.total_score
        .total_cmp(&a.total_score)
        .then_with(|| b.published_at.cmp(&a.published_at))
}

/// Stable sort by [`compare_desc`], then keep the first `count`.
///
/// Exact ties keep sheet order, so repeated runs over the same sheet render
/// identically.
///
/// # Arguments
///
/// * `records` - Normalized rows in sheet order; left untouched.
/// * `count` - Maximum number of records to keep.
///
/// # Returns
///
/// * The top `min(count, records.len())` records, best first.
pub fn rank(records: &[ArticleRecord], count: usize) -> Vec<ArticleRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(compare_desc);
    ranked.truncate(count);
    ranked
}
