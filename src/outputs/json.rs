//! JSON export of the ranked selection.
//!
//! The file holds one [`Dashboard`]: generation time, the source URL, how many
//! records the sheet produced, and the selected articles in display order.
//! It is overwritten on every render.

use crate::models::Dashboard;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`Dashboard`] to `path` as pretty-printed JSON.
///
/// # Arguments
///
/// * `dashboard` - The rendered selection to export.
/// * `path` - Destination file; missing parent directories are created.
///
/// # Returns
///
/// * `Ok(())` once the file is written, or the serialization/IO error.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn write_dashboard(dashboard: &Dashboard, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(dashboard)?;

    if let Err(e) = ensure_parent_dir(path).await {
        error!(error = %e, "Failed to create JSON output dir");
        return Err(e);
    }

    fs::write(path, json).await?;
    info!(article_count = dashboard.articles.len(), "Wrote dashboard JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleRecord;

    #[tokio::test]
    async fn test_write_dashboard_round_trip_fields() {
        let dir = std::env::temp_dir().join(format!("snc_json_{}", std::process::id()));
        let path = dir.join("out").join("top.json");
        let path = path.to_str().unwrap();

        let dashboard = Dashboard {
            generated_at: "2025-06-03 15:00:00".to_string(),
            source_url: "https://example.com/pub?output=csv".to_string(),
            total_available: 7,
            articles: vec![ArticleRecord {
                title: Some("헤드라인".to_string()),
                total_score: 88.0,
                ..Default::default()
            }],
            load_error: None,
        };
        write_dashboard(&dashboard, path).await.unwrap();

        let text = tokio::fs::read_to_string(path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["total_available"], 7);
        assert_eq!(value["articles"][0]["title"], "헤드라인");
        assert_eq!(value["articles"][0]["total_score"], 88.0);
        assert!(value["articles"][0]["published_at"].is_null());
        assert!(value.get("load_error").is_none());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
