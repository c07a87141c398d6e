//! Time-boxed cache in front of the loader.
//!
//! Only successful loads are stored. A failed load clears the entry and
//! remembers the error message so the renderer can show it; the next call
//! tries the network again.

use crate::config::ColumnNames;
use crate::feed::loader::{report_load_failure, try_load};
use crate::feed::source::FeedSource;
use crate::models::ArticleRecord;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

#[derive(Debug)]
struct CacheEntry {
    url: String,
    fetched_at: Instant,
    records: Vec<ArticleRecord>,
}

/// Holds the last successful load of a sheet for `ttl`.
#[derive(Debug)]
pub struct FeedCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
    last_error: Option<String>,
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: None,
            last_error: None,
        }
    }

    /// Drop whatever is cached; the next [`get_or_load`](Self::get_or_load) re-fetches.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            info!("Feed cache invalidated");
        }
        self.last_error = None;
    }

    /// Error message of the last load, if that load failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Age of the cached entry, if there is one.
    pub fn age(&self) -> Option<Duration> {
        self.entry.as_ref().map(|e| e.fetched_at.elapsed())
    }

    fn is_fresh(&self, url: &str) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|e| e.url == url && e.fetched_at.elapsed() < self.ttl)
    }

    /// Return cached records for `url`, loading them first if missing or stale.
    ///
    /// Never fails: on error the result is empty and [`last_error`](Self::last_error) is set.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn get_or_load<S: FeedSource>(
        &mut self,
        source: &S,
        url: &str,
        columns: &ColumnNames,
    ) -> &[ArticleRecord] {
        if self.is_fresh(url) {
            debug!(age = ?self.age(), "Serving sheet from cache");
        } else {
            match try_load(source, url, columns).await {
                Ok(records) => {
                    info!(count = records.len(), "Cached fresh sheet load");
                    self.entry = Some(CacheEntry {
                        url: url.to_string(),
                        fetched_at: Instant::now(),
                        records,
                    });
                    self.last_error = None;
                }
                Err(e) => {
                    report_load_failure(&e);
                    self.entry = None;
                    self.last_error = Some(e.to_string());
                }
            }
        }

        self.entry
            .as_ref()
            .map(|e| e.records.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use std::cell::{Cell, RefCell};

    /// Serves queued responses and counts fetches.
    struct ScriptedSource {
        responses: RefCell<Vec<Result<String, FeedError>>>,
        fetches: Cell<usize>,
    }

    impl ScriptedSource {
        fn new(mut responses: Vec<Result<String, FeedError>>) -> Self {
            responses.reverse();
            Self {
                responses: RefCell::new(responses),
                fetches: Cell::new(0),
            }
        }
    }

    impl FeedSource for ScriptedSource {
        async fn fetch_csv(&self, _url: &str) -> Result<String, FeedError> {
            self.fetches.set(self.fetches.get() + 1);
            self.responses
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Ok("제목,총점\n기본,1\n".to_string()))
        }
    }

    fn ok(body: &str) -> Result<String, FeedError> {
        Ok(body.to_string())
    }

    const URL: &str = "https://example.com/pub?output=csv";

    #[tokio::test]
    async fn test_second_call_within_ttl_uses_cache() {
        let source = ScriptedSource::new(vec![ok("제목,총점\nA,1\nB,2\n")]);
        let mut cache = FeedCache::new(Duration::from_secs(300));
        let cols = ColumnNames::default();

        assert_eq!(cache.get_or_load(&source, URL, &cols).await.len(), 2);
        assert_eq!(cache.get_or_load(&source, URL, &cols).await.len(), 2);
        assert_eq!(source.fetches.get(), 1);
        assert!(cache.age().is_some());
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = ScriptedSource::new(vec![ok("제목,총점\nA,1\n"), ok("제목,총점\nA,1\nB,2\nC,3\n")]);
        let mut cache = FeedCache::new(Duration::from_secs(300));
        let cols = ColumnNames::default();

        assert_eq!(cache.get_or_load(&source, URL, &cols).await.len(), 1);
        cache.invalidate();
        assert!(cache.age().is_none());
        assert_eq!(cache.get_or_load(&source, URL, &cols).await.len(), 3);
        assert_eq!(source.fetches.get(), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let source = ScriptedSource::new(vec![]);
        let mut cache = FeedCache::new(Duration::ZERO);
        let cols = ColumnNames::default();

        cache.get_or_load(&source, URL, &cols).await;
        cache.get_or_load(&source, URL, &cols).await;
        assert_eq!(source.fetches.get(), 2);
    }

    #[tokio::test]
    async fn test_failure_not_cached_and_reported() {
        let source = ScriptedSource::new(vec![Err(FeedError::MissingHeader), ok("제목,총점\nA,1\n")]);
        let mut cache = FeedCache::new(Duration::from_secs(300));
        let cols = ColumnNames::default();

        assert!(cache.get_or_load(&source, URL, &cols).await.is_empty());
        assert_eq!(cache.last_error(), Some("CSV has no header row"));

        assert_eq!(cache.get_or_load(&source, URL, &cols).await.len(), 1);
        assert_eq!(cache.last_error(), None);
        assert_eq!(source.fetches.get(), 2);
    }

    #[tokio::test]
    async fn test_different_url_misses() {
        let source = ScriptedSource::new(vec![]);
        let mut cache = FeedCache::new(Duration::from_secs(300));
        let cols = ColumnNames::default();

        cache.get_or_load(&source, URL, &cols).await;
        cache
            .get_or_load(&source, "https://example.com/other?output=csv", &cols)
            .await;
        assert_eq!(source.fetches.get(), 2);
    }
}
