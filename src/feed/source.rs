//! Transport for the published sheet.
//!
//! [`FeedSource`] is the seam between loading and fetching: production code
//! uses [`HttpFeedSource`], tests swap in canned sources.

use crate::error::FeedError;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can hand back the raw CSV text behind a URL.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    async fn fetch_csv(&self, url: &str) -> Result<String, FeedError>;
}

/// Fetches CSV over HTTP(S) with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new() -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl FeedSource for HttpFeedSource {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch_csv(&self, url: &str) -> Result<String, FeedError> {
        let t0 = Instant::now();
        let res = async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(response.text().await?)
        }
        .await;
        let dt = t0.elapsed();

        match res {
            Ok(body) => {
                info!(bytes = body.len(), elapsed_ms = dt.as_millis() as u64, "Fetched sheet CSV");
                Ok(body)
            }
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u64, error = %e, "Sheet fetch failed");
                Err(e.into())
            }
        }
    }
}
