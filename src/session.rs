//! One dashboard session: the cache, the display count and the stdin commands
//! that change them.

use crate::config::{FeedConfig, validate_count};
use crate::error::ConfigError;
use crate::feed::cache::FeedCache;
use crate::feed::source::FeedSource;
use crate::models::Dashboard;
use crate::ranking::rank;
use crate::utils::local_timestamp;
use tracing::{info, instrument};

pub const HELP: &str = "commands: r = refresh (clear cache), <1-50> = number of articles, <enter> = redraw, q = quit";

/// A line typed in interactive mode.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Clear the cache and re-fetch.
    Refresh,
    /// Redraw, served from cache while fresh.
    Show,
    SetCount(usize),
    Help,
    Quit,
}

/// Parse one stdin line. Unknown input is an error carrying a message for the user.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Show),
        "r" | "refresh" | "새로고침" => Ok(Command::Refresh),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "h" | "help" | "?" => Ok(Command::Help),
        other => other
            .parse::<usize>()
            .map(Command::SetCount)
            .map_err(|_| format!("unknown command {line:?}; {HELP}")),
    }
}

pub struct Session<S> {
    source: S,
    cache: FeedCache,
    config: FeedConfig,
}

impl<S: FeedSource> Session<S> {
    pub fn new(source: S, config: FeedConfig) -> Self {
        Self {
            source,
            cache: FeedCache::new(config.cache_ttl),
            config,
        }
    }

    pub fn display_count(&self) -> usize {
        self.config.display_count
    }

    pub fn set_display_count(&mut self, count: usize) -> Result<(), ConfigError> {
        self.config.display_count = validate_count(count)?;
        info!(count, "Display count changed");
        Ok(())
    }

    /// Throw away the cached sheet so the next dashboard is fetched fresh.
    pub fn refresh(&mut self) {
        self.cache.invalidate();
    }

    /// Load (or reuse) the sheet, rank it and select the top articles.
    #[instrument(level = "info", skip_all)]
    pub async fn dashboard(&mut self) -> Dashboard {
        let url = self.config.csv_url.as_str();
        let records = self
            .cache
            .get_or_load(&self.source, url, &self.config.columns)
            .await;
        let total_available = records.len();
        let articles = rank(records, self.config.display_count);
        info!(
            available = total_available,
            requested = self.config.display_count,
            selected = articles.len(),
            "Dashboard assembled"
        );

        Dashboard {
            generated_at: local_timestamp(),
            source_url: url.to_string(),
            total_available,
            articles,
            load_error: self.cache.last_error().map(str::to_string),
        }
    }
}
