//! Command-line interface definitions for Sheet News Clipping.
//!
//! All options are optional: anything left unset falls back to the YAML config
//! file (when `--config` is given) and then to built-in defaults.

use clap::Parser;

/// Command-line arguments for the news clipping dashboard.
///
/// # Examples
///
/// ```sh
/// # Show the default top 5 articles once
/// sheet_news_clipping
///
/// # Top 20 from a specific published sheet, also written as JSON
/// sheet_news_clipping --csv-url "https://.../pub?output=csv" -n 20 --json-output ./top.json
///
/// # Keep the dashboard open; type `r` to refresh, a number to resize, `q` to quit
/// sheet_news_clipping --interactive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL of the spreadsheet published as CSV
    #[arg(short = 'u', long, env = "NEWS_CSV_URL")]
    pub csv_url: Option<String>,

    /// Number of articles to display (1-50)
    #[arg(short = 'n', long, env = "NEWS_COUNT")]
    pub count: Option<usize>,

    /// Seconds a fetched sheet stays cached before it is re-fetched
    #[arg(long, env = "NEWS_CACHE_TTL_SECS")]
    pub cache_ttl_secs: Option<u64>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Keep running and read commands from stdin (r = refresh, <number> = count, q = quit)
    #[arg(short, long)]
    pub interactive: bool,

    /// Also write the rendered cards to this Markdown file
    #[arg(short, long)]
    pub markdown_output: Option<String>,

    /// Also write the selected articles to this JSON file
    #[arg(short, long)]
    pub json_output: Option<String>,
}
