//! # Sheet News Clipping
//!
//! A terminal dashboard for a news-clipping spreadsheet. An upstream process
//! collects articles and scores them with an LLM, then publishes the sheet as
//! CSV. This tool fetches that CSV, normalizes dates and scores, ranks the
//! articles, and renders the top ones as Markdown cards.
//!
//! ## Usage
//!
//! ```sh
//! sheet_news_clipping --csv-url "https://docs.google.com/.../pub?output=csv" -n 10
//! sheet_news_clipping --interactive --json-output ./top.json
//! ```
//!
//! ## Pipeline
//!
//! 1. **Fetch**: download the published CSV (cached for `--cache-ttl-secs`)
//! 2. **Normalize**: parse publish dates, coerce scores, drop blank rows
//! 3. **Rank**: sort by (score, date) descending and keep the top N
//! 4. **Output**: Markdown to stdout, optionally Markdown/JSON files

use clap::Parser;
use std::error::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use sheet_news_clipping::cli::Cli;
use sheet_news_clipping::config::{FeedConfig, FileConfig};
use sheet_news_clipping::feed::source::{FeedSource, HttpFeedSource};
use sheet_news_clipping::outputs::{json, markdown};
use sheet_news_clipping::session::{Command, HELP, Session, parse_command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr, so stdout carries only the dashboard) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("sheet_news_clipping starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let file_config = match &args.config {
        Some(path) => Some(FileConfig::load(path).await?),
        None => None,
    };
    let config = FeedConfig::resolve(&args, file_config)?;
    info!(
        csv_url = %config.csv_url,
        display_count = config.display_count,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Configuration resolved"
    );

    let source = HttpFeedSource::new()?;
    let mut session = Session::new(source, config);

    render(&mut session, &args).await;

    if args.interactive {
        run_interactive(&mut session, &args).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Build the dashboard, print it, and write any requested output files.
///
/// Output-file failures are logged and do not stop the session.
#[instrument(level = "info", skip_all)]
async fn render<S: FeedSource>(session: &mut Session<S>, args: &Cli) {
    let dashboard = session.dashboard().await;
    let md = markdown::dashboard_to_markdown(&dashboard);
    println!("{md}");

    if let Some(path) = &args.markdown_output {
        if let Err(e) = markdown::write_markdown(&md, path).await {
            error!(%path, error = %e, "Failed writing Markdown");
        }
    }
    if let Some(path) = &args.json_output {
        if let Err(e) = json::write_dashboard(&dashboard, path).await {
            error!(%path, error = %e, "Failed writing JSON");
        }
    }
}

/// Read commands from stdin until `q` or EOF.
async fn run_interactive<S: FeedSource>(
    session: &mut Session<S>,
    args: &Cli,
) -> Result<(), Box<dyn Error>> {
    eprintln!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => eprintln!("{HELP}"),
            Ok(Command::Show) => render(session, args).await,
            Ok(Command::Refresh) => {
                session.refresh();
                render(session, args).await;
            }
            Ok(Command::SetCount(count)) => match session.set_display_count(count) {
                Ok(()) => render(session, args).await,
                Err(e) => {
                    warn!(count, error = %e, "Rejected display count");
                    eprintln!("{e}");
                }
            },
            Err(msg) => eprintln!("{msg}"),
        }
    }

    info!("Interactive session ended");
    Ok(())
}
