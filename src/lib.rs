//! Library side of Sheet News Clipping.
//!
//! The binary in `main.rs` is a thin shell around these modules:
//!
//! - [`feed`]: fetch, normalize and cache the published sheet
//! - [`ranking`]: order by (score, date) and select the top N
//! - [`outputs`]: Markdown cards and JSON export
//! - [`session`]: display count, refresh and interactive commands
//! - [`config`] / [`cli`]: flags, environment and YAML settings

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod outputs;
pub mod ranking;
pub mod session;
pub mod utils;
