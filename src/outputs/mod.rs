//! Output generation for the ranked dashboard.
//!
//! # Submodules
//!
//! - [`markdown`]: renders article cards; printed to stdout and optionally saved
//! - [`json`]: writes the selection as JSON for other tools
//!
//! Both writers create missing parent directories and overwrite existing files.

pub mod json;
pub mod markdown;
