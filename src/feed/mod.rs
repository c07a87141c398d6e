//! Loading the published news sheet.
//!
//! # Submodules
//!
//! - [`source`]: the [`FeedSource`](source::FeedSource) seam and its HTTP implementation
//! - [`loader`]: CSV parsing and per-row normalization
//! - [`dates`]: ordered publish-date parse strategies
//! - [`cache`]: TTL cache with explicit invalidation for the refresh action

pub mod cache;
pub mod dates;
pub mod loader;
pub mod source;
