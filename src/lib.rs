//! recall-radar — terminal client for a recall/safety-alert directory.
//!
//! The interesting part lives in [`query`]: a canonical filter state with a
//! lossless URL query-string codec, so filter combinations are shareable,
//! bookmarkable, and reproducible from a pasted link. Around it: typed wire
//! models ([`model`]), the tracked/other watchlist partition ([`watch`]),
//! an HTTP client for the backend ([`api`]), and the clap surface ([`cli`]).
//!
//! Layering rule: `query` and `watch` are pure and do no I/O; everything
//! that touches the network or the clock sits in `api`/`cli`.

pub mod api;
pub mod cli;
pub mod config;
pub mod model;
pub mod query;
pub mod watch;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use model::{ConfidenceLevel, Recall, Region, WatchlistItem};
pub use query::RecallQuery;
pub use watch::partition_tracked;
