//! Error type for the search engine.
//!
//! Invalid arguments are rejected synchronously, before any session state
//! changes. A cancellation that runs to completion is *not* an error — it
//! yields a normal [`SearchOutcome`](crate::types::SearchOutcome) marked
//! interrupted. The only runtime failure surfaced here is the stop-join
//! timing out, which leaves the previous session running.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("radius must be a positive integer, got {0}")]
    InvalidRadius(i32),

    #[error("quota must be a positive integer, got {0}")]
    InvalidQuota(i64),

    #[error("search term must not be empty")]
    EmptyTerm,

    /// The previous session did not observe cancellation within the bound.
    /// It is still running; no new session was started.
    #[error("previous search did not stop within {timeout:?} and is still running")]
    StopTimeout { timeout: Duration },
}
