//! CancellationGate — at most one outstanding session, cancelled
//! cooperatively and joined under a bound.
//!
//! The gate prefers safety over availability: if the old session does not
//! observe cancellation within the timeout it *keeps running*, the join
//! reports [`SearchError::StopTimeout`], and no new session starts. The
//! unbounded variants exist for normal completion ([`join`]) and process
//! teardown ([`shutdown`]).
//!
//! [`join`]: CancellationGate::join
//! [`shutdown`]: CancellationGate::shutdown

use crate::error::SearchError;
use crate::session::StateCell;
use crate::types::{SearchOutcome, SessionState};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handles to the one in-flight session.
pub(crate) struct ActiveSearch {
    pub token: CancellationToken,
    pub handle: JoinHandle<SearchOutcome>,
    pub state: StateCell,
}

pub(crate) struct CancellationGate {
    active: Option<ActiveSearch>,
}

impl CancellationGate {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Install a freshly spawned session. The previous one must have been
    /// drained first — that ordering is what makes "at most one Running"
    /// a hard invariant.
    pub fn install(&mut self, search: ActiveSearch) {
        debug_assert!(self.active.is_none(), "gate not drained before install");
        self.active = Some(search);
    }

    /// State of the installed session, or `Idle` when none is installed.
    /// A finished-but-unjoined session still reports its terminal state.
    pub fn state(&self) -> SessionState {
        self.active
            .as_ref()
            .map(|a| a.state.get())
            .unwrap_or(SessionState::Idle)
    }

    /// Signal cancellation and wait for the controlling task, bounded.
    ///
    /// `Ok(None)` when nothing was installed (a no-op stop is a success,
    /// not an error). On timeout the session handle is put back untouched
    /// and the caller must not start a new session.
    pub async fn cancel_and_join(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<SearchOutcome>, SearchError> {
        let Some(mut active) = self.active.take() else {
            return Ok(None);
        };
        active.token.cancel();
        if active.state.get() == SessionState::Running {
            active.state.set(SessionState::CancelRequested);
        }
        match tokio::time::timeout(timeout, &mut active.handle).await {
            Ok(Ok(outcome)) => Ok(Some(outcome)),
            Ok(Err(err)) => {
                // The coordinator task itself died; nothing left to retire.
                tracing::error!(error = %err, "search task failed during join");
                Ok(None)
            }
            Err(_) => {
                self.active = Some(active);
                Err(SearchError::StopTimeout { timeout })
            }
        }
    }

    /// Await normal completion without cancelling.
    pub async fn join(&mut self) -> Option<SearchOutcome> {
        let Some(active) = self.active.take() else {
            return None;
        };
        match active.handle.await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::error!(error = %err, "search task failed during join");
                None
            }
        }
    }

    /// Cancel and join with no bound. Process-teardown path only.
    pub async fn shutdown(&mut self) -> Option<SearchOutcome> {
        let Some(active) = self.active.take() else {
            return None;
        };
        active.token.cancel();
        match active.handle.await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::error!(error = %err, "search task failed during shutdown");
                None
            }
        }
    }
}
