//! SearchManager — the single owned entry point to the engine.
//!
//! Earlier iterations of this behavior lived in ambient globals (one
//! outstanding search, a shared quota). Here all of it is owned by one
//! manager value passed to callers: the world handle, the shared
//! [`ResultSink`], the process-lifetime quota, and the
//! [`CancellationGate`] holding at most one session.
//!
//! Starting a search first fully retires any running session (cancel plus
//! bounded join), so "at most one session Running" holds at every instant
//! — contingent only on the join not timing out, in which case the old
//! session is left alone and the new one is refused.
//!
//! [`CancellationGate`]: crate::cancel::CancellationGate

use crate::cancel::{ActiveSearch, CancellationGate};
use crate::config::Config;
use crate::coordinator;
use crate::error::SearchError;
use crate::session::{SearchSession, StateCell};
use crate::sink::ResultSink;
use crate::types::{SearchEvent, SearchOutcome, SessionState, VoxelPos};
use crate::world::WorldAccess;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Parameters of one search invocation.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub origin: VoxelPos,
    pub radius: i32,
    /// Substring matched against voxel content labels.
    pub term: String,
    /// Restrict the scan to world `y ≤ origin.y + 2`.
    pub downward_only: bool,
}

impl SearchParams {
    pub fn new(origin: VoxelPos, radius: i32, term: impl Into<String>) -> Self {
        Self {
            origin,
            radius,
            term: term.into(),
            downward_only: false,
        }
    }

    /// Vertical-restricted variant (`search-down`).
    pub fn downward(mut self) -> Self {
        self.downward_only = true;
        self
    }
}

pub struct SearchManager {
    world: Arc<dyn WorldAccess>,
    sink: ResultSink,
    /// Process-lifetime quota. Sessions capture a snapshot at start, so
    /// changing it mid-flight only affects future sessions.
    quota: AtomicUsize,
    pool_width: usize,
    stop_timeout: Duration,
    show_bounding_shell: bool,
    gate: Mutex<CancellationGate>,
    events: StdMutex<Option<UnboundedSender<SearchEvent>>>,
}

impl SearchManager {
    pub fn new(world: Arc<dyn WorldAccess>, config: &Config) -> Self {
        Self {
            world,
            sink: ResultSink::new(),
            quota: AtomicUsize::new(config.search.quota.max(1)),
            pool_width: config.search.pool_width.max(1),
            stop_timeout: Duration::from_millis(config.search.stop_timeout_ms),
            show_bounding_shell: config.display.show_bounding_shell,
            gate: Mutex::new(CancellationGate::new()),
            events: StdMutex::new(None),
        }
    }

    /// Clone of the shared result list, for the display consumer.
    pub fn sink(&self) -> ResultSink {
        self.sink.clone()
    }

    /// Subscribe to progress events. Replaces any previous subscriber;
    /// sessions pick up the sender installed at their start time.
    pub fn subscribe(&self) -> UnboundedReceiver<SearchEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.events_slot() = Some(tx);
        rx
    }

    pub fn quota(&self) -> usize {
        self.quota.load(Ordering::Relaxed)
    }

    /// Set the highlight quota. Lowering it below the current result count
    /// truncates the sink to the first `quota` entries.
    pub fn set_quota(&self, quota: usize) -> Result<(), SearchError> {
        if quota == 0 {
            return Err(SearchError::InvalidQuota(0));
        }
        let old = self.quota.swap(quota, Ordering::Relaxed);
        self.sink.truncate_to_first(quota);
        tracing::info!(old, new = quota, "quota changed");
        Ok(())
    }

    /// Start a search session, superseding any running one.
    ///
    /// Arguments are validated before anything else — an invalid call
    /// leaves all state untouched, including a running session. Returns as
    /// soon as the coordinator task is spawned; the outcome arrives via
    /// [`SearchEvent::Completed`] or [`wait_for_completion`].
    ///
    /// [`wait_for_completion`]: SearchManager::wait_for_completion
    pub async fn start_search(&self, params: SearchParams) -> Result<(), SearchError> {
        if params.radius <= 0 {
            return Err(SearchError::InvalidRadius(params.radius));
        }
        if params.term.is_empty() {
            return Err(SearchError::EmptyTerm);
        }

        let mut gate = self.gate.lock().await;
        if let Some(outcome) = gate.cancel_and_join(self.stop_timeout).await? {
            tracing::debug!(
                found = outcome.total_found,
                interrupted = outcome.interrupted,
                "previous session retired"
            );
        }

        self.sink.clear();
        self.sink.set_origin(params.origin);
        if self.show_bounding_shell {
            // side length of the searched cube
            self.sink.set_shell_size(2 * params.radius + 1);
        }

        let token = CancellationToken::new();
        let state = StateCell::new(SessionState::Running);
        let session = SearchSession {
            origin: params.origin,
            radius: params.radius,
            term: params.term,
            quota: self.quota(),
            bounds: self.world.bounds(),
            downward_only: params.downward_only,
            pool_width: self.pool_width,
            world: Arc::clone(&self.world),
            sink: self.sink.clone(),
            token: token.clone(),
            state: state.clone(),
            events: self.events_slot().clone(),
        };
        tracing::info!(
            origin = %session.origin,
            radius = session.radius,
            term = %session.term,
            quota = session.quota,
            downward = session.downward_only,
            "starting search"
        );
        let handle = tokio::spawn(coordinator::run(session));
        gate.install(ActiveSearch {
            token,
            handle,
            state,
        });
        Ok(())
    }

    /// Cancel the running session and wait for it, bounded.
    ///
    /// `Ok(None)` when nothing was running — a no-op stop is a success.
    pub async fn stop_search(&self) -> Result<Option<SearchOutcome>, SearchError> {
        self.gate.lock().await.cancel_and_join(self.stop_timeout).await
    }

    /// Stop any running session, then empty the sink. Idempotent; returns
    /// the number of highlights removed.
    pub async fn clear_highlights(&self) -> Result<usize, SearchError> {
        let mut gate = self.gate.lock().await;
        gate.cancel_and_join(self.stop_timeout).await?;
        let cleared = self.sink.count();
        self.sink.clear();
        Ok(cleared)
    }

    /// `Idle` when no session is installed; otherwise the session's state.
    pub async fn current_state(&self) -> SessionState {
        self.gate.lock().await.state()
    }

    /// Await the active session's outcome without cancelling it, leaving
    /// the manager idle. `None` when nothing was running.
    pub async fn wait_for_completion(&self) -> Option<SearchOutcome> {
        self.gate.lock().await.join().await
    }

    /// Unconditional cancel-and-join for process teardown (no timeout).
    pub async fn shutdown(&self) -> Option<SearchOutcome> {
        self.gate.lock().await.shutdown().await
    }

    fn events_slot(&self) -> std::sync::MutexGuard<'_, Option<UnboundedSender<SearchEvent>>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
