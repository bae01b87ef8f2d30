//! SearchSession — one invocation's captured parameters and shared handles.
//!
//! Everything a session needs is captured at start time: in particular the
//! quota *snapshot*, so a `set-quota` mid-flight only affects future
//! sessions. The state cell is shared between the coordinator task (which
//! moves it to a terminal state) and the manager (which reads it and marks
//! `CancelRequested` when superseding or stopping).

use crate::sink::ResultSink;
use crate::types::{SearchEvent, SessionState, VoxelPos, WorldBounds};
use crate::world::WorldAccess;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Shared lifecycle state of one session.
#[derive(Debug, Clone)]
pub(crate) struct StateCell(Arc<Mutex<SessionState>>);

impl StateCell {
    pub fn new(state: SessionState) -> Self {
        Self(Arc::new(Mutex::new(state)))
    }

    pub fn get(&self) -> SessionState {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, next: SessionState) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

/// Parameters and shared handles of one running search invocation.
pub(crate) struct SearchSession {
    pub origin: VoxelPos,
    pub radius: i32,
    pub term: String,
    /// Quota value captured when the session started.
    pub quota: usize,
    /// World bounds captured when the session started.
    pub bounds: WorldBounds,
    pub downward_only: bool,
    pub pool_width: usize,
    pub world: Arc<dyn WorldAccess>,
    pub sink: ResultSink,
    pub token: CancellationToken,
    pub state: StateCell,
    pub events: Option<UnboundedSender<SearchEvent>>,
}

impl SearchSession {
    /// Publish a progress event; a missing or dropped subscriber is fine.
    pub fn emit(&self, event: SearchEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
