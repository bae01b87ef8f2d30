//! ResultSink — the shared, ordered list of discovered voxel positions.
//!
//! One sink instance is shared between the search engine (many concurrent
//! writers) and the display consumer (an independent reader that snapshots
//! the list each frame). Entries stay in discovery order, which is *not*
//! spatial order: far-shell matches can land before near-shell ones.
//!
//! Alongside the positions the sink carries display-only metadata — the
//! current search origin and the bounding-shell size the renderer draws
//! around the searched volume (`-1` = hidden). `clear` resets both.

use crate::types::VoxelPos;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Bounding-shell sentinel meaning "draw nothing".
pub const SHELL_HIDDEN: i32 = -1;

#[derive(Debug)]
struct SinkInner {
    positions: Vec<VoxelPos>,
    origin: Option<VoxelPos>,
    shell_size: i32,
}

/// Cheaply cloneable handle to the shared result list.
///
/// All operations take the same short-lived lock, so a reader never
/// observes a half-mutated list. The lock is never held across another
/// lock or an await point.
#[derive(Debug, Clone)]
pub struct ResultSink {
    inner: Arc<Mutex<SinkInner>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SinkInner {
                positions: Vec::new(),
                origin: None,
                shell_size: SHELL_HIDDEN,
            })),
        }
    }

    // A panicked appender leaves the list itself intact, so a poisoned
    // lock is still safe to read through.
    fn lock(&self) -> MutexGuard<'_, SinkInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a discovered position, preserving insertion order.
    pub fn append(&self, pos: VoxelPos) {
        self.lock().positions.push(pos);
    }

    /// Independent copy of the current list, taken under the mutation lock.
    pub fn snapshot(&self) -> Vec<VoxelPos> {
        self.lock().positions.clone()
    }

    /// Empty the list and reset the display metadata.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.positions.clear();
        inner.origin = None;
        inner.shell_size = SHELL_HIDDEN;
    }

    /// Keep only the first `n` insertion-order entries. No-op when the list
    /// is already at or below `n`.
    pub fn truncate_to_first(&self, n: usize) {
        let mut inner = self.lock();
        if inner.positions.len() > n {
            inner.positions.truncate(n);
        }
    }

    pub fn count(&self) -> usize {
        self.lock().positions.len()
    }

    pub fn set_origin(&self, pos: VoxelPos) {
        self.lock().origin = Some(pos);
    }

    pub fn origin(&self) -> Option<VoxelPos> {
        self.lock().origin
    }

    /// Set the bounding-shell side length shown by the renderer, or
    /// [`SHELL_HIDDEN`] to hide it.
    pub fn set_shell_size(&self, size: i32) {
        self.lock().shell_size = size;
    }

    pub fn shell_size(&self) -> i32 {
        self.lock().shell_size
    }
}

impl Default for ResultSink {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
