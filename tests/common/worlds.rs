//! Instrumented world implementations for cancellation and pacing tests.
//!
//! Both worlds block the calling thread from inside `label_at`, which runs
//! on a tokio worker via the pool-gated units. Harnesses using them must
//! run with `worker_threads` strictly greater than the manager's
//! `pool_width`, or the blocked units starve the coordinator and the test
//! task itself.

use lazysearch_core::{VoxelPos, WorldAccess, WorldBounds};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Every voxel matches and every lookup sleeps briefly, so a search stays
/// in flight long enough for a test to cancel or supersede it.
pub struct SlowWorld {
    bounds: WorldBounds,
    delay: Duration,
}

impl SlowWorld {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            bounds: WorldBounds::cube(1000),
            delay: Duration::from_millis(delay_ms),
        }
    }
}

impl WorldAccess for SlowWorld {
    fn label_at(&self, _pos: VoxelPos) -> Option<String> {
        std::thread::sleep(self.delay);
        Some("slow-ore".to_string())
    }

    fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}

/// Lookups block until [`release`](BlockingWorld::release) — models a
/// wedged storage backend for exercising the stop-timeout path.
pub struct BlockingWorld {
    bounds: WorldBounds,
    released: Mutex<bool>,
    cv: Condvar,
    lookups: AtomicUsize,
}

impl BlockingWorld {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            bounds: WorldBounds::cube(1000),
            released: Mutex::new(false),
            cv: Condvar::new(),
            lookups: AtomicUsize::new(0),
        })
    }

    /// Unblock every pending and future lookup.
    pub fn release(&self) {
        *self.released.lock().unwrap() = true;
        self.cv.notify_all();
    }

    /// How many lookups have entered (and possibly parked in) the world.
    pub fn lookups_started(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl WorldAccess for BlockingWorld {
    fn label_at(&self, _pos: VoxelPos) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let mut released = self.released.lock().unwrap();
        while !*released {
            released = self.cv.wait(released).unwrap();
        }
        Some("blocked-ore".to_string())
    }

    fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}
