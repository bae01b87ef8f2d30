//! Parallel search coordinator — shell-by-shell submission to a bounded
//! worker pool.
//!
//! [`run`] executes on a dedicated spawned task, so starting a search
//! returns immediately. Shells are submitted in strictly increasing index
//! order, one work unit per shell, gated by a semaphore of `pool_width`
//! permits; completion order across shells is unspecified, so the display
//! consumer may see far matches before near ones. The only deterministic
//! outputs are the final aggregate counters, and even those tolerate a
//! bounded race: the quota may be overshot by at most the pool width.

use crate::session::SearchSession;
use crate::shell::shell_candidates;
use crate::sink::ResultSink;
use crate::types::{SearchEvent, SearchOutcome, SessionState, VoxelPos, WorldBounds};
use crate::world::WorldAccess;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// The shared `(found count, max observed radius)` pair. Updated under one
/// short-lived mutex on every match; never held across another lock or an
/// await point.
#[derive(Debug, Default)]
struct Tally {
    found: usize,
    max_radius: f32,
}

fn lock(tally: &Mutex<Tally>) -> MutexGuard<'_, Tally> {
    tally.lock().unwrap_or_else(PoisonError::into_inner)
}

enum Wait {
    Permit(OwnedSemaphorePermit),
    Stop,
}

/// Drive one session to completion and return its outcome.
pub(crate) async fn run(session: SearchSession) -> SearchOutcome {
    let started = Instant::now();
    let tally = Arc::new(Mutex::new(Tally::default()));
    let pool = Arc::new(Semaphore::new(session.pool_width.max(1)));
    let mut units: JoinSet<()> = JoinSet::new();
    let mut submitted = 0u32;

    for shell in 0..=session.radius {
        // Wait for pool capacity. Every wait iteration re-checks the quota
        // and the cancellation signal, so no further shells are submitted
        // once either fires; units already in flight drain on their own.
        let wait = loop {
            if session.token.is_cancelled() || lock(&tally).found >= session.quota {
                break Wait::Stop;
            }
            tokio::select! {
                permit = Arc::clone(&pool).acquire_owned() => match permit {
                    Ok(permit) => break Wait::Permit(permit),
                    // The pool is never closed while the coordinator lives.
                    Err(_) => break Wait::Stop,
                },
                () = session.token.cancelled() => {}
            }
        };
        let permit = match wait {
            Wait::Permit(permit) => permit,
            Wait::Stop => break,
        };

        session.emit(SearchEvent::ShellSubmitted(shell as u32));
        submitted += 1;

        let unit = ShellUnit {
            shell,
            origin: session.origin,
            radius: session.radius,
            bounds: session.bounds,
            downward_only: session.downward_only,
            term: session.term.clone(),
            quota: session.quota,
            world: Arc::clone(&session.world),
            sink: session.sink.clone(),
            tally: Arc::clone(&tally),
            token: session.token.clone(),
            events: session.events.clone(),
        };
        units.spawn(async move {
            let _permit = permit; // released on every exit path, panics included
            unit.scan();
        });
    }

    tracing::debug!(submitted, radius = session.radius, "all shells submitted, draining units");

    // Await exactly the units actually submitted (not radius + 1 when cut
    // short). A panicking unit surfaces as a JoinError here: contained at
    // unit scope, its shell simply stays partial.
    while let Some(res) = units.join_next().await {
        if let Err(err) = res {
            tracing::warn!(error = %err, "shell unit failed");
        }
    }

    let (found, max_radius) = {
        let tally = lock(&tally);
        (tally.found, tally.max_radius)
    };
    let interrupted = session.token.is_cancelled();
    let outcome = SearchOutcome {
        total_found: found,
        max_observed_radius: max_radius,
        elapsed: started.elapsed(),
        interrupted,
        quota_hit: found >= session.quota,
    };
    session.state.set(if interrupted {
        SessionState::Interrupted
    } else {
        SessionState::Completed
    });
    session.emit(SearchEvent::Completed(outcome));
    tracing::info!(
        found,
        max_radius,
        submitted,
        interrupted,
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        "search finished"
    );
    outcome
}

/// One shell's work unit: owns clones of every shared handle it touches so
/// it can run detached on the pool.
struct ShellUnit {
    shell: i32,
    origin: VoxelPos,
    radius: i32,
    bounds: WorldBounds,
    downward_only: bool,
    term: String,
    quota: usize,
    world: Arc<dyn WorldAccess>,
    sink: ResultSink,
    tally: Arc<Mutex<Tally>>,
    token: CancellationToken,
    events: Option<UnboundedSender<SearchEvent>>,
}

impl ShellUnit {
    /// Scan one shell's candidates. Checks the cancellation signal and the
    /// shared found-count at innermost-loop granularity and returns early,
    /// without finishing the shell, when either fires.
    fn scan(&self) {
        let candidates = shell_candidates(
            self.shell,
            self.origin,
            self.radius,
            self.bounds,
            self.downward_only,
        );
        for pos in candidates {
            if self.token.is_cancelled() {
                tracing::trace!(shell = self.shell, "unit observed cancellation");
                return;
            }
            // Racy by contract: concurrent units can all pass this check
            // before any of them increments, which is where the bounded
            // quota overshoot comes from.
            if lock(&self.tally).found >= self.quota {
                return;
            }
            let Some(label) = self.world.label_at(pos) else {
                continue;
            };
            if !label.contains(&self.term) {
                continue;
            }
            self.sink.append(pos);
            {
                let mut tally = lock(&self.tally);
                tally.found += 1;
                let r = (pos - self.origin).length();
                if r > tally.max_radius {
                    tally.max_radius = r;
                }
            }
            tracing::debug!(%pos, label, shell = self.shell, "match");
            if let Some(tx) = &self.events {
                let _ = tx.send(SearchEvent::Match(pos));
            }
        }
    }
}
