//! Cancellation and lifecycle harness.
//!
//! # What this covers
//!
//! - **Cooperative stop**: a mid-flight stop returns an interrupted
//!   outcome with partial counts, and the manager lands back on idle.
//! - **Stop timeout**: a wedged world makes the join exceed its bound; the
//!   old session must keep running, stay installed, and block new sessions
//!   until it drains — safety over availability.
//! - **clear-highlights**: idempotent, and cancels a running session.
//! - **Shutdown**: the teardown join is unconditional.
//!
//! # Running
//!
//! ```sh
//! cargo test --test cancel_harness
//! ```

mod common;
use common::*;

use lazysearch_core::{SearchError, SessionState};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn stop_mid_flight_reports_interrupted_partial_counts() {
    let world = Arc::new(SlowWorld::new(2));
    let manager = manager_with(world, 1_000_000, 2);

    manager.start_search(params(10, "slow")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    let outcome = manager.stop_search().await.unwrap().expect("was running");
    assert!(outcome.interrupted);
    assert!(!outcome.quota_hit);
    assert_eq!(manager.sink().count(), outcome.total_found);
    assert_eq!(manager.current_state().await, SessionState::Idle);
}

/// When the previous session cannot observe cancellation in time, the stop
/// reports a timeout, the session keeps running, and a new search is
/// refused the same way until the world unblocks.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn stop_timeout_leaves_previous_session_running() {
    let world = BlockingWorld::new();
    let manager =
        lazysearch_core::SearchManager::new(world.clone(), &test_config(10, 2, 100));

    manager.start_search(params(4, "blocked")).await.unwrap();
    while world.lookups_started() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let err = manager.stop_search().await.unwrap_err();
    assert!(matches!(err, SearchError::StopTimeout { .. }));
    assert_ne!(
        manager.current_state().await,
        SessionState::Idle,
        "old session must stay installed"
    );

    let err = manager.start_search(params(2, "x")).await.unwrap_err();
    assert!(matches!(err, SearchError::StopTimeout { .. }));

    // once the world unblocks, the wedged units observe the token and drain
    world.release();
    let outcome = manager.stop_search().await.unwrap().expect("still installed");
    assert!(outcome.interrupted);
    assert_eq!(manager.current_state().await, SessionState::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn clear_highlights_is_idempotent() {
    let world = WorldBuilder::new().label(0, 0, 1, "copper-ore").build();
    let manager = manager_with(world, 10, 2);

    manager.start_search(params(2, "copper")).await.unwrap();
    manager.wait_for_completion().await.unwrap();
    assert_eq!(manager.sink().count(), 1);

    assert_eq!(manager.clear_highlights().await.unwrap(), 1);
    assert_eq!(manager.clear_highlights().await.unwrap(), 0);
    assert_eq!(manager.clear_highlights().await.unwrap(), 0);
    assert_eq!(manager.sink().count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn clear_highlights_cancels_running_search() {
    let world = Arc::new(SlowWorld::new(2));
    let manager = manager_with(world, 1_000_000, 2);

    manager.start_search(params(10, "slow")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    manager.clear_highlights().await.unwrap();
    assert_eq!(manager.sink().count(), 0);
    assert_eq!(manager.current_state().await, SessionState::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn shutdown_joins_unconditionally() {
    let world = Arc::new(SlowWorld::new(2));
    let manager = manager_with(world, 1_000_000, 2);

    manager.start_search(params(10, "slow")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let outcome = manager.shutdown().await.expect("was running");
    assert!(outcome.interrupted);
    assert_eq!(manager.current_state().await, SessionState::Idle);
}
