//! lazysearch-core — concurrent, cancellable, quota-bounded voxel search.
//!
//! Given an origin, a radius, and a substring predicate, the engine walks
//! concentric cube shells of the voxel grid in parallel and publishes
//! matches incrementally to a shared result list read by an independent
//! display consumer.
//!
//! # Architecture
//!
//! ```text
//! SearchManager ──► SearchSession ──► Coordinator ──► shell units ──► ResultSink
//!       │                                  │
//!       └── CancellationGate ◄─────────────┘
//! ```
//!
//! The manager owns all shared state; one session at most is ever running,
//! superseded cooperatively via a cancellation token with a bounded join.
//! Per-shell work units run on a semaphore-bounded `tokio` pool.

pub mod config;
pub mod error;
pub mod manager;
pub mod shell;
pub mod sink;
pub mod types;
pub mod world;

mod cancel;
mod coordinator;
mod session;

pub use config::Config;
pub use error::SearchError;
pub use manager::{SearchManager, SearchParams};
pub use sink::ResultSink;
pub use types::{SearchEvent, SearchOutcome, SessionState, VoxelPos, WorldBounds};
pub use world::WorldAccess;
