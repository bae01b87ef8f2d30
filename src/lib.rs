//! lazysearch — interactive shell around the concurrent voxel search
//! engine.
//!
//! The engine itself lives in `lazysearch-core`; world adapters in
//! `lazysearch-world`. This crate adds the text-command surface and the
//! demo binary, and re-exports the core API so integration harnesses can
//! import everything from one place.

pub mod commands;

pub use lazysearch_core::{
    Config, ResultSink, SearchError, SearchEvent, SearchManager, SearchOutcome, SearchParams,
    SessionState, VoxelPos, WorldAccess, WorldBounds,
};
