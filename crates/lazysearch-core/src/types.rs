//! Core types for lazysearch-core.
//!
//! This module defines the fundamental data structures shared across all
//! engine layers: the world-absolute [`VoxelPos`], the [`WorldBounds`] box,
//! the per-session [`SessionState`] machine, the final [`SearchOutcome`]
//! report, and the [`SearchEvent`] stream consumed by the display side.

use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

/// A world-absolute voxel coordinate.
///
/// Also used for *offsets* relative to a search origin; the two are never
/// mixed inside one expression — [`Add`]/[`Sub`] convert between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub const ORIGIN: VoxelPos = VoxelPos { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of this position interpreted as an offset.
    ///
    /// Computed in `f64` so large coordinates cannot overflow the squares,
    /// then narrowed to `f32` — the precision reported to users.
    pub fn length(self) -> f32 {
        let (x, y, z) = (self.x as f64, self.y as f64, self.z as f64);
        (x * x + y * y + z * z).sqrt() as f32
    }

    /// Chebyshev length: the index of the cube shell this offset lies on.
    pub fn chebyshev(self) -> i32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }
}

impl Add for VoxelPos {
    type Output = VoxelPos;

    fn add(self, rhs: VoxelPos) -> VoxelPos {
        VoxelPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for VoxelPos {
    type Output = VoxelPos;

    fn sub(self, rhs: VoxelPos) -> VoxelPos {
        VoxelPos::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for VoxelPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Axis-aligned box of valid world coordinates: `min` inclusive, `max`
/// exclusive, checked independently per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    pub min: VoxelPos,
    pub max: VoxelPos,
}

impl WorldBounds {
    pub const fn new(min: VoxelPos, max: VoxelPos) -> Self {
        Self { min, max }
    }

    /// A cube spanning `[-half, half]` on every axis (both ends valid).
    pub const fn cube(half: i32) -> Self {
        Self {
            min: VoxelPos::new(-half, -half, -half),
            max: VoxelPos::new(half + 1, half + 1, half + 1),
        }
    }

    pub fn contains(&self, p: VoxelPos) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }
}

/// Lifecycle state of a search session.
///
/// At most one session is ever `Running` (or `CancelRequested`) at a time;
/// starting a new session fully retires the previous one first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session installed.
    Idle,
    /// The coordinator task is submitting shells / units are scanning.
    Running,
    /// The cancellation token has fired; units are draining.
    CancelRequested,
    /// Terminal: the session was cancelled before finishing all shells.
    Interrupted,
    /// Terminal: every submitted shell finished normally.
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Running => write!(f, "running"),
            SessionState::CancelRequested => write!(f, "cancel-requested"),
            SessionState::Interrupted => write!(f, "interrupted"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// Final report of one search session.
///
/// An interrupted session produces the same shape with partial counts —
/// cancellation is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Total matches appended to the sink. May exceed the quota by at most
    /// the pool width (bounded-overshoot contract).
    pub total_found: usize,
    /// Largest offset length among matched voxels; `0.0` when nothing
    /// matched.
    pub max_observed_radius: f32,
    /// Wall-clock duration from session start to finalization.
    pub elapsed: Duration,
    /// The session was cancelled before finishing all shells.
    pub interrupted: bool,
    /// The quota snapshot was reached (or overshot).
    pub quota_hit: bool,
}

/// Progress event published by a running session.
///
/// The display consumer drains these on an unbounded channel; a session
/// with no subscriber skips publishing entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchEvent {
    /// A work unit for the given shell index was handed to the pool.
    /// Indices within one session are strictly increasing.
    ShellSubmitted(u32),
    /// A matching voxel was appended to the result sink.
    Match(VoxelPos),
    /// The session finalized (normally or interrupted).
    Completed(SearchOutcome),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
