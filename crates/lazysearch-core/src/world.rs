//! World collaborator seam.
//!
//! The engine never owns voxel storage; it reads labels through this trait.
//! Implementations must tolerate concurrent calls from many work units
//! without internal serialization that would defeat the parallel scan —
//! lookups are assumed fast and are the only I/O a unit performs.

use crate::types::{VoxelPos, WorldBounds};

pub trait WorldAccess: Send + Sync {
    /// Content label of the voxel at `pos`, or `None` for empty/unloaded
    /// space. Matching is a substring test against this label.
    fn label_at(&self, pos: VoxelPos) -> Option<String>;

    /// The box of valid coordinates; captured once per session.
    fn bounds(&self) -> WorldBounds;
}
