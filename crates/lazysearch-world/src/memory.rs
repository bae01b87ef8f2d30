//! In-memory map-backed world, used by tests and small demos.

use lazysearch_core::{VoxelPos, WorldAccess, WorldBounds};
use std::collections::HashMap;

/// Sparse voxel world: unlabeled positions read as empty space.
///
/// Immutable after construction, so concurrent lookups need no locking.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    labels: HashMap<VoxelPos, String>,
    bounds: WorldBounds,
}

impl MemoryWorld {
    pub fn new(bounds: WorldBounds) -> Self {
        Self {
            labels: HashMap::new(),
            bounds,
        }
    }

    /// Label the voxel at `(x, y, z)`. Builder-style, pre-construction only.
    pub fn with_label(mut self, x: i32, y: i32, z: i32, label: impl Into<String>) -> Self {
        self.labels.insert(VoxelPos::new(x, y, z), label.into());
        self
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

impl WorldAccess for MemoryWorld {
    fn label_at(&self, pos: VoxelPos) -> Option<String> {
        if !self.bounds.contains(pos) {
            return None;
        }
        self.labels.get(&pos).cloned()
    }

    fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_inside_and_outside_bounds() {
        let world = MemoryWorld::new(WorldBounds::cube(10)).with_label(1, 2, 3, "copper-ore");
        assert_eq!(
            world.label_at(VoxelPos::new(1, 2, 3)).as_deref(),
            Some("copper-ore")
        );
        assert_eq!(world.label_at(VoxelPos::new(0, 0, 0)), None);
        // a label outside bounds would never be placed, but lookups past the
        // edge must still read as empty
        assert_eq!(world.label_at(VoxelPos::new(99, 0, 0)), None);
    }
}
