//! Deterministic procedural world for the demo binary and benchmarks.
//!
//! Labels are derived from a coordinate hash, so the same seed always
//! produces the same terrain — no RNG state, no locking, safe for
//! concurrent lookups.

use lazysearch_core::{VoxelPos, WorldAccess, WorldBounds};

/// Rock strata with occasional ore pockets below the surface level.
#[derive(Debug, Clone)]
pub struct ProceduralWorld {
    bounds: WorldBounds,
    seed: u64,
    /// World `y` above which everything is empty air.
    surface_y: i32,
}

const ROCKS: [&str; 4] = ["granite", "basalt", "andesite", "limestone"];
const ORES: [&str; 4] = ["copper-ore", "tin-ore", "iron-ore", "quartz-ore"];

/// One ore pocket per roughly this many rock voxels.
const ORE_RARITY: u64 = 97;

impl ProceduralWorld {
    pub fn new(bounds: WorldBounds, seed: u64) -> Self {
        Self {
            bounds,
            seed,
            surface_y: 0,
        }
    }

    pub fn with_surface(mut self, surface_y: i32) -> Self {
        self.surface_y = surface_y;
        self
    }

    // splitmix64 over the packed coordinates; cheap and well distributed
    fn hash(&self, pos: VoxelPos) -> u64 {
        let packed = (pos.x as u64 & 0x1f_ffff)
            | ((pos.y as u64 & 0x1f_ffff) << 21)
            | ((pos.z as u64 & 0x1f_ffff) << 42);
        let mut h = packed ^ self.seed;
        h = (h ^ (h >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        h = (h ^ (h >> 27)).wrapping_mul(0x94d049bb133111eb);
        h ^ (h >> 31)
    }
}

impl WorldAccess for ProceduralWorld {
    fn label_at(&self, pos: VoxelPos) -> Option<String> {
        if !self.bounds.contains(pos) || pos.y > self.surface_y {
            return None;
        }
        let h = self.hash(pos);
        let label = if h % ORE_RARITY == 0 {
            ORES[(h >> 8) as usize % ORES.len()]
        } else {
            ROCKS[(h >> 8) as usize % ROCKS.len()]
        };
        Some(label.to_string())
    }

    fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
