//! Test builders — ergonomic constructors for worlds, configs, and search
//! parameters.
//!
//! These are for readability in test assertions, not for production use;
//! they panic on invalid input rather than returning `Result`.

use lazysearch_core::{Config, SearchManager, SearchParams, VoxelPos, WorldAccess, WorldBounds};
use lazysearch_world::MemoryWorld;
use std::sync::Arc;

/// Wide-open test bounds: `[-1000, 1000]^3`.
pub const WIDE: WorldBounds = WorldBounds::cube(1000);

/// Fluent builder for [`MemoryWorld`] fixtures.
///
/// ```rust,ignore
/// let world = WorldBuilder::new()
///     .label(0, 0, 1, "copper-ore")
///     .label(5, 0, 0, "copper-ore")
///     .build();
/// ```
pub struct WorldBuilder {
    world: MemoryWorld,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            world: MemoryWorld::new(WIDE),
        }
    }

    pub fn bounds(bounds: WorldBounds) -> Self {
        Self {
            world: MemoryWorld::new(bounds),
        }
    }

    pub fn label(mut self, x: i32, y: i32, z: i32, label: &str) -> Self {
        self.world = self.world.with_label(x, y, z, label);
        self
    }

    /// Solid cube of identically labeled voxels around `center`.
    pub fn fill_cube(mut self, center: VoxelPos, half: i32, label: &str) -> Self {
        for x in -half..=half {
            for y in -half..=half {
                for z in -half..=half {
                    self.world = self.world.with_label(
                        center.x + x,
                        center.y + y,
                        center.z + z,
                        label,
                    );
                }
            }
        }
        self
    }

    pub fn build(self) -> Arc<MemoryWorld> {
        Arc::new(self.world)
    }
}

/// Built-in defaults with the knobs tests care about overridden.
pub fn test_config(quota: usize, pool_width: usize, stop_timeout_ms: u64) -> Config {
    let mut cfg = Config::defaults();
    cfg.search.quota = quota;
    cfg.search.pool_width = pool_width;
    cfg.search.stop_timeout_ms = stop_timeout_ms;
    cfg
}

/// Manager with the default 3-second stop timeout.
pub fn manager_with(world: Arc<dyn WorldAccess>, quota: usize, pool_width: usize) -> SearchManager {
    SearchManager::new(world, &test_config(quota, pool_width, 3000))
}

/// Search from the origin of the test coordinate frame.
pub fn params(radius: i32, term: &str) -> SearchParams {
    SearchParams::new(VoxelPos::ORIGIN, radius, term)
}
