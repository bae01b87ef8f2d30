//! Shell enumeration — lazy candidate generation per cube shell.
//!
//! The search volume is a cube of half-width `radius` centered at the
//! origin, processed as concentric *shells*: shell `s` is every offset in
//! `[-s, s]^3` with at least one axis equal to `±s`. The surface condition
//! makes the shells partition the cube — an offset belongs to exactly one
//! shell, its Chebyshev length — so no voxel is visited twice across a
//! session.
//!
//! Candidates outside the Euclidean sphere of the requested radius are
//! discarded here (the cube shell's corners stick out of the sphere), as
//! are positions outside the world bounds and, in downward-only mode,
//! anything above `origin.y + 2`. Enumeration order inside a shell is
//! unspecified; callers must not depend on it.

use crate::types::{VoxelPos, WorldBounds};

/// Lazily enumerate the world-absolute candidate positions of one shell.
///
/// Filtering order: surface condition, spherical radius, world bounds,
/// vertical clamp. The content predicate runs later, in the work unit —
/// bounds filtering always precedes it.
pub fn shell_candidates(
    shell: i32,
    origin: VoxelPos,
    radius: i32,
    bounds: WorldBounds,
    downward_only: bool,
) -> impl Iterator<Item = VoxelPos> {
    let s = shell;
    let radius_f = radius as f32;
    (-s..=s).flat_map(move |x| {
        (-s..=s).flat_map(move |y| {
            (-s..=s).filter_map(move |z| {
                let on_surface = x.abs() == s || y.abs() == s || z.abs() == s;
                if !on_surface {
                    return None;
                }
                let offset = VoxelPos::new(x, y, z);
                if offset.length() > radius_f {
                    return None;
                }
                let world = origin + offset;
                if !bounds.contains(world) {
                    return None;
                }
                if downward_only && world.y > origin.y + 2 {
                    return None;
                }
                Some(world)
            })
        })
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
