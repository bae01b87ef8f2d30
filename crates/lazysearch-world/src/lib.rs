//! lazysearch-world — world-collaborator adapters for lazysearch.
//!
//! Each adapter implements [`lazysearch_core::WorldAccess`], the seam the
//! engine reads voxel labels through. Adapters must be safe for concurrent
//! lookups from many work units.

pub mod memory;
pub mod procedural;

pub use memory::MemoryWorld;
pub use procedural::ProceduralWorld;
