//! End-to-end search benchmarks.
//!
//! Runs full sessions against the deterministic procedural world: shell
//! submission, pooled units, sink appends, and the final join. Quota is
//! set high enough that the pool, not the cap, is the limiter.
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench search_bench
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lazysearch_core::{Config, SearchManager, SearchParams, VoxelPos, WorldBounds};
use lazysearch_world::ProceduralWorld;
use std::sync::Arc;

fn bench_config() -> Config {
    let mut cfg = Config::defaults();
    cfg.search.quota = 1_000_000;
    cfg
}

fn full_search_bench(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("bench runtime");
    let world = Arc::new(ProceduralWorld::new(WorldBounds::cube(500), 42));
    let cfg = bench_config();

    let mut group = c.benchmark_group("search/full_session");
    group.sample_size(20);
    for radius in [8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &radius| {
            b.iter(|| {
                rt.block_on(async {
                    let manager = SearchManager::new(world.clone(), &cfg);
                    let params = SearchParams::new(VoxelPos::new(0, -20, 0), radius, "ore");
                    manager.start_search(params).await.expect("start");
                    manager.wait_for_completion().await.expect("outcome")
                })
            })
        });
    }
    group.finish();
}

criterion_group!(benches, full_search_bench);
criterion_main!(benches);
