//! Criterion benchmarks for the tile storage layer.
//!
//! Benchmarks:
//!   - tile_xy / tile_x / tile_y addressing
//!   - add_dir stepping at the map center
//!   - other_bridge_end over a long span
//!
//! Run with: cargo bench -p map --bench map_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use map::bridge::{make_rail_bridge_ramp, other_bridge_end, BridgeType};
use map::coords::DiagDirection;
use map::storage::{Owner, RailTypeId, WorldMap};

// ---------------------------------------------------------------------------
// Benchmark: addressing
// ---------------------------------------------------------------------------

fn bench_addressing(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_addressing");
    group.sample_size(1000);

    let map = WorldMap::new(256, 256);

    group.bench_function("tile_xy", |b| {
        b.iter(|| black_box(map.tile_xy(black_box(128), black_box(128))));
    });

    let center = map.tile_xy(128, 128);
    group.bench_function("tile_x_tile_y", |b| {
        b.iter(|| {
            black_box(map.tile_x(black_box(center)));
            black_box(map.tile_y(black_box(center)));
        });
    });

    group.bench_function("add_dir_center", |b| {
        b.iter(|| black_box(map.add_dir(black_box(center), black_box(DiagDirection::SW))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: bridge end scan
// ---------------------------------------------------------------------------

fn bench_bridge_end_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_bridge_end");
    group.sample_size(500);

    let mut map = WorldMap::new(256, 256);
    let n = map.tile_xy(5, 100);
    let s = map.tile_xy(250, 100);
    make_rail_bridge_ramp(&mut map, n, Owner(1), BridgeType(0), DiagDirection::SW, RailTypeId(0));
    make_rail_bridge_ramp(&mut map, s, Owner(1), BridgeType(0), DiagDirection::NE, RailTypeId(0));

    group.bench_function("span_245_tiles", |b| {
        b.iter(|| black_box(other_bridge_end(black_box(&map), black_box(n))));
    });

    group.finish();
}

criterion_group!(benches, bench_addressing, bench_bridge_end_scan);
criterion_main!(benches);
