// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{Aabb2D, Linear, RStar, RStarTreeF64, RTreeF64, RTreeGeneric, Strategy};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, rect: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (extent - rect);
        let y0 = rng.next_f64() * (extent - rect);
        out.push(Aabb2D::<f64>::from_xywh(x0, y0, rect, rect));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() + rng.next_f64() + rng.next_f64() - 1.5) * spread;
            let dy = (rng.next_f64() + rng.next_f64() + rng.next_f64() - 1.5) * spread;
            out.push(Aabb2D::<f64>::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn gen_windows(count: usize, extent: f64, size: f64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * (extent - size);
            let y0 = rng.next_f64() * (extent - size);
            Aabb2D::<f64>::from_xywh(x0, y0, size, size)
        })
        .collect()
}

fn build<S: Strategy>(rects: &[Aabb2D<f64>], max_entries: usize) -> RTreeGeneric<f64, u32, S> {
    let mut tree = RTreeGeneric::<f64, u32, S>::with_max_entries(max_entries).unwrap();
    for (i, r) in rects.iter().copied().enumerate() {
        tree.insert(r, i as u32).unwrap();
    }
    tree
}

fn bench_dataset(c: &mut Criterion, name: &str, rects: &[Aabb2D<f64>], windows: &[Aabb2D<f64>]) {
    let mut group = c.benchmark_group(name);
    group.throughput(Throughput::Elements(rects.len() as u64));
    for &m in &[8usize, 16] {
        group.bench_function(format!("rtree_insert_m{}", m), |b| {
            b.iter(|| black_box(build::<Linear>(rects, m).len()));
        });
        group.bench_function(format!("rstar_insert_m{}", m), |b| {
            b.iter(|| black_box(build::<RStar>(rects, m).len()));
        });

        let base: RTreeF64<u32> = build(rects, m);
        let rstar: RStarTreeF64<u32> = build(rects, m);
        group.bench_function(format!("rtree_query_m{}", m), |b| {
            b.iter(|| {
                let visits: usize = windows
                    .iter()
                    .map(|w| base.range_query(*w).unwrap().node_visits)
                    .sum();
                black_box(visits);
            });
        });
        group.bench_function(format!("rstar_query_m{}", m), |b| {
            b.iter(|| {
                let visits: usize = windows
                    .iter()
                    .map(|w| rstar.range_query(*w).unwrap().node_visits)
                    .sum();
                black_box(visits);
            });
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let rects = gen_grid_rects(64, 10.0);
    let windows = gen_windows(256, 640.0, 40.0);
    bench_dataset(c, "grid_64", &rects, &windows);
}

fn bench_random(c: &mut Criterion) {
    let rects = gen_random_rects(4096, 2000.0, 8.0);
    let windows = gen_windows(256, 2000.0, 100.0);
    bench_dataset(c, "random_4096", &rects, &windows);
}

fn bench_clustered(c: &mut Criterion) {
    let rects = gen_clustered_rects(16, 256, 120.0);
    let windows = gen_windows(256, 2000.0, 100.0);
    bench_dataset(c, "clustered_16x256", &rects, &windows);
}

fn bench_insert_batched(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_into_empty");
    let rects = gen_random_rects(1024, 1000.0, 6.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("rstar_m8", |b| {
        b.iter_batched(
            || RStarTreeF64::<u32>::with_max_entries(8).unwrap(),
            |mut tree| {
                for (i, r) in rects.iter().copied().enumerate() {
                    let _ = tree.insert(r, i as u32);
                }
                black_box(tree.height());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_grid,
    bench_random,
    bench_clustered,
    bench_insert_batched
);
criterion_main!(benches);
