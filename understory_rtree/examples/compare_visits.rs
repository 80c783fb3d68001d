// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a baseline R-tree and an R*-tree over the same clustered data and compare
//! how many nodes their window queries visit.
//!
//! Run with `RUST_LOG=debug` to see root splits as they happen.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_rtree::{Aabb2D, QueryResult, RStarTreeF64, RTreeF64};

const CLUSTERS: usize = 8;
const PER_CLUSTER: usize = 500;
const QUERIES: usize = 200;
const MAX_ENTRIES: usize = 16;

fn clustered(rng: &mut StdRng) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(CLUSTERS * PER_CLUSTER);
    for _ in 0..CLUSTERS {
        let (cx, cy): (f64, f64) = (rng.random(), rng.random());
        for _ in 0..PER_CLUSTER {
            let dx = (rng.random::<f64>() + rng.random::<f64>() + rng.random::<f64>() - 1.5) * 0.1;
            let dy = (rng.random::<f64>() + rng.random::<f64>() + rng.random::<f64>() - 1.5) * 0.1;
            let x = (cx + dx).clamp(0.0, 1.0);
            let y = (cy + dy).clamp(0.0, 1.0);
            out.push(Aabb2D::<f64>::from_xywh(x, y, 0.005, 0.005));
        }
    }
    out
}

fn mean_visits(results: &[QueryResult<usize>]) -> f64 {
    let total: usize = results.iter().map(|r| r.node_visits).sum();
    total as f64 / results.len() as f64
}

fn main() -> Result<(), understory_rtree::Error> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let rects = clustered(&mut rng);

    let mut base = RTreeF64::<usize>::with_max_entries(MAX_ENTRIES)?;
    let mut rstar = RStarTreeF64::<usize>::with_max_entries(MAX_ENTRIES)?;
    for (i, r) in rects.iter().copied().enumerate() {
        base.insert(r, i)?;
        rstar.insert(r, i)?;
    }

    let windows: Vec<Aabb2D<f64>> = (0..QUERIES)
        .map(|_| {
            let x = rng.random_range(0.0..0.95);
            let y = rng.random_range(0.0..0.95);
            Aabb2D::<f64>::from_xywh(x, y, 0.05, 0.05)
        })
        .collect();

    let base_results = windows
        .iter()
        .map(|w| base.range_query(*w))
        .collect::<Result<Vec<_>, _>>()?;
    let rstar_results = windows
        .iter()
        .map(|w| rstar.range_query(*w))
        .collect::<Result<Vec<_>, _>>()?;

    println!("{} rectangles, max {MAX_ENTRIES} entries per node", rects.len());
    println!(
        "R-tree : height {}, {} nodes, {:.2} mean visits",
        base.height(),
        base.node_count(),
        mean_visits(&base_results)
    );
    println!(
        "R*-tree: height {}, {} nodes, {:.2} mean visits",
        rstar.height(),
        rstar.node_count(),
        mean_visits(&rstar_results)
    );
    Ok(())
}
