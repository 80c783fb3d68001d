// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree --heading-base-level=0

//! Understory R-tree: a dynamic 2D R-tree in two flavors that can be compared
//! head to head.
//!
//! - [`RTree`]: the baseline tree. Minimum-enlargement descent and a linear-cost split.
//! - [`RStarTree`]: the R*-tree. Overlap-aware tie-breaking during descent, a split that
//!   minimizes margin and then overlap, and forced reinsertion on the first overflow
//!   of each level during an insertion.
//!
//! Both share one skeleton, [`RTreeGeneric`], parameterized by an insertion
//! [`Strategy`]. Every range query reports how many nodes it examined, which is the
//! number to watch when comparing the two.
//!
//! The tree is generic over the scalar type `T` and computes areas, margins, and
//! distances in a widened accumulator (f32→f64, f64→f64, i64→i128).
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::{Aabb2D, RStarTree, RTree};
//!
//! let mut base: RTree<f64, u32> = RTree::with_max_entries(4).unwrap();
//! let mut rstar: RStarTree<f64, u32> = RStarTree::with_max_entries(4).unwrap();
//! for i in 0..100_u32 {
//!     let x = f64::from(i % 10);
//!     let y = f64::from(i / 10);
//!     let r = Aabb2D::new(x, y, x + 0.5, y + 0.5);
//!     base.insert(r, i).unwrap();
//!     rstar.insert(r, i).unwrap();
//! }
//!
//! let window = Aabb2D::new(2.0, 2.0, 3.0, 3.0);
//! let a = base.range_query(window).unwrap();
//! let b = rstar.range_query(window).unwrap();
//! assert_eq!(a.hits.len(), b.hits.len());
//! assert!(a.node_visits >= 1 && b.node_visits >= 1);
//! ```
//!
//! Invalid input is rejected without touching the tree:
//!
//! ```rust
//! use understory_rtree::{Aabb2D, Error, RTree};
//!
//! let mut tree: RTree<i64, u8> = RTree::new();
//! assert_eq!(tree.insert(Aabb2D::new(5, 5, 1, 1), 0), Err(Error::InvalidGeometry));
//! assert!(tree.is_empty());
//! assert_eq!(RTree::<i64, u8>::with_max_entries(3).unwrap_err(), Error::InvalidCapacity(3));
//! ```
//!
//! ## Semantics
//!
//! - Rectangles are closed: touching edges and corners count as intersecting.
//! - The tree is a multiset. Identical rectangles and duplicate payloads are kept
//!   as separate entries and each is reported.
//! - Deletion and bulk loading are not provided.
//!
//! ### Float semantics
//!
//! NaN coordinates fail validation and are rejected with [`Error::InvalidGeometry`].

#![no_std]

extern crate alloc;

pub mod error;
mod node;
pub mod params;
pub mod strategies;
pub mod strategy;
pub mod tree;
pub mod types;

pub use error::Error;
pub use params::Params;
pub use strategies::linear::Linear;
pub use strategies::rstar::RStar;
pub use strategy::{Candidate, Split, Strategy};
pub use tree::{
    QueryResult, RStarTree, RStarTreeF32, RStarTreeF64, RStarTreeI64, RTree, RTreeF32, RTreeF64,
    RTreeGeneric, RTreeI64,
};
pub use types::{Aabb2D, Scalar, ScalarAcc, area, enlargement, margin, overlap};
