// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strategy trait: the pieces of insertion that differ between tree variants.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::{Aabb2D, Scalar, area, enlargement};

/// A child considered during descent: its rectangle and how many entries it holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Candidate<T> {
    /// Bounding rectangle of the child node.
    pub bbox: Aabb2D<T>,
    /// Number of entries stored in the child node.
    pub len: usize,
}

/// A partition of an overflowing node's entries, as indices into the input slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Split {
    /// Entries kept by the overflowing node.
    pub left: Vec<usize>,
    /// Entries moved to the new sibling.
    pub right: Vec<usize>,
}

/// Insertion policy plugged into [`RTreeGeneric`](crate::RTreeGeneric).
///
/// Everything else (descent, upward adjustment, root promotion, queries) is
/// shared between strategies.
pub trait Strategy: Debug {
    /// Whether the first overflow at a non-root level removes and reinserts
    /// entries instead of splitting.
    const FORCED_REINSERT: bool;

    /// Pick the child (index into `children`) that should receive `bbox`.
    ///
    /// `children_are_leaves` is true when descending the level directly above
    /// the leaves.
    fn choose_subtree<T: Scalar>(
        children: &[Candidate<T>],
        bbox: &Aabb2D<T>,
        children_are_leaves: bool,
    ) -> usize;

    /// Partition `rects` into two groups of at least `min_entries` each.
    fn split<T: Scalar>(rects: &[Aabb2D<T>], min_entries: usize) -> Split;
}

/// Least enlargement, then smallest area, then fewest entries; first wins on a full tie.
pub(crate) fn least_enlargement<T: Scalar>(children: &[Candidate<T>], bbox: &Aabb2D<T>) -> usize {
    let mut best_idx = 0_usize;
    let mut best_key: Option<(T::Acc, T::Acc, usize)> = None;
    for (i, c) in children.iter().enumerate() {
        let key = (enlargement(&c.bbox, bbox), area(&c.bbox), c.len);
        if best_key.map(|bk| key < bk).unwrap_or(true) {
            best_key = Some(key);
            best_idx = i;
        }
    }
    best_idx
}
