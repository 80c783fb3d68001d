// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enhanced strategy: overlap-aware descent, margin/overlap split, forced reinsertion.

use alloc::vec::Vec;

use crate::strategy::{Candidate, Split, Strategy, least_enlargement};
use crate::types::{Aabb2D, Scalar, area, cmp_partial, enlargement, margin, overlap, union_aabb};

use super::Axis;

/// R*-tree insertion policy.
#[derive(Copy, Clone, Debug, Default)]
pub struct RStar;

impl Strategy for RStar {
    const FORCED_REINSERT: bool = true;

    fn choose_subtree<T: Scalar>(
        children: &[Candidate<T>],
        bbox: &Aabb2D<T>,
        children_are_leaves: bool,
    ) -> usize {
        if !children_are_leaves {
            return least_enlargement(children, bbox);
        }
        let mut best_idx = 0_usize;
        // Enlargement decides; overlap growth only separates children tied on it.
        let mut best_key: Option<(T::Acc, T::Acc, T::Acc, usize)> = None;
        for (i, c) in children.iter().enumerate() {
            let key = (
                enlargement(&c.bbox, bbox),
                overlap_increase(children, i, bbox),
                area(&c.bbox),
                c.len,
            );
            if best_key.map(|bk| key < bk).unwrap_or(true) {
                best_key = Some(key);
                best_idx = i;
            }
        }
        best_idx
    }

    fn split<T: Scalar>(rects: &[Aabb2D<T>], min_entries: usize) -> Split {
        let n = rects.len();
        debug_assert!(n >= 2 * min_entries, "split requires overflow");

        let mut axis = Axis::X;
        let mut best_margin: Option<T::Acc> = None;
        for candidate in [Axis::X, Axis::Y] {
            let mut total = T::acc_from_usize(0);
            for order in sort_orders(rects, candidate) {
                let (prefix, suffix) = prefix_suffix(rects, &order);
                for k in min_entries..=(n - min_entries) {
                    total = total + margin(&prefix[k - 1]) + margin(&suffix[k]);
                }
            }
            if best_margin.map(|bm| total < bm).unwrap_or(true) {
                best_margin = Some(total);
                axis = candidate;
            }
        }

        let mut best: Option<((T::Acc, T::Acc), Vec<usize>, usize)> = None;
        for order in sort_orders(rects, axis) {
            let (prefix, suffix) = prefix_suffix(rects, &order);
            for k in min_entries..=(n - min_entries) {
                let lb = &prefix[k - 1];
                let rb = &suffix[k];
                let key = (overlap(lb, rb), area(lb) + area(rb));
                if best.as_ref().map(|(bk, _, _)| key < *bk).unwrap_or(true) {
                    best = Some((key, order.clone(), k));
                }
            }
        }
        match best {
            Some((_, order, k)) => Split {
                left: order[..k].to_vec(),
                right: order[k..].to_vec(),
            },
            // Unreachable for n >= 2 * min_entries; keep a valid halving anyway.
            None => Split {
                left: (0..n / 2).collect(),
                right: (n / 2..n).collect(),
            },
        }
    }
}

/// How much the overlap between child `i` and its siblings grows if `i` absorbs `bbox`.
fn overlap_increase<T: Scalar>(children: &[Candidate<T>], i: usize, bbox: &Aabb2D<T>) -> T::Acc {
    let current = children[i].bbox;
    let grown = union_aabb(current, *bbox);
    let mut before = T::acc_from_usize(0);
    let mut after = T::acc_from_usize(0);
    for (j, other) in children.iter().enumerate() {
        if j == i {
            continue;
        }
        before = before + overlap(&current, &other.bbox);
        after = after + overlap(&grown, &other.bbox);
    }
    after - before
}

/// Entry indices sorted by (lower, upper) and by (upper, lower) along `axis`.
fn sort_orders<T: Scalar>(rects: &[Aabb2D<T>], axis: Axis) -> [Vec<usize>; 2] {
    let mut by_lower: Vec<usize> = (0..rects.len()).collect();
    by_lower.sort_by(|&a, &b| {
        cmp_partial(&axis.lo(&rects[a]), &axis.lo(&rects[b]))
            .then_with(|| cmp_partial(&axis.hi(&rects[a]), &axis.hi(&rects[b])))
    });
    let mut by_upper: Vec<usize> = (0..rects.len()).collect();
    by_upper.sort_by(|&a, &b| {
        cmp_partial(&axis.hi(&rects[a]), &axis.hi(&rects[b]))
            .then_with(|| cmp_partial(&axis.lo(&rects[a]), &axis.lo(&rects[b])))
    });
    [by_lower, by_upper]
}

/// Precompute prefix and suffix bounding boxes of `order` so every split point
/// is evaluated in O(1).
fn prefix_suffix<T: Scalar>(
    rects: &[Aabb2D<T>],
    order: &[usize],
) -> (Vec<Aabb2D<T>>, Vec<Aabb2D<T>>) {
    let mut prefix: Vec<Aabb2D<T>> = Vec::with_capacity(order.len());
    let mut acc: Option<Aabb2D<T>> = None;
    for &i in order {
        let next = acc.map_or(rects[i], |a| union_aabb(a, rects[i]));
        prefix.push(next);
        acc = Some(next);
    }
    let mut suffix: Vec<Aabb2D<T>> = Vec::with_capacity(order.len());
    acc = None;
    for &i in order.iter().rev() {
        let next = acc.map_or(rects[i], |a| union_aabb(rects[i], a));
        suffix.push(next);
        acc = Some(next);
    }
    suffix.reverse();
    (prefix, suffix)
}
