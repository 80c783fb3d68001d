// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Baseline strategy: least-enlargement descent and linear-cost split.

use alloc::vec::Vec;

use crate::strategy::{Candidate, Split, Strategy, least_enlargement};
use crate::types::{Aabb2D, Scalar, area, enlargement, union_aabb};

use super::Axis;

/// Classic R-tree insertion: minimum enlargement at every level, linear split,
/// no forced reinsertion.
#[derive(Copy, Clone, Debug, Default)]
pub struct Linear;

impl Strategy for Linear {
    const FORCED_REINSERT: bool = false;

    fn choose_subtree<T: Scalar>(
        children: &[Candidate<T>],
        bbox: &Aabb2D<T>,
        _children_are_leaves: bool,
    ) -> usize {
        least_enlargement(children, bbox)
    }

    fn split<T: Scalar>(rects: &[Aabb2D<T>], min_entries: usize) -> Split {
        debug_assert!(rects.len() >= 2 * min_entries, "split requires overflow");
        let (s1, s2) = pick_seeds(rects);
        let mut left = Vec::with_capacity(rects.len());
        let mut right = Vec::with_capacity(rects.len());
        left.push(s1);
        right.push(s2);
        let mut lb = rects[s1];
        let mut rb = rects[s2];

        let rest: Vec<usize> = (0..rects.len()).filter(|&i| i != s1 && i != s2).collect();
        for (pos, &i) in rest.iter().enumerate() {
            let remaining = rest.len() - pos;
            // One group needs everything left to reach the minimum fill.
            if left.len() + remaining <= min_entries {
                left.extend_from_slice(&rest[pos..]);
                break;
            }
            if right.len() + remaining <= min_entries {
                right.extend_from_slice(&rest[pos..]);
                break;
            }
            let r = &rects[i];
            let key_l = (enlargement(&lb, r), area(&union_aabb(lb, *r)), left.len());
            let key_r = (enlargement(&rb, r), area(&union_aabb(rb, *r)), right.len());
            if key_l <= key_r {
                left.push(i);
                lb = union_aabb(lb, *r);
            } else {
                right.push(i);
                rb = union_aabb(rb, *r);
            }
        }
        Split { left, right }
    }
}

/// Seeds with the greatest separation along either axis, normalized by the
/// extent of all rectangles on that axis.
fn pick_seeds<T: Scalar>(rects: &[Aabb2D<T>]) -> (usize, usize) {
    let mut best: Option<(T::Acc, T::Acc, usize, usize)> = None;
    for axis in [Axis::X, Axis::Y] {
        let (mut sep, mut width, a, b) = axis_seeds(rects, axis);
        // No spread on this axis: count it as zero separation.
        if width <= T::acc_from_usize(0) {
            sep = T::acc_from_usize(0);
            width = T::acc_from_usize(1);
        }
        // sep / width > best_sep / best_width, without dividing.
        let better = match best {
            None => true,
            Some((bs, bw, _, _)) => sep * bw > bs * width,
        };
        if better {
            best = Some((sep, width, a, b));
        }
    }
    match best {
        Some((_, _, a, b)) => (a, b),
        None => (0, 1),
    }
}

fn axis_seeds<T: Scalar>(rects: &[Aabb2D<T>], axis: Axis) -> (T::Acc, T::Acc, usize, usize) {
    let mut highest_low = 0_usize;
    let mut lowest_high = 0_usize;
    let mut min_low = axis.lo(&rects[0]);
    let mut max_high = axis.hi(&rects[0]);
    for (i, r) in rects.iter().enumerate().skip(1) {
        if axis.lo(r) > axis.lo(&rects[highest_low]) {
            highest_low = i;
        }
        if axis.hi(r) < axis.hi(&rects[lowest_high]) {
            lowest_high = i;
        }
        if axis.lo(r) < min_low {
            min_low = axis.lo(r);
        }
        if axis.hi(r) > max_high {
            max_high = axis.hi(r);
        }
    }
    if highest_low == lowest_high {
        // Same rectangle on both ends: take the next lowest high side instead.
        lowest_high = if highest_low == 0 { 1 } else { 0 };
        for (i, r) in rects.iter().enumerate() {
            if i != highest_low && axis.hi(r) < axis.hi(&rects[lowest_high]) {
                lowest_high = i;
            }
        }
    }
    let sep = T::widen(axis.lo(&rects[highest_low])) - T::widen(axis.hi(&rects[lowest_high]));
    let width = T::widen(T::max_zero(T::sub(max_high, min_low)));
    (sep, width, highest_low, lowest_high)
}
