// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion strategies for the two tree variants.
//!
//! - `linear`: minimum-enlargement descent at every level and Guttman's linear
//!   split (seeds with the greatest normalized separation, then greedy assignment).
//! - `rstar`: R*-style insertion. Descent just above the leaves breaks
//!   enlargement ties by overlap growth,
//!   a split that picks the axis with the smallest total margin and the
//!   distribution with the least overlap, and forced reinsertion on the first
//!   overflow of each level.
//!
//! Split note
//! ----------
//! The R* split evaluates, for each axis and each of its two sort orders
//! (by lower then upper coordinate, and by upper then lower), every split point
//! `k` in `min..=n - min`. Group rectangles come from prefix/suffix unions so each
//! candidate costs O(1) after an O(n) pass.

pub mod linear;
pub mod rstar;

use crate::types::Aabb2D;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn lo<T: Copy>(self, r: &Aabb2D<T>) -> T {
        match self {
            Self::X => r.min_x,
            Self::Y => r.min_y,
        }
    }

    fn hi<T: Copy>(self, r: &Aabb2D<T>) -> T {
        match self {
            Self::X => r.max_x,
            Self::Y => r.max_y,
        }
    }
}
