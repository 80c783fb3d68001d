// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena node model.
//!
//! Nodes own their entries; child nodes are referenced by arena index. The
//! parent link is an index too and is only followed upward, never used to
//! decide lifetimes.

use alloc::vec::Vec;

use crate::types::{Aabb2D, Scalar, center_distance_sq, cmp_partial, union_aabb};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Child<P> {
    Node(NodeIdx),
    Item(P),
}

/// A rectangle plus what it bounds. For `Child::Node` the rectangle mirrors the
/// child's cached bounding box exactly.
#[derive(Clone, Debug)]
pub(crate) struct Entry<T, P> {
    pub(crate) bbox: Aabb2D<T>,
    pub(crate) child: Child<P>,
}

impl<T, P> Entry<T, P> {
    pub(crate) const fn item(bbox: Aabb2D<T>, payload: P) -> Self {
        Self {
            bbox,
            child: Child::Item(payload),
        }
    }

    pub(crate) const fn node(bbox: Aabb2D<T>, idx: NodeIdx) -> Self {
        Self {
            bbox,
            child: Child::Node(idx),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T, P> {
    /// Union of `entries`; meaningless while the node is empty.
    pub(crate) bbox: Aabb2D<T>,
    /// Height above the leaves; leaves are level 0.
    pub(crate) level: usize,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) entries: Vec<Entry<T, P>>,
}

impl<T: Scalar, P> Node<T, P> {
    pub(crate) fn new(level: usize, parent: Option<NodeIdx>, entries: Vec<Entry<T, P>>) -> Self {
        let bbox = bbox_of(&entries);
        Self {
            bbox,
            level,
            parent,
            entries,
        }
    }

    pub(crate) fn empty_leaf() -> Self {
        Self::new(0, None, Vec::new())
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.level == 0
    }

    pub(crate) fn bounding_rectangle(&self) -> Option<Aabb2D<T>> {
        (!self.entries.is_empty()).then_some(self.bbox)
    }

    /// Recompute the cached rectangle from the entries.
    pub(crate) fn refresh_bbox(&mut self) -> Aabb2D<T> {
        self.bbox = bbox_of(&self.entries);
        self.bbox
    }

    /// Append an entry, growing the cached rectangle.
    pub(crate) fn push(&mut self, entry: Entry<T, P>) {
        self.bbox = if self.entries.is_empty() {
            entry.bbox
        } else {
            union_aabb(self.bbox, entry.bbox)
        };
        self.entries.push(entry);
    }

    /// Remove the `count` entries whose centers lie farthest from the node's
    /// center, farthest first. Equal distances keep entry order.
    pub(crate) fn take_farthest(&mut self, count: usize) -> Vec<Entry<T, P>> {
        let center = self.refresh_bbox();
        let mut ranked: Vec<(T::Acc, Entry<T, P>)> = core::mem::take(&mut self.entries)
            .into_iter()
            .map(|e| (center_distance_sq(&e.bbox, &center), e))
            .collect();
        ranked.sort_by(|a, b| cmp_partial(&b.0, &a.0));
        let kept = ranked.split_off(count.min(ranked.len()));
        self.entries = kept.into_iter().map(|(_, e)| e).collect();
        self.refresh_bbox();
        ranked.into_iter().map(|(_, e)| e).collect()
    }
}

pub(crate) fn bbox_of<T: Scalar, P>(entries: &[Entry<T, P>]) -> Aabb2D<T> {
    let mut it = entries.iter();
    let first = match it.next() {
        Some(e) => e.bbox,
        None => Aabb2D::new(T::zero(), T::zero(), T::zero(), T::zero()),
    };
    it.fold(first, |acc, e| union_aabb(acc, e.bbox))
}
