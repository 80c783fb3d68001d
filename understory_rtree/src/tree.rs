// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree skeleton shared by every strategy: descent, overflow handling,
//! upward adjustment, and range queries.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

use crate::error::Error;
use crate::node::{Child, Entry, Node, NodeIdx};
use crate::params::Params;
use crate::strategies::linear::Linear;
use crate::strategies::rstar::RStar;
use crate::strategy::{Candidate, Strategy};
use crate::types::{Aabb2D, Scalar};

/// Payloads matched by a range query, with the number of nodes examined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResult<P> {
    /// Matching payloads, in no particular order.
    pub hits: Vec<P>,
    /// Nodes examined during the descent. The root always counts, so this is at least 1.
    pub node_visits: usize,
}

/// Dynamic R-tree parameterized by an insertion [`Strategy`].
///
/// Nodes live in an arena and refer to each other by index. The tree owns every
/// node; parent links are indices used only to walk upward after an insertion.
pub struct RTreeGeneric<T: Scalar, P: Copy + Debug, S: Strategy> {
    params: Params,
    root: NodeIdx,
    arena: Vec<Node<T, P>>,
    len: usize,
    _strategy: PhantomData<S>,
}

impl<T: Scalar, P: Copy + Debug, S: Strategy> Default for RTreeGeneric<T, P, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, P: Copy + Debug, S: Strategy> RTreeGeneric<T, P, S> {
    /// Create an empty tree with the default capacity of 8 entries per node.
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Create an empty tree with the given parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            params,
            root: NodeIdx::new(0),
            arena: vec![Node::empty_leaf()],
            len: 0,
            _strategy: PhantomData,
        }
    }

    /// Create an empty tree holding at most `max_entries` entries per node.
    pub fn with_max_entries(max_entries: usize) -> Result<Self, Error> {
        Ok(Self::with_params(Params::new(max_entries)?))
    }

    /// The parameters this tree was built with.
    pub fn params(&self) -> Params {
        self.params
    }

    /// Number of stored rectangles.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels; 1 while the root is a leaf.
    pub fn height(&self) -> usize {
        self.node(self.root).level + 1
    }

    /// Number of allocated nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Bounding rectangle of everything stored, or `None` for an empty tree.
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        self.node(self.root).bounding_rectangle()
    }

    /// Rectangles of the root's entries.
    pub fn root_children(&self) -> impl Iterator<Item = Aabb2D<T>> + '_ {
        self.node(self.root).entries.iter().map(|e| e.bbox)
    }

    /// Insert a rectangle with its payload.
    ///
    /// Duplicate payloads and identical rectangles are stored as separate entries.
    /// An invalid rectangle is rejected before the tree is touched.
    pub fn insert(&mut self, bbox: Aabb2D<T>, payload: P) -> Result<(), Error> {
        bbox.validate()?;
        let mut reinserted = Vec::new();
        self.insert_entry(Entry::item(bbox, payload), 0, &mut reinserted);
        self.len += 1;
        Ok(())
    }

    /// Collect payloads whose rectangle intersects `query` (touching counts).
    pub fn range_query(&self, query: Aabb2D<T>) -> Result<QueryResult<P>, Error> {
        query.validate()?;
        Ok(self.search(&query))
    }

    /// Collect payloads whose rectangle contains the point.
    pub fn query_point(&self, x: T, y: T) -> QueryResult<P> {
        self.search(&Aabb2D::point(x, y))
    }

    fn search(&self, query: &Aabb2D<T>) -> QueryResult<P> {
        let mut hits = Vec::new();
        let mut node_visits = 0_usize;
        let mut stack = vec![self.root];
        while let Some(i) = stack.pop() {
            node_visits += 1;
            for e in &self.node(i).entries {
                if !e.bbox.intersects(query) {
                    continue;
                }
                match e.child {
                    Child::Item(p) => hits.push(p),
                    Child::Node(c) => stack.push(c),
                }
            }
        }
        QueryResult { hits, node_visits }
    }

    fn node(&self, idx: NodeIdx) -> &Node<T, P> {
        &self.arena[idx.get()]
    }

    fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<T, P> {
        &mut self.arena[idx.get()]
    }

    fn child_len(&self, child: &Child<P>) -> usize {
        match child {
            Child::Node(i) => self.node(*i).entries.len(),
            Child::Item(_) => 0,
        }
    }

    /// Place `entry` in a node at `level` (0 for payloads) and resolve any overflow.
    fn insert_entry(&mut self, entry: Entry<T, P>, level: usize, reinserted: &mut Vec<bool>) {
        let target = self.choose_node(&entry.bbox, level);
        debug_assert!(level > 0 || self.node(target).is_leaf(), "payloads go into leaves");
        if let Child::Node(child) = &entry.child {
            let child = *child;
            self.node_mut(child).parent = Some(target);
        }
        self.node_mut(target).push(entry);
        self.handle_overflow(target, reinserted);
    }

    /// Descend from the root to the node at `level` best suited to hold `bbox`.
    fn choose_node(&self, bbox: &Aabb2D<T>, level: usize) -> NodeIdx {
        let mut current = self.root;
        let mut candidates: Vec<Candidate<T>> = Vec::with_capacity(self.params.max_entries() + 1);
        loop {
            let node = self.node(current);
            if node.level <= level {
                return current;
            }
            candidates.clear();
            candidates.extend(node.entries.iter().map(|e| Candidate {
                bbox: e.bbox,
                len: self.child_len(&e.child),
            }));
            let pick = S::choose_subtree(&candidates, bbox, node.level == 1);
            match node.entries.get(pick).map(|e| &e.child) {
                Some(Child::Node(next)) => current = *next,
                // Internal nodes only hold child links.
                _ => return current,
            }
        }
    }

    fn handle_overflow(&mut self, idx: NodeIdx, reinserted: &mut Vec<bool>) {
        let mut current = idx;
        loop {
            if self.node(current).entries.len() <= self.params.max_entries() {
                self.adjust_upward(current);
                return;
            }
            let level = self.node(current).level;
            if S::FORCED_REINSERT && current != self.root && first_overflow(reinserted, level) {
                self.forced_reinsert(current, level, reinserted);
                return;
            }
            match self.split(current) {
                Some(parent) => current = parent,
                None => return,
            }
        }
    }

    /// Remove the entries farthest from the node's center and insert them again
    /// from the root at the same level.
    fn forced_reinsert(&mut self, idx: NodeIdx, level: usize, reinserted: &mut Vec<bool>) {
        let count = self.params.reinsert_count();
        let removed = self.node_mut(idx).take_farthest(count);
        self.adjust_upward(idx);
        log::trace!("forced reinsertion of {count} entries at level {level}");
        for entry in removed {
            self.insert_entry(entry, level, reinserted);
        }
    }

    /// Split an overflowing node in place and hang the new sibling under the parent.
    ///
    /// Returns the parent to re-check, or `None` when a new root was grown.
    fn split(&mut self, idx: NodeIdx) -> Option<NodeIdx> {
        let entries = core::mem::take(&mut self.node_mut(idx).entries);
        let rects: Vec<Aabb2D<T>> = entries.iter().map(|e| e.bbox).collect();
        let split = S::split(&rects, self.params.min_entries());
        debug_assert_eq!(
            split.left.len() + split.right.len(),
            entries.len(),
            "split must partition the entries"
        );
        let mut slots: Vec<Option<Entry<T, P>>> = entries.into_iter().map(Some).collect();
        let left: Vec<Entry<T, P>> = split.left.iter().filter_map(|&i| slots[i].take()).collect();
        let right: Vec<Entry<T, P>> = split.right.iter().filter_map(|&i| slots[i].take()).collect();

        let level = self.node(idx).level;
        let parent = self.node(idx).parent;
        let sibling = NodeIdx::new(self.arena.len());
        for e in &right {
            if let Child::Node(c) = &e.child {
                let c = *c;
                self.node_mut(c).parent = Some(sibling);
            }
        }
        let left_len = left.len();
        let left_bbox = {
            let node = self.node_mut(idx);
            node.entries = left;
            node.refresh_bbox()
        };
        let right_node = Node::new(level, parent, right);
        let right_bbox = right_node.bbox;
        log::trace!(
            "split at level {level}: {left_len} / {} entries",
            right_node.entries.len()
        );
        self.arena.push(right_node);

        match parent {
            Some(p) => {
                self.refresh_entry(p, idx, left_bbox);
                self.node_mut(p).push(Entry::node(right_bbox, sibling));
                Some(p)
            }
            None => {
                let root = NodeIdx::new(self.arena.len());
                self.arena.push(Node::new(
                    level + 1,
                    None,
                    vec![Entry::node(left_bbox, idx), Entry::node(right_bbox, sibling)],
                ));
                self.node_mut(idx).parent = Some(root);
                self.node_mut(sibling).parent = Some(root);
                self.root = root;
                log::debug!("root split, height now {}", self.height());
                None
            }
        }
    }

    /// Recompute `idx`'s rectangle from its entries and propagate it to the root.
    fn adjust_upward(&mut self, idx: NodeIdx) {
        let mut current = idx;
        loop {
            let bbox = self.node_mut(current).refresh_bbox();
            let Some(parent) = self.node(current).parent else {
                return;
            };
            self.refresh_entry(parent, current, bbox);
            current = parent;
        }
    }

    fn refresh_entry(&mut self, parent: NodeIdx, child: NodeIdx, bbox: Aabb2D<T>) {
        if let Some(e) = self
            .node_mut(parent)
            .entries
            .iter_mut()
            .find(|e| matches!(e.child, Child::Node(c) if c == child))
        {
            e.bbox = bbox;
        }
    }
}

/// Mark `level` as reinserted for the current insertion; false if it already was.
fn first_overflow(reinserted: &mut Vec<bool>, level: usize) -> bool {
    if reinserted.len() <= level {
        reinserted.resize(level + 1, false);
    }
    !core::mem::replace(&mut reinserted[level], true)
}

impl<T: Scalar, P: Copy + Debug, S: Strategy> Debug for RTreeGeneric<T, P, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTreeGeneric")
            .field("max_entries", &self.params.max_entries())
            .field("min_entries", &self.params.min_entries())
            .field("len", &self.len)
            .field("height", &self.height())
            .field("arena_nodes", &self.arena.len())
            .finish_non_exhaustive()
    }
}

/// Baseline R-tree: minimum-enlargement descent and linear split.
pub type RTree<T, P> = RTreeGeneric<T, P, Linear>;

/// R*-tree: overlap-aware descent, margin/overlap split, and forced reinsertion.
pub type RStarTree<T, P> = RTreeGeneric<T, P, RStar>;

/// R-tree with i64 coordinates and i128 metrics.
pub type RTreeI64<P> = RTree<i64, P>;

/// R-tree with f32 coordinates and f64 metrics.
pub type RTreeF32<P> = RTree<f32, P>;

/// R-tree with f64 coordinates and f64 metrics.
pub type RTreeF64<P> = RTree<f64, P>;

/// R*-tree with i64 coordinates and i128 metrics.
pub type RStarTreeI64<P> = RStarTree<i64, P>;

/// R*-tree with f32 coordinates and f64 metrics.
pub type RStarTreeF32<P> = RStarTree<f32, P>;

/// R*-tree with f64 coordinates and f64 metrics.
pub type RStarTreeF64<P> = RStarTree<f64, P>;
