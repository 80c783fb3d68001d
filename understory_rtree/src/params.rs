// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node capacity and reinsertion settings, fixed when a tree is built.

use crate::error::Error;

/// Capacity configuration for a tree.
///
/// `min_entries` is derived as `ceil(max_entries / 2)`, which guarantees that an
/// overflowing node (`max_entries + 1` entries) can always be split into two
/// groups of at least `min_entries`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Params {
    max_entries: usize,
    min_entries: usize,
    reinsert_percent: u8,
}

impl Params {
    /// Smallest accepted `max_entries`.
    pub const MIN_CAPACITY: usize = 4;

    /// Default share of an overflowing node that forced reinsertion removes.
    pub const DEFAULT_REINSERT_PERCENT: u8 = 30;

    /// Parameters for nodes holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Result<Self, Error> {
        if max_entries < Self::MIN_CAPACITY {
            return Err(Error::InvalidCapacity(max_entries));
        }
        Ok(Self {
            max_entries,
            min_entries: max_entries.div_ceil(2),
            reinsert_percent: Self::DEFAULT_REINSERT_PERCENT,
        })
    }

    /// Override the forced-reinsertion share (`1..=100`).
    ///
    /// Only trees whose strategy reinserts consult this value.
    pub fn with_reinsert_percent(self, percent: u8) -> Result<Self, Error> {
        if !(1..=100).contains(&percent) {
            return Err(Error::InvalidReinsertPercent(percent));
        }
        Ok(Self {
            reinsert_percent: percent,
            ..self
        })
    }

    /// Maximum entries per node.
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Minimum entries per non-root node.
    pub const fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// Configured forced-reinsertion share in percent.
    pub const fn reinsert_percent(&self) -> u8 {
        self.reinsert_percent
    }

    /// Number of entries removed from an overflowing node by forced reinsertion.
    ///
    /// Rounded half up, at least one, and never so many that the node would
    /// fall below `min_entries`.
    pub fn reinsert_count(&self) -> usize {
        let overflowing = self.max_entries + 1;
        let rounded = (overflowing * usize::from(self.reinsert_percent) * 2 + 100) / 200;
        rounded.clamp(1, overflowing - self.min_entries)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_entries: 8,
            min_entries: 4,
            reinsert_percent: Self::DEFAULT_REINSERT_PERCENT,
        }
    }
}
