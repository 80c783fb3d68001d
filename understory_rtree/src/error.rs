// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by geometry construction, configuration, insertion, and queries.

use thiserror::Error;

/// Errors returned by the tree and its configuration.
///
/// Rejections always happen before any mutation, so a failed call leaves the
/// tree exactly as it was.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A rectangle whose min corner exceeds its max corner on some axis.
    #[error("invalid geometry: min corner exceeds max corner")]
    InvalidGeometry,

    /// Node capacity below the supported minimum of 4.
    #[error("invalid capacity {0}: max_entries must be at least 4")]
    InvalidCapacity(usize),

    /// Forced-reinsertion share outside `1..=100` percent.
    #[error("invalid reinsert percentage {0}: expected 1..=100")]
    InvalidReinsertPercent(u8),
}
