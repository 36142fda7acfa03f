// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Invalid arguments rejected by [`KdTree`][crate::KdTree] before any mutation or traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum KdTreeError {
    /// A point had a NaN or infinite coordinate.
    NonFinitePoint,
    /// A rectangle had `x0 > x1` or `y0 > y1`.
    InvertedRect,
    /// A query rectangle had a NaN bound, or a domain rectangle had a non-finite bound.
    NonFiniteRect,
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinitePoint => f.write_str("point coordinates must be finite"),
            Self::InvertedRect => f.write_str("rectangle minimum exceeds its maximum"),
            Self::NonFiniteRect => f.write_str("rectangle has a non-finite bound"),
        }
    }
}

impl core::error::Error for KdTreeError {}
