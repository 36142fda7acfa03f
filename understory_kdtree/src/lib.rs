// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_kdtree --heading-base-level=0

//! Understory KdTree: a planar 2-d tree over [`kurbo`] points.
//!
//! Understory KdTree stores a set of distinct points and answers two queries:
//!
//! - Range search: every stored point inside an axis-aligned rectangle, boundary included.
//! - Nearest neighbor: the stored point closest to a query point.
//!
//! Each node splits the plane along x (even depths) or y (odd depths) through its point and
//! remembers the rectangle it is responsible for. Queries skip any subtree whose rectangle
//! cannot hold an answer. Nearest-neighbor search explores the side of each split that holds
//! the query first, so a good candidate is found early and the far side is usually pruned.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_kdtree::KdTree;
//!
//! let mut tree = KdTree::new();
//! tree.insert(Point::new(0.5, 0.5)).unwrap();
//! tree.insert(Point::new(0.25, 0.25)).unwrap();
//! tree.insert(Point::new(0.75, 0.75)).unwrap();
//!
//! // Inserting a point twice is a no-op.
//! assert_eq!(tree.insert(Point::new(0.25, 0.25)), Ok(false));
//! assert_eq!(tree.len(), 3);
//!
//! let nearest = tree.nearest(Point::new(0.26, 0.24)).unwrap();
//! assert_eq!(nearest, Some(Point::new(0.25, 0.25)));
//!
//! let mut hits = tree.range(Rect::new(0.0, 0.0, 0.6, 0.6)).unwrap();
//! hits.sort_by(|a, b| a.x.total_cmp(&b.x));
//! assert_eq!(hits, [Point::new(0.25, 0.25), Point::new(0.5, 0.5)]);
//! ```
//!
//! ## Domain
//!
//! The root node is responsible for the unit square by default; use [`KdTree::with_domain`]
//! for other coordinate spaces. Points outside the domain are accepted and queried correctly.
//! Only their node rectangles, as reported by [`KdTree::partitions`], are clipped.
//!
//! ## Drawing the partition
//!
//! [`KdTree::partitions`] walks the tree read-only and yields each node's point, axis,
//! rectangle, and splitting [`kurbo::Line`], which is what a renderer needs to draw the
//! partition lines.
//!
//! ## Limits
//!
//! There is no removal and no rebalancing. Sorted insertion order degrades the tree to a
//! list and every operation to linear time, but never to incorrect results.
//!
//! ### Float semantics
//!
//! Coordinates must be finite. Point equality is exact, with no epsilon.
//! Invalid arguments are rejected with [`KdTreeError`] before the tree is touched.
//!
//! ## Features
//!
//! - `std` *(default)*: enables `kurbo/std`.
//! - `libm`: enables `kurbo/libm` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod tree;
mod types;
mod util;

#[cfg(test)]
mod oracle_tests;

pub use error::KdTreeError;
pub use tree::KdTree;
pub use types::{Axis, Partition, Side};

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect};

    #[test]
    fn insert_visit_and_partition() {
        let mut tree = KdTree::default();
        assert_eq!(tree.insert(Point::new(0.4, 0.6)), Ok(true));
        assert_eq!(tree.insert(Point::new(0.4, 0.6)), Ok(false));
        assert_eq!(tree.len(), 1);

        let mut seen = 0;
        tree.visit_range(Rect::new(0.4, 0.6, 0.4, 0.6), |_| seen += 1)
            .unwrap();
        assert_eq!(seen, 1, "zero-area query on the point itself is inclusive");

        let p = tree.partitions().next().expect("one node");
        assert_eq!(p.axis, Axis::ROOT);
        assert_eq!(p.rect, KdTree::UNIT_SQUARE);
    }

    #[test]
    fn errors_display() {
        use alloc::string::ToString;
        assert_eq!(
            KdTreeError::NonFinitePoint.to_string(),
            "point coordinates must be finite"
        );
        assert_eq!(
            KdTreeError::InvertedRect.to_string(),
            "rectangle minimum exceeds its maximum"
        );
    }
}
