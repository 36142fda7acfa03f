// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree: splitting axes, routing sides, and partitions.

use kurbo::{Line, Point, Rect};

/// The coordinate a node compares along, determined by its depth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Compare by x. The splitting line is vertical.
    Vertical,
    /// Compare by y. The splitting line is horizontal.
    Horizontal,
}

impl Axis {
    /// Axis of the root node.
    pub const ROOT: Self = Self::Vertical;

    /// Axis of the level below this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Axis used by nodes at `depth` (the root is depth 0).
    #[inline]
    pub const fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// The coordinate of `pt` along this axis.
    #[inline]
    pub const fn coord(self, pt: Point) -> f64 {
        match self {
            Self::Vertical => pt.x,
            Self::Horizontal => pt.y,
        }
    }
}

/// The child slot of a node that a point routes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Strictly below the split coordinate: left of a vertical line, under a horizontal one.
    LeftBottom,
    /// At or above the split coordinate.
    RightTop,
}

impl Side {
    /// Which side of the splitting line through `split` the point `pt` falls on,
    /// for a node splitting along `axis`.
    ///
    /// Ties go to [`Side::RightTop`]. Insertion, membership tests, and nearest-neighbor
    /// search all route through this predicate, so "near" always means "where an
    /// identical point would have been inserted".
    ///
    /// ```
    /// use kurbo::Point;
    /// use understory_kdtree::{Axis, Side};
    ///
    /// let split = Point::new(0.5, 0.5);
    /// assert_eq!(Side::of(Axis::Vertical, split, Point::new(0.2, 0.9)), Side::LeftBottom);
    /// assert_eq!(Side::of(Axis::Vertical, split, Point::new(0.5, 0.1)), Side::RightTop);
    /// assert_eq!(Side::of(Axis::Horizontal, split, Point::new(0.2, 0.9)), Side::RightTop);
    /// ```
    #[inline]
    pub fn of(axis: Axis, split: Point, pt: Point) -> Self {
        if axis.coord(pt) < axis.coord(split) {
            Self::LeftBottom
        } else {
            Self::RightTop
        }
    }

    /// The other side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::LeftBottom => Self::RightTop,
            Self::RightTop => Self::LeftBottom,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::LeftBottom => 0,
            Self::RightTop => 1,
        }
    }
}

/// Read-only view of a single node and the line it splits its rectangle with.
///
/// Yielded by [`KdTree::partitions`][crate::KdTree::partitions] in pre-order, which is the
/// order a renderer needs to draw the partition lines of the tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Partition {
    /// The point stored at this node.
    pub point: Point,
    /// The axis this node splits along.
    pub axis: Axis,
    /// Depth of the node; the root is 0.
    pub depth: usize,
    /// The rectangle the node was assigned when it was inserted.
    ///
    /// For points inside the tree's domain this is exactly the region the node partitions.
    /// Points outside the domain get clipped (possibly inverted) rectangles, since node
    /// rectangles are never re-bounded after insertion.
    pub rect: Rect,
    /// The splitting segment: vertical through `point.x` spanning the rectangle's height,
    /// or horizontal through `point.y` spanning its width.
    pub line: Line,
}
