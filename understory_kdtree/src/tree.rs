// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena storage, insertion, and queries.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::error::KdTreeError;
use crate::types::{Axis, Partition, Side};
use crate::util::{
    check_domain, check_point, check_query_rect, contains_inclusive, distance_squared_to_rect,
    overlaps_inclusive, split_line, split_rect,
};

/// Inline capacity of the traversal stacks; deeper (degenerate) trees spill to the heap.
const STACK_INLINE: usize = 32;

#[derive(Clone, Debug)]
struct Node {
    point: Point,
    rect: Rect,
    /// Child slots, indexed by [`Side::index`].
    children: [Option<u32>; 2],
}

impl Node {
    #[inline]
    fn child(&self, side: Side) -> Option<usize> {
        self.children[side.index()].map(|c| c as usize)
    }
}

/// A pending subtree in a query traversal, with the region guaranteed to contain all of its points.
#[derive(Copy, Clone, Debug)]
struct Pending {
    slot: usize,
    axis: Axis,
    region: Rect,
}

/// A 2-d tree over [`kurbo::Point`]s.
///
/// Each node stores one distinct point and splits the plane with a vertical
/// (even depths) or horizontal (odd depths) line through it. Points strictly
/// below the split coordinate go left/bottom; everything else goes right/top.
///
/// Nodes live in a flat arena and reference their children by slot. There is
/// no removal and no rebalancing, so inserting sorted input produces a
/// degenerate tree with linear query cost. Queries use explicit stacks and
/// stay correct on such trees.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use understory_kdtree::KdTree;
///
/// let mut tree = KdTree::new();
/// for (x, y) in [(0.5, 0.5), (0.25, 0.25), (0.75, 0.75)] {
///     tree.insert(Point::new(x, y)).unwrap();
/// }
///
/// assert!(tree.contains(Point::new(0.25, 0.25)));
/// assert_eq!(
///     tree.nearest(Point::new(0.26, 0.24)).unwrap(),
///     Some(Point::new(0.25, 0.25))
/// );
///
/// let hits = tree.range(Rect::new(0.0, 0.0, 0.6, 0.6)).unwrap();
/// assert_eq!(hits.len(), 2);
/// ```
#[derive(Clone)]
pub struct KdTree {
    /// Slot 0 is the root when non-empty.
    nodes: Vec<Node>,
    domain: Rect,
    /// Bounding box of every stored point.
    bounds: Option<Rect>,
}

impl fmt::Debug for KdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("len", &self.len())
            .field("height", &self.height())
            .field("domain", &self.domain)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl KdTree {
    /// The default domain: the unit square `[0, 1] × [0, 1]`.
    pub const UNIT_SQUARE: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    /// Create an empty tree over the unit square.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            domain: Self::UNIT_SQUARE,
            bounds: None,
        }
    }

    /// Create an empty tree over the unit square with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Create an empty tree whose root is responsible for `domain`.
    ///
    /// The domain only seeds the node rectangles; points outside it are still accepted.
    ///
    /// # Errors
    ///
    /// Returns [`KdTreeError::NonFiniteRect`] or [`KdTreeError::InvertedRect`] if `domain`
    /// is not a finite, well-ordered rectangle.
    pub fn with_domain(domain: Rect) -> Result<Self, KdTreeError> {
        check_domain(domain)?;
        Ok(Self {
            domain,
            ..Self::new()
        })
    }

    /// Build a unit-square tree from a sequence of points.
    ///
    /// # Errors
    ///
    /// Returns [`KdTreeError::NonFinitePoint`] on the first point with a non-finite coordinate.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Result<Self, KdTreeError> {
        let mut tree = Self::new();
        tree.insert_all(points)?;
        Ok(tree)
    }

    /// Reserve space for at least `additional` more points.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Remove every point, keeping the domain.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.bounds = None;
    }

    /// The rectangle assigned to the root node.
    pub fn domain(&self) -> Rect {
        self.domain
    }

    /// Number of distinct points stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounding box of all stored points, or `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Number of levels in the tree; 0 when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        self.walk(|_, depth| height = height.max(depth + 1));
        height
    }

    /// Stored points in insertion order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(|n| n.point)
    }

    /// Add `pt` unless a point with identical coordinates is already present.
    ///
    /// Returns `Ok(true)` if a node was added and `Ok(false)` for a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`KdTreeError::NonFinitePoint`] without modifying the tree if either
    /// coordinate is NaN or infinite.
    pub fn insert(&mut self, pt: Point) -> Result<bool, KdTreeError> {
        check_point(pt)?;
        if self.nodes.is_empty() {
            self.push_node(pt, self.domain);
            return Ok(true);
        }

        let mut slot = 0;
        let mut axis = Axis::ROOT;
        loop {
            let node = &self.nodes[slot];
            // An identical point follows the same path, so it is always met on the way down.
            if node.point == pt {
                return Ok(false);
            }
            let side = Side::of(axis, node.point, pt);
            match node.child(side) {
                Some(child) => {
                    slot = child;
                    axis = axis.next();
                }
                None => {
                    let rect = split_rect(node.rect, axis, axis.coord(node.point), side);
                    let child = self.push_node(pt, rect);
                    self.nodes[slot].children[side.index()] = Some(child);
                    return Ok(true);
                }
            }
        }
    }

    /// Insert every point in order, returning how many were new.
    ///
    /// # Errors
    ///
    /// Stops at the first non-finite point with [`KdTreeError::NonFinitePoint`]. Points
    /// before it remain inserted.
    pub fn insert_all<I: IntoIterator<Item = Point>>(
        &mut self,
        points: I,
    ) -> Result<usize, KdTreeError> {
        let mut added = 0;
        for pt in points {
            if self.insert(pt)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Whether a point with exactly these coordinates is stored.
    ///
    /// A point with a non-finite coordinate is never stored, so it yields `false`.
    pub fn contains(&self, pt: Point) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let mut slot = 0;
        let mut axis = Axis::ROOT;
        loop {
            let node = &self.nodes[slot];
            if node.point == pt {
                return true;
            }
            match node.child(Side::of(axis, node.point, pt)) {
                Some(child) => {
                    slot = child;
                    axis = axis.next();
                }
                None => return false,
            }
        }
    }

    /// All stored points inside `rect`, boundary included. Order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`KdTreeError::InvertedRect`] or [`KdTreeError::NonFiniteRect`] for a
    /// malformed rectangle. Infinite bounds are fine.
    pub fn range(&self, rect: Rect) -> Result<Vec<Point>, KdTreeError> {
        let mut out = Vec::new();
        self.visit_range(rect, |pt| out.push(pt))?;
        Ok(out)
    }

    /// Visit stored points inside `rect`, boundary included (does not allocate result storage).
    ///
    /// Subtrees whose region does not touch `rect` are skipped entirely.
    ///
    /// # Errors
    ///
    /// Same as [`KdTree::range`]; `f` is not called when the rectangle is rejected.
    pub fn visit_range<F: FnMut(Point)>(&self, rect: Rect, mut f: F) -> Result<(), KdTreeError> {
        check_query_rect(rect)?;
        if self.nodes.is_empty() {
            return Ok(());
        }

        let mut stack: SmallVec<[Pending; STACK_INLINE]> = SmallVec::new();
        stack.push(self.root_pending());
        while let Some(Pending { slot, axis, region }) = stack.pop() {
            if !overlaps_inclusive(&region, &rect) {
                continue;
            }
            let node = &self.nodes[slot];
            if contains_inclusive(&rect, node.point) {
                f(node.point);
            }
            let at = axis.coord(node.point);
            for side in [Side::RightTop, Side::LeftBottom] {
                if let Some(child) = node.child(side) {
                    stack.push(Pending {
                        slot: child,
                        axis: axis.next(),
                        region: split_rect(region, axis, at, side),
                    });
                }
            }
        }
        Ok(())
    }

    /// The stored point closest to `query`, or `None` when the tree is empty.
    ///
    /// When several points are equally close, the one found first wins; for a given
    /// insertion order the result is deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`KdTreeError::NonFinitePoint`] if `query` has a non-finite coordinate.
    pub fn nearest(&self, query: Point) -> Result<Option<Point>, KdTreeError> {
        Ok(self.nearest_with_distance(query)?.map(|(pt, _)| pt))
    }

    /// Like [`KdTree::nearest`], also returning the squared distance to `query`.
    ///
    /// # Errors
    ///
    /// Returns [`KdTreeError::NonFinitePoint`] if `query` has a non-finite coordinate.
    pub fn nearest_with_distance(
        &self,
        query: Point,
    ) -> Result<Option<(Point, f64)>, KdTreeError> {
        check_point(query)?;
        let Some(root) = self.nodes.first() else {
            return Ok(None);
        };

        let mut best = root.point;
        let mut best_d2 = (root.point - query).hypot2();

        let mut stack: SmallVec<[Pending; STACK_INLINE]> = SmallVec::new();
        stack.push(self.root_pending());
        while let Some(Pending { slot, axis, region }) = stack.pop() {
            // Tested on pop, so a far subtree is judged against the best point found in
            // the whole near subtree explored before it.
            if distance_squared_to_rect(&region, query) >= best_d2 {
                continue;
            }
            let node = &self.nodes[slot];
            let d2 = (node.point - query).hypot2();
            if d2 < best_d2 {
                best = node.point;
                best_d2 = d2;
            }

            let near = Side::of(axis, node.point, query);
            let at = axis.coord(node.point);
            // Far is pushed first so near is popped first.
            for side in [near.opposite(), near] {
                if let Some(child) = node.child(side) {
                    stack.push(Pending {
                        slot: child,
                        axis: axis.next(),
                        region: split_rect(region, axis, at, side),
                    });
                }
            }
        }
        Ok(Some((best, best_d2)))
    }

    /// All nodes in pre-order (left/bottom before right/top) with their splitting lines.
    pub fn partitions(&self) -> impl Iterator<Item = Partition> + '_ {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.visit_partitions(|p| out.push(p));
        out.into_iter()
    }

    /// Visit all nodes in pre-order with their splitting lines (does not allocate result storage).
    pub fn visit_partitions<F: FnMut(Partition)>(&self, mut f: F) {
        self.walk(|slot, depth| {
            let node = &self.nodes[slot];
            let axis = Axis::at_depth(depth);
            f(Partition {
                point: node.point,
                axis,
                depth,
                rect: node.rect,
                line: split_line(axis, node.point, node.rect),
            });
        });
    }

    /// Pre-order walk calling `f(slot, depth)`.
    fn walk<F: FnMut(usize, usize)>(&self, mut f: F) {
        if self.nodes.is_empty() {
            return;
        }
        let mut stack: SmallVec<[(usize, usize); STACK_INLINE]> = SmallVec::new();
        stack.push((0, 0));
        while let Some((slot, depth)) = stack.pop() {
            f(slot, depth);
            let node = &self.nodes[slot];
            for side in [Side::RightTop, Side::LeftBottom] {
                if let Some(child) = node.child(side) {
                    stack.push((child, depth + 1));
                }
            }
        }
    }

    /// Root of a query traversal.
    ///
    /// The search region starts as the domain widened by the stored points' bounding box.
    /// Splitting it top-down gives each subtree a region that really contains all of its
    /// points, even those outside the domain. When every point lies in the domain, each
    /// region is exactly the node's own rectangle.
    fn root_pending(&self) -> Pending {
        let region = match self.bounds {
            Some(b) => self.domain.union(b),
            None => self.domain,
        };
        Pending {
            slot: 0,
            axis: Axis::ROOT,
            region,
        }
    }

    fn push_node(&mut self, point: Point, rect: Rect) -> u32 {
        debug_assert!(
            self.nodes.len() < u32::MAX as usize,
            "kd-tree slots are 32-bit"
        );
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Node slots are 32-bit; the debug assertion above guards the range."
        )]
        let slot = self.nodes.len() as u32;
        self.nodes.push(Node {
            point,
            rect,
            children: [None, None],
        });
        self.bounds = Some(match self.bounds {
            Some(b) => b.union_pt(point),
            None => Rect::from_points(point, point),
        });
        slot
    }
}
