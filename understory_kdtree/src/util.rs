// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Point, Rect};

use crate::error::KdTreeError;
use crate::types::{Axis, Side};

pub(crate) fn check_point(pt: Point) -> Result<(), KdTreeError> {
    if pt.x.is_finite() && pt.y.is_finite() {
        Ok(())
    } else {
        Err(KdTreeError::NonFinitePoint)
    }
}

/// Query rectangles may be unbounded, but never NaN or inverted.
pub(crate) fn check_query_rect(rect: Rect) -> Result<(), KdTreeError> {
    if rect.x0.is_nan() || rect.y0.is_nan() || rect.x1.is_nan() || rect.y1.is_nan() {
        return Err(KdTreeError::NonFiniteRect);
    }
    if rect.x0 > rect.x1 || rect.y0 > rect.y1 {
        return Err(KdTreeError::InvertedRect);
    }
    Ok(())
}

pub(crate) fn check_domain(rect: Rect) -> Result<(), KdTreeError> {
    if !(rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite())
    {
        return Err(KdTreeError::NonFiniteRect);
    }
    check_query_rect(rect)
}

/// Boundary-inclusive containment (`Rect::contains` excludes the max edges).
#[inline]
pub(crate) fn contains_inclusive(rect: &Rect, pt: Point) -> bool {
    rect.x0 <= pt.x && pt.x <= rect.x1 && rect.y0 <= pt.y && pt.y <= rect.y1
}

/// Whether two rectangles overlap, counting shared edges and corners.
#[inline]
pub(crate) fn overlaps_inclusive(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Squared distance from `pt` to the nearest point of `rect`; zero inside or on the boundary.
#[inline]
pub(crate) fn distance_squared_to_rect(rect: &Rect, pt: Point) -> f64 {
    let dx = if pt.x < rect.x0 {
        rect.x0 - pt.x
    } else if pt.x > rect.x1 {
        pt.x - rect.x1
    } else {
        0.0
    };
    let dy = if pt.y < rect.y0 {
        rect.y0 - pt.y
    } else if pt.y > rect.y1 {
        pt.y - rect.y1
    } else {
        0.0
    };
    dx * dx + dy * dy
}

/// The part of `rect` on `side` of the line `axis == at`.
#[inline]
pub(crate) fn split_rect(rect: Rect, axis: Axis, at: f64, side: Side) -> Rect {
    match (axis, side) {
        (Axis::Vertical, Side::LeftBottom) => Rect { x1: at, ..rect },
        (Axis::Vertical, Side::RightTop) => Rect { x0: at, ..rect },
        (Axis::Horizontal, Side::LeftBottom) => Rect { y1: at, ..rect },
        (Axis::Horizontal, Side::RightTop) => Rect { y0: at, ..rect },
    }
}

/// The segment a node at `pt` draws across its rectangle.
pub(crate) fn split_line(axis: Axis, pt: Point, rect: Rect) -> Line {
    match axis {
        Axis::Vertical => Line::new((pt.x, rect.y0), (pt.x, rect.y1)),
        Axis::Horizontal => Line::new((rect.x0, pt.y), (rect.x1, pt.y)),
    }
}
