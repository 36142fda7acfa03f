// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators for the `understory_kdtree` demos.
//!
//! - [`parse_points`] reads whitespace-separated `x y` coordinate lists.
//! - [`load_tree`] feeds a parsed list into a [`KdTree`].
//! - [`linear_nearest`] is the brute-force scan the demos print next to the tree's answer.
//!
//! Run:
//! - `cargo run -p understory_demos --example kdtree_nearest [points.txt]`
//! - `cargo run -p understory_demos --example kdtree_partitions [points.txt]`

use core::fmt;
use std::error::Error;

use kurbo::Point;
use understory_kdtree::{KdTree, KdTreeError};

/// Ten points on a circle inscribed in the unit square.
pub const CIRCLE10: &str = "\
0.206107 0.095492
0.975528 0.654508
0.024472 0.345492
0.793893 0.095492
0.793893 0.904508
0.975528 0.345492
0.206107 0.904508
0.500000 0.000000
0.024472 0.654508
0.500000 1.000000
";

/// Failure to read a coordinate list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A token was not a number.
    InvalidNumber {
        /// The offending token.
        token: String,
        /// Zero-based position of the token among all tokens.
        index: usize,
    },
    /// The list ended with an x coordinate and no y.
    OddCoordinateCount {
        /// Number of coordinates read.
        count: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { token, index } => {
                write!(f, "token {index} ({token:?}) is not a number")
            }
            Self::OddCoordinateCount { count } => {
                write!(f, "expected x y pairs, found {count} coordinates")
            }
        }
    }
}

impl Error for ParseError {}

/// Failure to build a tree from a coordinate list.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadError {
    /// The text could not be parsed.
    Parse(ParseError),
    /// The tree rejected a point.
    Tree(KdTreeError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Tree(e) => write!(f, "invalid point: {e}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Tree(e) => Some(e),
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<KdTreeError> for LoadError {
    fn from(e: KdTreeError) -> Self {
        Self::Tree(e)
    }
}

/// Parse whitespace-separated `x y` pairs. Line breaks carry no meaning.
pub fn parse_points(input: &str) -> Result<Vec<Point>, ParseError> {
    let mut coords = Vec::new();
    for (index, token) in input.split_whitespace().enumerate() {
        let value: f64 = token.parse().map_err(|_| ParseError::InvalidNumber {
            token: token.to_owned(),
            index,
        })?;
        coords.push(value);
    }
    if coords.len() % 2 != 0 {
        return Err(ParseError::OddCoordinateCount {
            count: coords.len(),
        });
    }
    Ok(coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect())
}

/// Parse a coordinate list and insert every point into a unit-square tree.
pub fn load_tree(input: &str) -> Result<KdTree, LoadError> {
    let points = parse_points(input)?;
    Ok(KdTree::from_points(points)?)
}

/// The first point at minimum distance from `query`, by linear scan.
pub fn linear_nearest(points: &[Point], query: Point) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for &pt in points {
        let d2 = (pt - query).hypot2();
        if best.is_none_or(|(_, b)| d2 < b) {
            best = Some((pt, d2));
        }
    }
    best.map(|(pt, _)| pt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_across_lines() {
        let pts = parse_points("0.5 0.5\n0.25\t0.25   0.75\n0.75\n").unwrap();
        assert_eq!(
            pts,
            vec![
                Point::new(0.5, 0.5),
                Point::new(0.25, 0.25),
                Point::new(0.75, 0.75)
            ]
        );
        assert_eq!(parse_points("").unwrap(), vec![]);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_points("0.1 0.2 zero 0.4"),
            Err(ParseError::InvalidNumber {
                token: "zero".to_owned(),
                index: 2
            })
        );
        assert_eq!(
            parse_points("0.1 0.2 0.3"),
            Err(ParseError::OddCoordinateCount { count: 3 })
        );
        assert_eq!(
            load_tree("0.1 NaN").unwrap_err(),
            LoadError::Tree(KdTreeError::NonFinitePoint)
        );
    }

    #[test]
    fn sample_loads_and_agrees_with_linear_scan() {
        let points = parse_points(CIRCLE10).unwrap();
        let tree = load_tree(CIRCLE10).unwrap();
        assert_eq!(tree.len(), 10);
        for query in [(0.81, 0.3), (0.0, 0.0), (0.5, 0.5), (0.2, 0.9)] {
            let query = Point::from(query);
            let from_tree = tree.nearest(query).unwrap().expect("tree is not empty");
            let from_scan = linear_nearest(&points, query).expect("sample is not empty");
            assert_eq!((from_tree - query).hypot2(), (from_scan - query).hypot2());
        }
    }
}
