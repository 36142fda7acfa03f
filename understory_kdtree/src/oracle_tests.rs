// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized comparison of [`KdTree`] against a linear scan.

use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::{Point, Rect};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::KdTree;

/// Linear-scan reference set.
#[derive(Debug, Default)]
struct LinearSet {
    points: Vec<Point>,
}

impl LinearSet {
    fn insert(&mut self, pt: Point) {
        if !self.points.contains(&pt) {
            self.points.push(pt);
        }
    }

    fn range(&self, rect: Rect) -> HashSet<(u64, u64)> {
        self.points
            .iter()
            .filter(|p| rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1)
            .map(|p| key(*p))
            .collect()
    }

    fn nearest_distance(&self, query: Point) -> Option<f64> {
        self.points
            .iter()
            .map(|p| (*p - query).hypot2())
            .min_by(f64::total_cmp)
    }
}

fn key(pt: Point) -> (u64, u64) {
    (pt.x.to_bits(), pt.y.to_bits())
}

fn key_set(points: &[Point]) -> HashSet<(u64, u64)> {
    points.iter().map(|p| key(*p)).collect()
}

fn build(points: &[Point]) -> (KdTree, LinearSet) {
    let mut tree = KdTree::new();
    let mut linear = LinearSet::default();
    for &pt in points {
        tree.insert(pt).unwrap();
        linear.insert(pt);
    }
    (tree, linear)
}

fn random_points(rng: &mut StdRng, n: usize, lo: f64, hi: f64) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.random_range(lo..hi), rng.random_range(lo..hi)))
        .collect()
}

/// Points on a coarse lattice, so ties on one axis and exact duplicates are common.
fn lattice_points(rng: &mut StdRng, n: usize) -> Vec<Point> {
    (0..n)
        .map(|_| {
            let x = f64::from(rng.random_range(0_u8..=8)) / 8.0;
            let y = f64::from(rng.random_range(0_u8..=8)) / 8.0;
            Point::new(x, y)
        })
        .collect()
}

fn random_rect(rng: &mut StdRng, lo: f64, hi: f64) -> Rect {
    let (a, b) = (rng.random_range(lo..hi), rng.random_range(lo..hi));
    let (c, d) = (rng.random_range(lo..hi), rng.random_range(lo..hi));
    let mut rect = Rect::new(a.min(b), c.min(d), a.max(b), c.max(d));
    // Degenerate rectangles: vertical and horizontal segments.
    match rng.random_range(0_u8..4) {
        0 => rect.x1 = rect.x0,
        1 => rect.y1 = rect.y0,
        _ => {}
    }
    rect
}

#[test]
fn size_counts_distinct_points_in_any_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut points = lattice_points(&mut rng, 300);
    let distinct = key_set(&points).len();

    for _ in 0..5 {
        points.shuffle(&mut rng);
        let tree = KdTree::from_points(points.iter().copied()).unwrap();
        assert_eq!(tree.len(), distinct);
    }
}

#[test]
fn inserted_points_stay_contained() {
    let mut rng = StdRng::seed_from_u64(11);
    let points = lattice_points(&mut rng, 120);
    let mut tree = KdTree::new();
    for (i, &pt) in points.iter().enumerate() {
        tree.insert(pt).unwrap();
        for &prev in &points[..=i] {
            assert!(tree.contains(prev), "lost {prev:?} after inserting {pt:?}");
        }
    }

    let inserted = key_set(&points);
    for probe in lattice_points(&mut rng, 200) {
        assert_eq!(tree.contains(probe), inserted.contains(&key(probe)));
    }
}

#[test]
fn range_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(42);
    for (n, lattice) in [(1, false), (50, false), (600, false), (400, true)] {
        let points = if lattice {
            lattice_points(&mut rng, n)
        } else {
            random_points(&mut rng, n, 0.0, 1.0)
        };
        let (tree, linear) = build(&points);

        for _ in 0..200 {
            let rect = if lattice {
                // Edges on lattice lines exercise the inclusive boundary.
                let a = f64::from(rng.random_range(0_u8..=8)) / 8.0;
                let b = f64::from(rng.random_range(0_u8..=8)) / 8.0;
                let c = f64::from(rng.random_range(0_u8..=8)) / 8.0;
                let d = f64::from(rng.random_range(0_u8..=8)) / 8.0;
                Rect::new(a.min(b), c.min(d), a.max(b), c.max(d))
            } else {
                random_rect(&mut rng, -0.1, 1.1)
            };
            let got = tree.range(rect).unwrap();
            let got_set = key_set(&got);
            assert_eq!(got.len(), got_set.len(), "range reported a duplicate");
            assert_eq!(got_set, linear.range(rect), "range mismatch for {rect:?}");
        }
    }
}

#[test]
fn nearest_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(1234);
    let collinear: Vec<Point> = (0..100)
        .map(|_| Point::new(0.5, rng.random_range(0.0..1.0)))
        .collect();
    let sets = [
        random_points(&mut rng, 1, 0.0, 1.0),
        random_points(&mut rng, 700, 0.0, 1.0),
        lattice_points(&mut rng, 500),
        collinear,
    ];

    for points in &sets {
        let (tree, linear) = build(points);
        for _ in 0..300 {
            let query = Point::new(rng.random_range(-0.5..1.5), rng.random_range(-0.5..1.5));
            let (pt, d2) = tree.nearest_with_distance(query).unwrap().unwrap();
            assert!(tree.contains(pt));
            assert_eq!(d2, (pt - query).hypot2());
            assert_eq!(
                Some(d2),
                linear.nearest_distance(query),
                "nearest mismatch for {query:?}"
            );
        }
        // Querying a stored point finds it at distance zero.
        for &pt in points.iter().take(20) {
            assert_eq!(tree.nearest_with_distance(pt).unwrap(), Some((pt, 0.0)));
        }
    }
}

#[test]
fn points_outside_domain_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(99);
    let points = random_points(&mut rng, 400, -3.0, 4.0);
    let (tree, linear) = build(&points);

    for _ in 0..300 {
        let query = Point::new(rng.random_range(-5.0..6.0), rng.random_range(-5.0..6.0));
        let d2 = tree.nearest_with_distance(query).unwrap().map(|(_, d2)| d2);
        assert_eq!(d2, linear.nearest_distance(query), "nearest mismatch for {query:?}");

        let rect = random_rect(&mut rng, -4.0, 5.0);
        assert_eq!(key_set(&tree.range(rect).unwrap()), linear.range(rect));
    }
}

#[test]
fn custom_domain_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(5);
    let points = random_points(&mut rng, 300, 0.0, 640.0);
    let mut tree = KdTree::with_domain(Rect::new(0.0, 0.0, 640.0, 640.0)).unwrap();
    let mut linear = LinearSet::default();
    for &pt in &points {
        tree.insert(pt).unwrap();
        linear.insert(pt);
    }

    for part in tree.partitions() {
        assert!(part.rect.x0 <= part.point.x && part.point.x <= part.rect.x1);
        assert!(part.rect.y0 <= part.point.y && part.point.y <= part.rect.y1);
    }
    for _ in 0..200 {
        let query = Point::new(rng.random_range(0.0..640.0), rng.random_range(0.0..640.0));
        let d2 = tree.nearest_with_distance(query).unwrap().map(|(_, d2)| d2);
        assert_eq!(d2, linear.nearest_distance(query));
    }
}

#[test]
fn duplicate_inserts_change_nothing() {
    let mut rng = StdRng::seed_from_u64(2024);
    let points = lattice_points(&mut rng, 200);

    let once = KdTree::from_points(points.iter().copied()).unwrap();
    let mut twice = KdTree::new();
    for &pt in &points {
        twice.insert(pt).unwrap();
        assert_eq!(twice.insert(pt), Ok(false));
    }

    assert_eq!(once.len(), twice.len());
    assert_eq!(
        once.partitions().collect::<Vec<_>>(),
        twice.partitions().collect::<Vec<_>>()
    );
    for _ in 0..100 {
        let query = Point::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0));
        assert_eq!(once.nearest(query), twice.nearest(query));
        let rect = random_rect(&mut rng, 0.0, 1.0);
        assert_eq!(once.range(rect), twice.range(rect));
    }
}

#[test]
fn nearest_is_deterministic_on_ties() {
    let mut rng = StdRng::seed_from_u64(3);
    let points = lattice_points(&mut rng, 150);
    let a = KdTree::from_points(points.iter().copied()).unwrap();
    let b = KdTree::from_points(points.iter().copied()).unwrap();

    // Queries halfway between lattice lines sit at equal distance from several points.
    for i in 0..16 {
        for j in 0..16 {
            let query = Point::new(f64::from(i) / 16.0, f64::from(j) / 16.0);
            assert_eq!(a.nearest(query), b.nearest(query));
            assert_eq!(a.nearest(query), a.nearest(query));
        }
    }
}
