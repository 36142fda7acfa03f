// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-neighbor queries against a loaded point set, checked against a linear scan.
//!
//! Run:
//! - `cargo run -p understory_demos --example kdtree_nearest`
//! - `cargo run -p understory_demos --example kdtree_nearest -- points.txt`

use std::error::Error;

use kurbo::Point;
use understory_demos::{CIRCLE10, linear_nearest, load_tree, parse_points};

fn main() -> Result<(), Box<dyn Error>> {
    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => CIRCLE10.to_owned(),
    };
    let points = parse_points(&input)?;
    let tree = load_tree(&input)?;
    println!("loaded {} points ({} distinct)", points.len(), tree.len());
    println!("{tree:?}");

    for query in [(0.25, 0.0), (0.5, 0.5), (0.9, 0.2), (1.5, -0.5)] {
        let query = Point::from(query);
        let Some((nearest, d2)) = tree.nearest_with_distance(query)? else {
            println!("{query:?}: empty tree");
            continue;
        };
        let scan = linear_nearest(&points, query);
        println!(
            "{query:?}: kd-tree {nearest:?} (d = {:.6}), linear scan {scan:?}",
            d2.sqrt()
        );
    }
    Ok(())
}
