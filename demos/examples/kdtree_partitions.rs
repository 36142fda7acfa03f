// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Print the splitting lines a renderer would draw, then run a range query.
//!
//! Run:
//! - `cargo run -p understory_demos --example kdtree_partitions`
//! - `cargo run -p understory_demos --example kdtree_partitions -- points.txt`

use std::error::Error;

use kurbo::Rect;
use understory_demos::{CIRCLE10, load_tree};
use understory_kdtree::Axis;

fn main() -> Result<(), Box<dyn Error>> {
    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => CIRCLE10.to_owned(),
    };
    let tree = load_tree(&input)?;

    // Vertical splits are conventionally drawn red, horizontal ones blue.
    for part in tree.partitions() {
        let color = match part.axis {
            Axis::Vertical => "red",
            Axis::Horizontal => "blue",
        };
        println!(
            "{:indent$}{:?} {color:<4} ({:.3}, {:.3}) -> ({:.3}, {:.3})",
            "",
            part.point,
            part.line.p0.x,
            part.line.p0.y,
            part.line.p1.x,
            part.line.p1.y,
            indent = part.depth * 2,
        );
    }

    let query = Rect::new(0.0, 0.0, 0.5, 0.5);
    let hits = tree.range(query)?;
    println!("{} point(s) in {query:?}:", hits.len());
    for pt in hits {
        println!("  {pt:?}");
    }
    Ok(())
}
