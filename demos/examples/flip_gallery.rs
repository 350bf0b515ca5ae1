// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of one panel as its anchor walks down the viewport.
//!
//! Shows the vertical flip kicking in once the room below drops under the
//! flip threshold.
//!
//! Run:
//! - `cargo run -p tether_demos --example flip_gallery`

use kurbo::Size;
use tether_geometry::{PlacementOrigin, PositionRequest, compute_position, rect_from_tlwh};

fn main() {
    let viewport = Size::new(1024.0, 600.0);
    let panel = rect_from_tlwh(0.0, 0.0, 200.0, 150.0);

    println!("anchor_top  top     side    flip");
    for anchor_top in (400..=560).step_by(20) {
        let anchor = rect_from_tlwh(f64::from(anchor_top), 20.0, 100.0, 30.0);
        let req = PositionRequest::new(
            anchor,
            panel,
            PlacementOrigin::BottomLeft,
            PlacementOrigin::TopLeft,
            viewport,
        );
        match compute_position(&req) {
            Ok(p) => println!(
                "{:<11} {:<7} {:<7} {:?}",
                anchor_top,
                p.top(),
                p.side.name(),
                p.flip
            ),
            Err(e) => println!("{anchor_top:<11} error: {e}"),
        }
    }
}
