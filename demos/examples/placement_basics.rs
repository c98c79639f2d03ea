// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement basics: offsets per placement, collisions, and fallbacks.
//!
//! This example prints the offset every placement computes for one anchor, then
//! resolves a few requests near the viewport edges to show the fallback walk.
//!
//! Run:
//! - `cargo run -p perch_demos --example placement_basics`

use perch_geometry::{
    Axes, Dimensions, Direction, Placement, RectSnapshot, compute_offset, is_clear,
};
use perch_placement::{Engine, EngineOptions, Offsets, PlacementRequest};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let viewport = RectSnapshot::new(0.0, 0.0, 800.0, 600.0);
    let element = RectSnapshot::new(0.0, 0.0, 160.0, 90.0);
    let dims = Dimensions {
        element,
        parent: viewport,
        viewport,
    };
    let anchor = RectSnapshot::new(320.0, 240.0, 120.0, 32.0);

    println!(
        "anchor at ({}, {}) {}x{}",
        anchor.offset.left, anchor.offset.top, anchor.width, anchor.height
    );
    println!("{:<14} {:>8} {:>8}  clear", "placement", "left", "top");
    for placement in Placement::ALL {
        let off = compute_offset(&dims, &anchor, placement, 4.0, 0.0, false, Direction::Ltr);
        let clear = is_clear(&dims.moved_to(off), None, Axes::All);
        println!(
            "{:<14} {:>8.1} {:>8.1}  {clear}",
            placement, off.left, off.top
        );
    }

    // RTL mirrors the horizontal anchor point for top and the default placement.
    let rtl = compute_offset(&dims, &anchor, Placement::Top, 0.0, 0.0, false, Direction::Rtl);
    println!("\nrtl top: left = {}", rtl.left);

    let engine = Engine::new(EngineOptions::dropdown());
    let cases = [
        ("roomy", RectSnapshot::new(100.0, 100.0, 80.0, 30.0), Placement::Unset),
        ("right edge", RectSnapshot::new(700.0, 100.0, 80.0, 30.0), Placement::Bottom),
        ("left edge", RectSnapshot::new(10.0, 100.0, 40.0, 30.0), Placement::Left),
        ("cramped", RectSnapshot::new(0.0, 0.0, 800.0, 30.0), Placement::Right),
    ];
    println!();
    for (name, anchor, placement) in cases {
        let res = engine.resolve(&PlacementRequest {
            element: dims,
            anchor,
            placement,
            offsets: Offsets::default(),
            boundary: None,
            direction: Direction::Ltr,
        });
        println!(
            "{name:<11} asked {placement:<13} got {:<13} after {} attempts -> {:?} at ({:.1}, {:.1}){}",
            res.placement,
            res.attempts,
            res.terminal,
            res.offset.left,
            res.offset.top,
            res.width.map(|w| format!(" width {w}")).unwrap_or_default(),
        );
    }

    // Tooltips test every side and use centered placements.
    let tooltip = Engine::new(EngineOptions::tooltip());
    let res = tooltip.resolve(&PlacementRequest {
        element: dims,
        anchor: RectSnapshot::new(360.0, 10.0, 80.0, 20.0),
        placement: Placement::Top,
        offsets: Offsets::default(),
        boundary: None,
        direction: Direction::Ltr,
    });
    println!("\ntooltip near top edge -> {} ({:?})", res.placement, res.terminal);
}
