// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Termination and budget properties of the placement engine.

use kurbo::Rect;
use perch_geometry::{
    Dimensions, Direction, Document, ElementNode, Offset, Placement, RectSnapshot, Viewport,
};
use perch_placement::{
    DEFAULT_MAX_ATTEMPTS, Engine, EngineOptions, Offsets, PlacementRequest, Positioner,
    RetryState, Terminal,
};
use proptest::prelude::*;

fn request(element: RectSnapshot, anchor: RectSnapshot, placement: Placement) -> PlacementRequest {
    let viewport = RectSnapshot::new(0.0, 0.0, 800.0, 600.0);
    PlacementRequest {
        element: Dimensions {
            element,
            parent: viewport,
            viewport,
        },
        anchor,
        placement,
        offsets: Offsets::default(),
        boundary: None,
        direction: Direction::Ltr,
    }
}

#[test]
fn all_colliding_stops_after_four_attempts() {
    let element = RectSnapshot::new(0.0, 0.0, 600.0, 50.0);
    let anchor = RectSnapshot::new(300.0, 200.0, 200.0, 30.0);
    for start in [Placement::Unset, Placement::Top, Placement::Left, Placement::Right] {
        let mut state = RetryState::default();
        let res = Engine::default().resolve_with(&request(element, anchor, start), &mut state);
        assert_eq!(res.terminal, Terminal::Overflow, "{start:?}");
        assert_eq!(res.attempts, 4, "{start:?}");
        assert_eq!(state.attempts_remaining(), 0);
        assert_eq!(state.tried().len(), 4);
        // A later re-placement sees the applied full-width element and has no budget:
        // it goes straight back to the fallback.
        let applied = RectSnapshot {
            width: res.width.unwrap(),
            offset: res.offset,
            ..element
        };
        let again =
            Engine::default().resolve_with(&request(applied, anchor, res.placement), &mut state);
        assert_eq!(again.terminal, Terminal::Overflow);
        assert_eq!(again.attempts, 0);
    }
}

#[test]
fn replacing_after_overflow_stays_inside_viewport() {
    // With a horizontal gap the applied width is narrower than the viewport, so the
    // oversized check no longer fires on the second pass.
    let mut doc = Document::new(Viewport::new(800.0, 600.0));
    let root = doc.root();
    let panel = doc.insert(Some(root), ElementNode::new(Rect::new(0.0, 0.0, 500.0, 100.0)));
    let button = doc.insert(
        Some(root),
        ElementNode::new(Rect::new(350.0, 100.0, 450.0, 130.0)),
    );
    let mut pos = Positioner::new(Placement::Unset, EngineOptions::dropdown())
        .with_offsets(Offsets::new(0.0, 8.0));
    pos.open();

    let first = pos.position(&mut doc, panel, button, None).unwrap();
    assert_eq!(first.terminal, Terminal::Overflow);
    assert_eq!(first.width, Some(784.0));
    assert_eq!(pos.retry_state().attempts_remaining(), 0);

    for _ in 0..3 {
        let again = pos.position(&mut doc, panel, button, None).unwrap();
        assert_eq!(again.terminal, Terminal::Overflow);
        assert_eq!(again.attempts, 0);
        assert_eq!(again.offset, Offset::new(130.0, 8.0));
        let placed = doc.snapshot(panel).unwrap().element;
        assert!(placed.offset.left >= 0.0);
        assert!(placed.right() <= 800.0, "right edge {}", placed.right());
    }
}

#[test]
fn final_placement_matches_table_walk() {
    let element = RectSnapshot::new(0.0, 0.0, 600.0, 50.0);
    let anchor = RectSnapshot::new(300.0, 200.0, 200.0, 30.0);
    let expected = [
        (Placement::Unset, Placement::Unset),
        (Placement::Top, Placement::Unset),
        (Placement::Left, Placement::Unset),
        (Placement::Right, Placement::Unset),
        (Placement::Bottom, Placement::Right),
        (Placement::RightBottom, Placement::Right),
    ];
    for (start, attached) in expected {
        let res = Engine::default().resolve(&request(element, anchor, start));
        assert_eq!(res.placement, attached, "{start:?}");
    }
}

fn snapshot() -> impl Strategy<Value = RectSnapshot> {
    (-200.0..1000.0f64, -200.0..800.0f64, 0.0..1000.0f64, 0.0..800.0f64)
        .prop_map(|(l, t, w, h)| RectSnapshot::new(l, t, w, h))
}

proptest! {
    #[test]
    fn always_terminates_within_budget(
        element in snapshot(),
        anchor in snapshot(),
        idx in 0..Placement::ALL.len(),
        budget in 0u8..8,
        tooltip in any::<bool>(),
    ) {
        let options = if tooltip { EngineOptions::tooltip() } else { EngineOptions::dropdown() };
        let engine = Engine::new(options.with_max_attempts(budget));
        let res = engine.resolve(&request(element, anchor, Placement::ALL[idx]));
        prop_assert!(res.attempts <= budget);
        if res.terminal == Terminal::Overflow {
            prop_assert!(res.width.is_some());
        } else {
            prop_assert!(res.width.is_none());
        }
        // Whatever the budget, the result fits the viewport horizontally.
        let placed = RectSnapshot {
            width: res.width.unwrap_or(element.width),
            offset: res.offset,
            ..element
        };
        if res.terminal == Terminal::Overflow {
            prop_assert!(placed.offset.left >= 0.0);
            prop_assert!(placed.right() <= 800.0);
        }
    }

    #[test]
    fn default_budget_is_four(element in snapshot(), anchor in snapshot()) {
        let res = Engine::default().resolve(&request(element, anchor, Placement::Unset));
        prop_assert!(res.attempts <= DEFAULT_MAX_ATTEMPTS);
        prop_assert!(matches!(res.terminal, Terminal::Clear | Terminal::Overflow));
    }
}
