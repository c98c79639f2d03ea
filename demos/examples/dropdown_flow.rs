// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown lifecycle: open, re-place on resize and mutation, close.
//!
//! This example wires a `Positioner` per dropdown to a shared `Broadcaster`, the way a
//! widget layer would: each delivery re-runs placement for its recipient, and opening
//! one dropdown closes the others in its group.
//!
//! Run:
//! - `cargo run -p perch_demos --example dropdown_flow`

use std::collections::HashMap;

use kurbo::{Rect, Size};
use perch_broadcast::adapters::document::viewport_event;
use perch_broadcast::{
    Broadcaster, Change, Delivery, EventKind, ExclusiveGroups, ManualHost, MutationRecord,
};
use perch_geometry::{Document, ElementId, ElementNode, Placement, Viewport};
use perch_placement::{EngineOptions, Offsets, Positioner};

struct Dropdown {
    name: &'static str,
    anchor: ElementId,
    panel: ElementId,
    positioner: Positioner,
    open: bool,
}

fn place(doc: &mut Document, dd: &mut Dropdown) {
    match dd.positioner.position(doc, dd.panel, dd.anchor, None) {
        Ok(res) => println!(
            "  {:<8} -> {:<13} {:?} at ({:.0}, {:.0}){}",
            dd.name,
            res.placement,
            res.terminal,
            res.offset.left,
            res.offset.top,
            res.width.map(|w| format!(" width {w}")).unwrap_or_default(),
        ),
        Err(err) => println!("  {:<8} cannot be placed: {err}", dd.name),
    }
}

fn dispatch(
    doc: &mut Document,
    dropdowns: &mut HashMap<ElementId, Dropdown>,
    out: Vec<Delivery<ElementId>>,
) {
    for d in out {
        if let Some(dd) = dropdowns.get_mut(&d.element)
            && dd.open
        {
            println!("  {} <- {}", dd.name, d.notification.kind().notification_name());
            place(doc, dd);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut doc = Document::new(Viewport::new(1024.0, 768.0));
    let root = doc.root();
    let toolbar = doc.insert(
        Some(root),
        ElementNode::new(Rect::new(0.0, 0.0, 1024.0, 48.0)),
    );

    let mut host = ManualHost::new();
    let mut bc = Broadcaster::default();
    let mut groups = ExclusiveGroups::new();
    let mut dropdowns = HashMap::new();

    for (name, x, placement) in [
        ("file", 8.0, Placement::Unset),
        ("account", 930.0, Placement::Bottom),
    ] {
        let anchor = doc.insert(
            Some(toolbar),
            ElementNode::new(Rect::new(x, 8.0, x + 80.0, 40.0)),
        );
        let panel = doc.insert(
            Some(root),
            ElementNode::new(Rect::new(0.0, 0.0, 220.0, 300.0)),
        );
        let positioner =
            Positioner::new(placement, EngineOptions::dropdown()).with_offsets(Offsets {
                vertical: 4.0,
                horizontal: 0.0,
            });
        // Panels follow the viewport and their own content.
        bc.register(&mut host, EventKind::Resize, panel);
        bc.register(&mut host, EventKind::Mutate, panel);
        groups.join("toolbar", panel);
        dropdowns.insert(
            panel,
            Dropdown {
                name,
                anchor,
                panel,
                positioner,
                open: false,
            },
        );
    }
    let panels: Vec<ElementId> = groups.members(&"toolbar").to_vec();

    println!("open file");
    for other in groups.announce_open(&"toolbar", &panels[0]) {
        if let Some(dd) = dropdowns.get_mut(&other) {
            dd.open = false;
        }
    }
    if let Some(dd) = dropdowns.get_mut(&panels[0]) {
        dd.open = true;
        dd.positioner.open();
        place(&mut doc, dd);
    }

    println!("open account (closes file)");
    for other in groups.announce_open(&"toolbar", &panels[1]) {
        if let Some(dd) = dropdowns.get_mut(&other)
            && dd.open
        {
            dd.open = false;
            let detached = dd.positioner.close(&mut doc, dd.panel);
            println!("  {:<8} closed, detached {detached:?}", dd.name);
        }
    }
    if let Some(dd) = dropdowns.get_mut(&panels[1]) {
        dd.open = true;
        dd.positioner.open();
        place(&mut doc, dd);
    }

    println!("window shrinks to 640px");
    doc.set_viewport_size(Size::new(640.0, 768.0));
    let out = bc.native_event(&mut host, EventKind::Resize, viewport_event(&doc));
    dispatch(&mut doc, &mut dropdowns, out);
    for t in host.advance(10) {
        let out = bc.timer_fired(t);
        dispatch(&mut doc, &mut dropdowns, out);
    }

    println!("account panel gains a row");
    let panel = panels[1];
    let row = doc.insert(Some(panel), ElementNode::new(Rect::new(0.0, 0.0, 220.0, 24.0)));
    let record = MutationRecord {
        target: row,
        change: Change::ChildList,
    };
    let out: Vec<_> = bc.mutation(record, &doc).into_iter().collect();
    dispatch(&mut doc, &mut dropdowns, out);

    println!("close account");
    if let Some(dd) = dropdowns.get_mut(&panel) {
        dd.open = false;
        let detached = dd.positioner.close(&mut doc, dd.panel);
        println!(
            "  {:<8} closed, detached {detached:?}, back to {:?}",
            dd.name,
            dd.positioner.placement()
        );
    }

    for dd in dropdowns.values() {
        bc.unregister_all(&mut host, dd.panel);
    }
    bc.teardown(&mut host, EventKind::Resize);
    println!(
        "teardown: {} resize listeners, {} observers",
        host.listener_count(EventKind::Resize),
        host.observer_count()
    );
}
