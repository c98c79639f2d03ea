// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broadcaster fan-out with a virtual clock.
//!
//! Registers a handful of elements for resize and scroll, feeds bursts of native
//! events through a `ManualHost`, and prints what each element is told.
//! The second half runs the same burst on a host without mutation observers.
//!
//! Run:
//! - `cargo run -p perch_demos --example broadcast_resize`

use perch_broadcast::{
    BroadcastConfig, Broadcaster, Delivery, EventKind, Host, ManualHost, Notification,
    ViewportEvent,
};

fn event(width: f64, scroll_y: f64) -> ViewportEvent {
    ViewportEvent {
        width,
        height: 720.0,
        scroll_x: 0.0,
        scroll_y,
    }
}

fn describe(d: &Delivery<&str>) -> String {
    match d.notification {
        Notification::ResizeMe(ev) => {
            format!("{} <- resize-me ({}x{})", d.element, ev.width, ev.height)
        }
        Notification::ScrollMe(ev) => {
            format!("{} <- scroll-me (y = {})", d.element, ev.scroll_y)
        }
        Notification::MutateMe => format!("{} <- mutate-me", d.element),
    }
}

fn run(label: &str, host: &mut ManualHost<&'static str>) {
    println!(
        "== {label} (mutation observers: {})",
        host.supports_mutation_observer()
    );
    let mut bc = Broadcaster::new(BroadcastConfig::default().with_scroll_debounce(25));
    for el in ["nav-dropdown", "help-tooltip", "account-menu"] {
        bc.register(host, EventKind::Resize, el);
    }
    bc.register(host, EventKind::Scroll, "help-tooltip");
    // Duplicates are ignored.
    bc.register(host, EventKind::Resize, "nav-dropdown");
    println!(
        "tagged for resize: {:?}, native resize listeners: {}",
        bc.tagged(EventKind::Resize),
        host.listener_count(EventKind::Resize)
    );

    // A window drag: one native event every 2ms.
    let mut out = Vec::new();
    for (i, width) in [1280.0, 1264.0, 1240.0, 1212.0, 1200.0].into_iter().enumerate() {
        out.extend(bc.native_event(host, EventKind::Resize, event(width, 0.0)));
        if i < 4 {
            for t in host.advance(2) {
                out.extend(bc.timer_fired(t));
            }
        }
    }
    for y in [40.0, 120.0, 300.0] {
        out.extend(bc.native_event(host, EventKind::Scroll, event(1200.0, y)));
    }
    for t in host.advance(50) {
        out.extend(bc.timer_fired(t));
    }

    println!("{} deliveries at t = {}ms:", out.len(), host.now_ms());
    for d in &out {
        println!("  {}", describe(d));
    }
    println!(
        "last event on help-tooltip: {:?}\n",
        bc.last_event(&"help-tooltip").map(EventKind::marker)
    );

    bc.teardown(host, EventKind::Resize);
    bc.teardown(host, EventKind::Scroll);
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    run("debounced", &mut ManualHost::new());
    run("degraded", &mut ManualHost::without_mutation_observer());
}
