// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=perch_broadcast --heading-base-level=0

//! Perch Broadcast: one native listener per event kind, fanned out to every subscribed element.
//!
//! ## Overview
//!
//! Floating content has to re-run placement when the viewport resizes or scrolls, or when
//! its own subtree changes. Rather than every dropdown and tooltip attaching its own
//! listener, elements opt in with a subscription marker and a single
//! [`Broadcaster`](crate::broadcaster::Broadcaster) owns the native listener for each kind.
//!
//! ## Event kinds
//!
//! - [`EventKind::Resize`](crate::types::EventKind::Resize) and
//!   [`EventKind::Scroll`](crate::types::EventKind::Scroll) are viewport-global:
//!   one native listener, debounced, fanned out to every tagged element.
//! - [`EventKind::Mutate`](crate::types::EventKind::Mutate) is local: each tagged element's
//!   subtree is observed, and a relevant change notifies only the closest tagged ancestor.
//!
//! ## Host
//!
//! The broadcaster does not talk to a platform. A [`Host`](crate::host::Host) attaches
//! listeners, observers, and timers on its behalf, and the embedder forwards what the
//! platform reports. [`ManualHost`](crate::host::ManualHost) is a deterministic in-memory host
//! with a virtual clock.
//!
//! ## Layering
//!
//! The broadcaster only computes who to notify. Fan-outs come back as a list of
//! [`Delivery`](crate::types::Delivery) values in registration order; a higher-level
//! layer dispatches them, typically by re-running placement for each recipient.
//!
//! ## Workflow
//!
//! 1) Register: tag each element for the kinds it cares about. The first registration
//!    per viewport kind attaches the native listener; duplicates are no-ops.
//! 2) Forward: pass native events to `native_event`, expired timers to `timer_fired`,
//!    and mutation records to `mutation`.
//! 3) Dispatch: deliver the returned notifications. Registering or unregistering while
//!    dispatching is fine; fan-outs are snapshots.
//! 4) Tear down: `teardown` detaches the native listener for a kind.
//!
//! ```
//! use perch_broadcast::{
//!     BroadcastConfig, Broadcaster, EventKind, ManualHost, Notification, ViewportEvent,
//! };
//!
//! let mut host = ManualHost::new();
//! let mut bc = Broadcaster::new(BroadcastConfig::default());
//! bc.register(&mut host, EventKind::Resize, "dropdown");
//! bc.register(&mut host, EventKind::Resize, "tooltip");
//!
//! // A burst of resizes collapses into one fan-out carrying the last state.
//! for w in [900.0, 850.0, 800.0] {
//!     let ev = ViewportEvent { width: w, height: 600.0, ..ViewportEvent::default() };
//!     bc.native_event(&mut host, EventKind::Resize, ev);
//! }
//! let due = host.advance(10);
//! assert_eq!(due.len(), 1);
//! let out = bc.timer_fired(due[0]);
//! assert_eq!(out.len(), 2);
//! assert!(matches!(out[0].notification, Notification::ResizeMe(ev) if ev.width == 800.0));
//! ```
//!
//! [`exclusive`](crate::exclusive) adds the companion "close the others" broadcast for
//! widgets that share a menu or toolbar.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod broadcaster;
pub mod exclusive;
pub mod host;
pub mod types;

pub use broadcaster::{BroadcastConfig, Broadcaster, DEFAULT_DEBOUNCE_MS};
pub use exclusive::ExclusiveGroups;
pub use host::{Host, ManualHost};
pub use types::{
    Change, Delivery, EventKind, LAST_EVENT_MARKER, ListenerId, MutationRecord, NoParent,
    Notification, ObserverId, ParentLookup, TimerId, ViewportEvent,
};
