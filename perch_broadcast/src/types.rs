// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the broadcaster: event kinds, payloads, notifications, handles, and lookups.
//!
//! ## Overview
//!
//! These types describe what the host reports (native viewport events and mutation
//! records) and what the [`broadcaster`](crate::broadcaster) hands back (deliveries).

/// Event kinds an element can subscribe to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// The viewport resized.
    Resize,
    /// The viewport scrolled.
    Scroll,
    /// The element's own subtree changed.
    Mutate,
}

impl EventKind {
    /// Every kind.
    pub const ALL: [Self; 3] = [Self::Resize, Self::Scroll, Self::Mutate];

    /// Subscription marker attribute carried by tagged elements (value: a unique id).
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Resize => "data-resize",
            Self::Scroll => "data-scroll",
            Self::Mutate => "data-mutate",
        }
    }

    /// Name of the notification emitted for this kind.
    pub const fn notification_name(self) -> &'static str {
        match self {
            Self::Resize => "resize-me",
            Self::Scroll => "scroll-me",
            Self::Mutate => "mutate-me",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Resize => 0,
            Self::Scroll => 1,
            Self::Mutate => 2,
        }
    }
}

/// Attribute recording the last event kind delivered to an element.
pub const LAST_EVENT_MARKER: &str = "data-events";

/// Viewport state reported with a native resize or scroll event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewportEvent {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Horizontal scroll offset.
    pub scroll_x: f64,
    /// Vertical scroll offset.
    pub scroll_y: f64,
}

/// What a tagged element is told.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Notification {
    /// Re-run placement after a resize; carries the last viewport state of the burst.
    ResizeMe(ViewportEvent),
    /// Re-run placement after a scroll; carries the last viewport state of the burst.
    ScrollMe(ViewportEvent),
    /// The element's subtree changed.
    MutateMe,
}

impl Notification {
    /// The event kind this notification answers.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ResizeMe(_) => EventKind::Resize,
            Self::ScrollMe(_) => EventKind::Scroll,
            Self::MutateMe => EventKind::Mutate,
        }
    }
}

/// A single notification addressed to one element.
///
/// Produced by [`Broadcaster`](crate::broadcaster::Broadcaster) fan-outs, in
/// registration order. The caller dispatches them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Delivery<K> {
    /// Recipient.
    pub element: K,
    /// Payload.
    pub notification: Notification,
}

/// Kind of change reported by a mutation observer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Change {
    /// The `style` attribute changed.
    Style,
    /// Another attribute changed.
    Attribute,
    /// Children were added or removed.
    ChildList,
    /// Text content changed.
    CharacterData,
}

impl Change {
    /// Whether this change can move or resize floating content.
    pub const fn is_relevant(self) -> bool {
        matches!(self, Self::Style | Self::ChildList)
    }
}

/// A change observed somewhere inside a tagged element's subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord<K> {
    /// The node that changed.
    pub target: K,
    /// What changed.
    pub change: Change,
}

macro_rules! handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a host-assigned handle.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// The host-assigned handle.
            pub const fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

handle!(
    /// A native viewport listener attached by the host.
    ListenerId
);
handle!(
    /// A native mutation observer attached by the host.
    ObserverId
);
handle!(
    /// A pending host timer.
    TimerId
);

/// Look up the parent of a node to find the closest tagged ancestor of a mutation.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no-op parent provider: mutations only reach the exact element they target.
///
/// All calls to [`ParentLookup::parent_of`] return `None`.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}
