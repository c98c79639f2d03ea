// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broadcaster implementation.
//!
//! ## Overview
//!
//! Keeps one tagged set per [`EventKind`] and at most one native listener per
//! viewport kind. Native events are debounced through host timers and fanned out
//! to every tagged element as a list of [`Delivery`] values.
//!
//! ## Listener lifecycle
//!
//! - The first [`Broadcaster::register`] for `Resize` or `Scroll` attaches a native listener.
//! - Later registrations, and every [`Broadcaster::unregister`], leave it alone,
//!   even when the tagged set becomes empty.
//! - Only [`Broadcaster::teardown`] detaches it.
//!
//! `Mutate` subscriptions observe each element's own subtree, so every tagged
//! element owns one observer, disconnected when the element is unregistered.
//!
//! ## Debounce
//!
//! A native event arriving while a timer is pending cancels that timer and
//! schedules a new one. When the timer fires, the fan-out carries the last
//! [`ViewportEvent`] of the burst.
//!
//! ## Degraded mode
//!
//! When [`Host::supports_mutation_observer`] is `false`, native resize and scroll
//! events fan out immediately with no debounce, and `Mutate` registrations attach
//! nothing.
//!
//! ## Re-entrancy
//!
//! Fan-outs are computed from a snapshot of the tagged set. The caller may
//! register or unregister elements while dispatching the returned deliveries.

use alloc::vec::Vec;

use crate::host::Host;
use crate::types::{
    Delivery, EventKind, ListenerId, MutationRecord, Notification, ObserverId, ParentLookup,
    TimerId, ViewportEvent,
};

/// Default debounce window for resize and scroll, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u32 = 10;

/// Debounce tunables.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BroadcastConfig {
    /// Debounce window for resize fan-outs.
    pub resize_debounce_ms: u32,
    /// Debounce window for scroll fan-outs.
    pub scroll_debounce_ms: u32,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: DEFAULT_DEBOUNCE_MS,
            scroll_debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl BroadcastConfig {
    /// Set the resize debounce window.
    #[must_use]
    pub fn with_resize_debounce(mut self, ms: u32) -> Self {
        self.resize_debounce_ms = ms;
        self
    }

    /// Set the scroll debounce window.
    #[must_use]
    pub fn with_scroll_debounce(mut self, ms: u32) -> Self {
        self.scroll_debounce_ms = ms;
        self
    }

    /// Debounce window for `kind`. `Mutate` is never debounced.
    pub fn debounce_ms(&self, kind: EventKind) -> Option<u32> {
        match kind {
            EventKind::Resize => Some(self.resize_debounce_ms),
            EventKind::Scroll => Some(self.scroll_debounce_ms),
            EventKind::Mutate => None,
        }
    }
}

#[derive(Clone, Debug)]
struct Channel<K> {
    tagged: Vec<K>,
    listener: Option<ListenerId>,
    observers: Vec<(K, ObserverId)>,
    pending: Option<(TimerId, ViewportEvent)>,
}

impl<K> Channel<K> {
    fn new() -> Self {
        Self {
            tagged: Vec::new(),
            listener: None,
            observers: Vec::new(),
            pending: None,
        }
    }
}

/// Registry of tagged elements with one native listener per viewport event kind.
///
/// ## Usage
///
/// - Call [`Broadcaster::register`] when a widget carrying a subscription marker is set up.
/// - Forward native events to [`Broadcaster::native_event`], expired timers to
///   [`Broadcaster::timer_fired`], and mutation records to [`Broadcaster::mutation`].
/// - Dispatch the returned [`Delivery`] values in order.
/// - Call [`Broadcaster::teardown`] when the owning widget layer is destroyed.
///
/// ## Example
///
/// ```
/// use perch_broadcast::{BroadcastConfig, Broadcaster, EventKind, ManualHost, ViewportEvent};
///
/// let mut host = ManualHost::new();
/// let mut bc = Broadcaster::new(BroadcastConfig::default());
/// for el in 0..3_u32 {
///     bc.register(&mut host, EventKind::Resize, el);
/// }
/// assert_eq!(host.listener_count(EventKind::Resize), 1);
///
/// let ev = ViewportEvent { width: 640.0, height: 480.0, ..ViewportEvent::default() };
/// assert!(bc.native_event(&mut host, EventKind::Resize, ev).is_empty());
///
/// let mut out = Vec::new();
/// for timer in host.advance(10) {
///     out.extend(bc.timer_fired(timer));
/// }
/// assert_eq!(out.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Broadcaster<K> {
    config: BroadcastConfig,
    channels: [Channel<K>; 3],
    last_event: Vec<(K, EventKind)>,
}

impl<K: Copy + Eq> Default for Broadcaster<K> {
    fn default() -> Self {
        Self::new(BroadcastConfig::default())
    }
}

impl<K: Copy + Eq> Broadcaster<K> {
    /// Create an empty broadcaster.
    pub fn new(config: BroadcastConfig) -> Self {
        Self {
            config,
            channels: [Channel::new(), Channel::new(), Channel::new()],
            last_event: Vec::new(),
        }
    }

    /// Current tunables.
    pub fn config(&self) -> &BroadcastConfig {
        &self.config
    }

    /// Replace the tunables. Takes effect from the next native event.
    pub fn set_config(&mut self, config: BroadcastConfig) {
        self.config = config;
    }

    fn channel(&self, kind: EventKind) -> &Channel<K> {
        &self.channels[kind.index()]
    }

    fn channel_mut(&mut self, kind: EventKind) -> &mut Channel<K> {
        &mut self.channels[kind.index()]
    }

    /// Tag `element` for `kind`.
    ///
    /// Returns `false` if it was already tagged; duplicates are a no-op.
    pub fn register<H: Host<K> + ?Sized>(
        &mut self,
        host: &mut H,
        kind: EventKind,
        element: K,
    ) -> bool {
        let degraded = !host.supports_mutation_observer();
        let ch = self.channel_mut(kind);
        if ch.tagged.contains(&element) {
            return false;
        }
        ch.tagged.push(element);
        match kind {
            EventKind::Resize | EventKind::Scroll => {
                if ch.listener.is_none() {
                    ch.listener = Some(host.listen(kind));
                    #[cfg(feature = "tracing")]
                    tracing::debug!(kind = kind.marker(), "attached native listener");
                }
            }
            EventKind::Mutate => {
                if degraded {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("mutation observers unavailable; mutate subscription is inert");
                } else {
                    let observer = host.observe(&element);
                    ch.observers.push((element, observer));
                }
            }
        }
        true
    }

    /// Remove `element` from the tagged set for `kind`.
    ///
    /// The native listener stays attached. Returns `false` if it was not tagged.
    pub fn unregister<H: Host<K> + ?Sized>(
        &mut self,
        host: &mut H,
        kind: EventKind,
        element: K,
    ) -> bool {
        let ch = self.channel_mut(kind);
        let Some(pos) = ch.tagged.iter().position(|k| *k == element) else {
            return false;
        };
        ch.tagged.remove(pos);
        if let Some(pos) = ch.observers.iter().position(|(k, _)| *k == element) {
            let (_, observer) = ch.observers.remove(pos);
            host.disconnect(observer);
        }
        if !self.is_tagged_anywhere(&element) {
            self.last_event.retain(|(k, _)| *k != element);
        }
        true
    }

    /// Remove `element` from every tagged set.
    pub fn unregister_all<H: Host<K> + ?Sized>(&mut self, host: &mut H, element: K) {
        for kind in EventKind::ALL {
            self.unregister(host, kind, element);
        }
    }

    /// Detach the native listener for `kind`, cancel its pending timer, disconnect
    /// its observers, and forget every tagged element.
    ///
    /// A later [`Broadcaster::register`] starts a fresh registration.
    pub fn teardown<H: Host<K> + ?Sized>(&mut self, host: &mut H, kind: EventKind) {
        let ch = core::mem::replace(self.channel_mut(kind), Channel::new());
        if let Some(listener) = ch.listener {
            host.unlisten(listener);
            #[cfg(feature = "tracing")]
            tracing::debug!(kind = kind.marker(), "detached native listener");
        }
        if let Some((timer, _)) = ch.pending {
            host.clear_timeout(timer);
        }
        for (_, observer) in ch.observers {
            host.disconnect(observer);
        }
        for element in ch.tagged {
            if !self.is_tagged_anywhere(&element) {
                self.last_event.retain(|(k, _)| *k != element);
            }
        }
    }

    /// Report a native viewport event.
    ///
    /// Returns the deliveries to dispatch now: empty while debouncing, the full
    /// fan-out in degraded mode. `Mutate` and kinds with no attached listener
    /// produce nothing.
    pub fn native_event<H: Host<K> + ?Sized>(
        &mut self,
        host: &mut H,
        kind: EventKind,
        event: ViewportEvent,
    ) -> Vec<Delivery<K>> {
        let Some(delay) = self.config.debounce_ms(kind) else {
            return Vec::new();
        };
        if self.channel(kind).listener.is_none() {
            return Vec::new();
        }
        if !host.supports_mutation_observer() {
            return self.fan_out(kind, event);
        }
        let ch = self.channel_mut(kind);
        if let Some((previous, _)) = ch.pending.take() {
            host.clear_timeout(previous);
            #[cfg(feature = "tracing")]
            tracing::trace!(kind = kind.marker(), "debounce restarted");
        }
        let timer = host.set_timeout(delay);
        ch.pending = Some((timer, event));
        Vec::new()
    }

    /// Report an expired host timer.
    ///
    /// Returns the fan-out for the kind whose debounce it ended, or nothing if the
    /// timer is unknown (already canceled or owned by someone else).
    pub fn timer_fired(&mut self, timer: TimerId) -> Vec<Delivery<K>> {
        for kind in [EventKind::Resize, EventKind::Scroll] {
            let ch = self.channel_mut(kind);
            if let Some((pending, event)) = ch.pending
                && pending == timer
            {
                ch.pending = None;
                return self.fan_out(kind, event);
            }
        }
        Vec::new()
    }

    /// Report a mutation observed under a tagged element.
    ///
    /// Irrelevant changes are dropped. Otherwise the closest tagged ancestor of the
    /// target, itself included, is marked and receives [`Notification::MutateMe`].
    pub fn mutation<P: ParentLookup<K> + ?Sized>(
        &mut self,
        record: MutationRecord<K>,
        parents: &P,
    ) -> Option<Delivery<K>> {
        if !record.change.is_relevant() {
            return None;
        }
        let tagged = &self.channel(EventKind::Mutate).tagged;
        let mut cur = Some(record.target);
        while let Some(node) = cur {
            if tagged.contains(&node) {
                self.mark(node, EventKind::Mutate);
                return Some(Delivery {
                    element: node,
                    notification: Notification::MutateMe,
                });
            }
            cur = parents.parent_of(&node);
        }
        None
    }

    fn fan_out(&mut self, kind: EventKind, event: ViewportEvent) -> Vec<Delivery<K>> {
        let notification = match kind {
            EventKind::Resize => Notification::ResizeMe(event),
            EventKind::Scroll => Notification::ScrollMe(event),
            EventKind::Mutate => Notification::MutateMe,
        };
        let snapshot = self.channel(kind).tagged.clone();
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = kind.marker(), recipients = snapshot.len(), "fan-out");
        snapshot
            .into_iter()
            .map(|element| {
                self.mark(element, kind);
                Delivery {
                    element,
                    notification,
                }
            })
            .collect()
    }

    fn mark(&mut self, element: K, kind: EventKind) {
        match self.last_event.iter_mut().find(|(k, _)| *k == element) {
            Some(entry) => entry.1 = kind,
            None => self.last_event.push((element, kind)),
        }
    }

    fn is_tagged_anywhere(&self, element: &K) -> bool {
        self.channels.iter().any(|ch| ch.tagged.contains(element))
    }

    /// Tagged elements for `kind`, in registration order.
    pub fn tagged(&self, kind: EventKind) -> &[K] {
        &self.channel(kind).tagged
    }

    /// Whether `element` is tagged for `kind`.
    pub fn is_registered(&self, kind: EventKind, element: &K) -> bool {
        self.channel(kind).tagged.contains(element)
    }

    /// Native attachments owned for `kind`: 0 or 1 listener for viewport kinds,
    /// one observer per tagged element for `Mutate`.
    pub fn native_listener_count(&self, kind: EventKind) -> usize {
        let ch = self.channel(kind);
        match kind {
            EventKind::Resize | EventKind::Scroll => usize::from(ch.listener.is_some()),
            EventKind::Mutate => ch.observers.len(),
        }
    }

    /// Whether a debounce timer is pending for `kind`.
    pub fn is_pending(&self, kind: EventKind) -> bool {
        self.channel(kind).pending.is_some()
    }

    /// Last event kind delivered to `element` (its `data-events` value).
    pub fn last_event(&self, element: &K) -> Option<EventKind> {
        self.last_event
            .iter()
            .find(|(k, _)| k == element)
            .map(|(_, kind)| *kind)
    }
}
