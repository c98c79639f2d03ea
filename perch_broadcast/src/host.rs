// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seam: native listeners, mutation observers, and timers.
//!
//! ## Overview
//!
//! The [`Broadcaster`](crate::broadcaster::Broadcaster) never touches a platform
//! directly. It asks a [`Host`] to attach listeners, observe subtrees, and
//! schedule timers, and the host later reports back through
//! [`Broadcaster::native_event`](crate::broadcaster::Broadcaster::native_event),
//! [`Broadcaster::timer_fired`](crate::broadcaster::Broadcaster::timer_fired), and
//! [`Broadcaster::mutation`](crate::broadcaster::Broadcaster::mutation).
//!
//! [`ManualHost`] is an in-memory host with a virtual clock. It is what the tests
//! and demos drive, and it counts what is attached so invariants are observable.

use alloc::vec::Vec;

use crate::types::{EventKind, ListenerId, ObserverId, TimerId};

/// Platform services the broadcaster depends on.
pub trait Host<K> {
    /// Whether the platform can observe subtree mutations.
    ///
    /// When `false` the broadcaster runs degraded: viewport events fan out
    /// immediately and mutation subscriptions observe nothing.
    fn supports_mutation_observer(&self) -> bool;

    /// Attach a native viewport listener for `kind` (`Resize` or `Scroll`).
    fn listen(&mut self, kind: EventKind) -> ListenerId;

    /// Detach a listener previously returned by [`Host::listen`].
    fn unlisten(&mut self, listener: ListenerId);

    /// Start observing style and child-list changes under `element`.
    fn observe(&mut self, element: &K) -> ObserverId;

    /// Stop an observer previously returned by [`Host::observe`].
    fn disconnect(&mut self, observer: ObserverId);

    /// Schedule a one-shot timer `delay_ms` from now.
    fn set_timeout(&mut self, delay_ms: u32) -> TimerId;

    /// Cancel a pending timer. Unknown or already-fired timers are ignored.
    fn clear_timeout(&mut self, timer: TimerId);
}

/// In-memory [`Host`] with a virtual millisecond clock.
#[derive(Clone, Debug)]
pub struct ManualHost<K> {
    now_ms: u64,
    next_handle: u64,
    mutation_observers: bool,
    listeners: Vec<(ListenerId, EventKind)>,
    observers: Vec<(ObserverId, K)>,
    timers: Vec<(TimerId, u64)>,
    listens_total: usize,
}

impl<K> Default for ManualHost<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ManualHost<K> {
    /// A host that supports mutation observers.
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_handle: 0,
            mutation_observers: true,
            listeners: Vec::new(),
            observers: Vec::new(),
            timers: Vec::new(),
            listens_total: 0,
        }
    }

    /// A host without mutation observer support.
    pub fn without_mutation_observer() -> Self {
        Self {
            mutation_observers: false,
            ..Self::new()
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of attached listeners of `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(_, k)| *k == kind).count()
    }

    /// Number of listeners ever attached, including detached ones.
    pub fn listens_total(&self) -> usize {
        self.listens_total
    }

    /// Number of live mutation observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Whether `element` is currently observed.
    pub fn is_observed(&self, element: &K) -> bool
    where
        K: PartialEq,
    {
        self.observers.iter().any(|(_, k)| k == element)
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Advance the clock by `ms` and return the timers that came due, earliest first.
    ///
    /// Timers due at the same instant are returned in scheduling order.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        self.now_ms += ms;
        let now = self.now_ms;
        let mut due: Vec<(TimerId, u64)> = Vec::new();
        self.timers.retain(|&(id, at)| {
            if at <= now {
                due.push((id, at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(id, at)| (at, id));
        due.into_iter().map(|(id, _)| id).collect()
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl<K: Clone> Host<K> for ManualHost<K> {
    fn supports_mutation_observer(&self) -> bool {
        self.mutation_observers
    }

    fn listen(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId::new(self.next_handle());
        self.listeners.push((id, kind));
        self.listens_total += 1;
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.retain(|(id, _)| *id != listener);
    }

    fn observe(&mut self, element: &K) -> ObserverId {
        let id = ObserverId::new(self.next_handle());
        self.observers.push((id, element.clone()));
        id
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.observers.retain(|(id, _)| *id != observer);
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId {
        let id = TimerId::new(self.next_handle());
        self.timers.push((id, self.now_ms + u64::from(delay_ms)));
        id
    }

    fn clear_timeout(&mut self, timer: TimerId) {
        self.timers.retain(|(id, _)| *id != timer);
    }
}
