// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=perch_placement --heading-base-level=0

//! Perch Placement: find a collision-free spot for a floating element, within a fixed budget.
//!
//! ## Overview
//!
//! A [`PlacementRequest`] holds the measured floating element, its anchor, a desired
//! [`Placement`](perch_geometry::Placement), the gaps, and an optional bounding container.
//! The [`Engine`] places the element, tests it for collisions, and on failure walks a fixed
//! fallback order (see [`retry`]). It always terminates:
//!
//! - [`Terminal::Clear`]: a candidate fits.
//! - [`Terminal::Overflow`]: the element is at least as wide as the viewport, or the
//!   budget (four attempts by default) ran out. The element spans the viewport below
//!   the anchor with the horizontal gap as a margin on both sides.
//!
//! Placement never fails once geometry has been measured. Measuring is the only
//! fallible step and surfaces [`GeometryError`](perch_geometry::GeometryError).
//!
//! ## Apply once
//!
//! The engine searches without touching the document. [`Resolution::apply`] performs a single
//! move (and resize, for the fallback). The resolved placement name is what a widget attaches
//! to the element and later undoes on close; [`Positioner`] keeps that bookkeeping.
//!
//! ## Presets
//!
//! - [`EngineOptions::dropdown`]: edge-aligned, horizontal collisions only.
//! - [`EngineOptions::tooltip`]: centered on the anchor, all four sides tested.
//!
//! ## Workflow
//!
//! 1) Measure: [`Positioner::request`] (or build a [`PlacementRequest`] from your own snapshots).
//! 2) Resolve: [`Engine::resolve`] or [`Engine::resolve_with`] to share a budget across re-placements.
//! 3) Apply: [`Resolution::apply`].
//! 4) Re-run on resize/scroll/mutation notifications (see `perch_broadcast`).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod positioner;
pub mod retry;

pub use engine::{
    Alignment, Engine, EngineOptions, Offsets, PlacementRequest, Resolution, Terminal,
};
pub use positioner::Positioner;
pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryState, next_candidate};
