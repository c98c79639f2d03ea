// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement engine implementation.
//!
//! ## Overview
//!
//! Places a floating element against an anchor, tests the result, and walks the
//! fallback table until a candidate is clear or the retry budget is spent.
//!
//! ## States
//!
//! - **Oversized check**: an element at least as wide as the viewport, or a spent budget
//!   with the element still colliding, goes straight to the full-width fallback.
//! - **Place**: compute the offset for the current candidate.
//! - **Test**: check the candidate on the configured [`Axes`] (horizontal by default).
//! - **Reposition**: record the failure, spend one attempt, pick the next candidate.
//!
//! The search is computed without touching the document; [`Resolution::apply`] then
//! performs the one visible mutation. The resolved [`Resolution::placement`] is the
//! name a retry-by-retry search would have left attached to the element.

use perch_geometry::{
    Axes, Dimensions, Direction, Document, ElementId, Offset, Placement, RectSnapshot,
    compute_offset, is_clear,
};

use crate::retry::{DEFAULT_MAX_ATTEMPTS, RetryState};

/// Gaps between the anchor and the floating element, in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offsets {
    /// Vertical gap.
    pub vertical: f64,
    /// Horizontal gap; also the margin on each side of a full-width fallback.
    pub horizontal: f64,
}

impl Offsets {
    /// Create offsets.
    pub const fn new(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

/// How a candidate placement maps onto an offset formula.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Use the candidate as-is (dropdown panels).
    #[default]
    Edge,
    /// Center on the anchor along the candidate side (tooltip bubbles).
    ///
    /// See [`Placement::centered`].
    Centered,
}

impl Alignment {
    fn formula(self, candidate: Placement) -> Placement {
        match self {
            Self::Edge => candidate,
            Self::Centered => candidate.centered(),
        }
    }
}

/// Engine tunables.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineOptions {
    /// Fallback attempts before the full-width fallback. Zero disables repositioning.
    pub max_attempts: u8,
    /// Sides tested after each placement.
    pub collision_axes: Axes,
    /// Offset formula selection.
    pub alignment: Alignment,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::dropdown()
    }
}

impl EngineOptions {
    /// Dropdown panels: edge-aligned, horizontal collisions only.
    pub const fn dropdown() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            collision_axes: Axes::Horizontal,
            alignment: Alignment::Edge,
        }
    }

    /// Tooltip bubbles: centered on the anchor, every side must be clear.
    pub const fn tooltip() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            collision_axes: Axes::All,
            alignment: Alignment::Centered,
        }
    }

    /// Set the retry budget.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u8) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the sides tested after each placement.
    #[must_use]
    pub const fn with_collision_axes(mut self, axes: Axes) -> Self {
        self.collision_axes = axes;
        self
    }

    /// Set the offset formula selection.
    #[must_use]
    pub const fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Everything the engine needs for one placement, already measured.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// The floating element at its current position, with its container and the viewport.
    pub element: Dimensions,
    /// The anchor's rectangle.
    pub anchor: RectSnapshot,
    /// The placement to try first.
    pub placement: Placement,
    /// Gaps between anchor and element.
    pub offsets: Offsets,
    /// Bounding container; the viewport when `None`.
    pub boundary: Option<RectSnapshot>,
    /// Page writing direction.
    pub direction: Direction,
}

/// How a placement search ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Terminal {
    /// A collision-free candidate was found.
    Clear,
    /// The element was too wide or every candidate collided; it spans the viewport
    /// (or the boundary) below the anchor.
    Overflow,
}

/// The outcome of a placement search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The placement name left attached to the element.
    pub placement: Placement,
    /// Final document position.
    pub offset: Offset,
    /// Forced width for the full-width fallback; `None` keeps the element's width.
    pub width: Option<f64>,
    /// How the search ended.
    pub terminal: Terminal,
    /// Fallback attempts spent by this search.
    pub attempts: u8,
    /// Whether the attached placement or size differs from what was requested.
    pub class_changed: bool,
}

impl Resolution {
    /// Move (and for the full-width fallback, resize) `element` in one step.
    ///
    /// Height is left to layout.
    pub fn apply(&self, doc: &mut Document, element: ElementId) {
        doc.set_offset(element, self.offset);
        if let Some(width) = self.width {
            doc.set_width(element, Some(width));
        }
    }
}

/// Bounded placement search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    /// Create an engine.
    pub const fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Engine tunables.
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Resolve `request` with a fresh retry budget.
    pub fn resolve(&self, request: &PlacementRequest) -> Resolution {
        let mut state = RetryState::new(self.options.max_attempts);
        self.resolve_with(request, &mut state)
    }

    /// Resolve `request`, spending from `state`.
    ///
    /// Widgets keep one state per open so repeated re-placements (on resize or scroll)
    /// share a single budget.
    pub fn resolve_with(&self, request: &PlacementRequest, state: &mut RetryState) -> Resolution {
        let boundary = request.boundary.as_ref();
        let budget = state.attempts_remaining();
        let mut candidate = request.placement;
        let mut current = request.element;

        // Each pass either returns or spends one attempt, so this runs at most
        // `budget + 1` times.
        loop {
            let oversized = request.element.element.width >= request.element.viewport.width;
            if oversized || (state.is_exhausted() && !is_clear(&current, boundary, Axes::All)) {
                return self.overflow(request, candidate, budget - state.attempts_remaining());
            }

            let offset = compute_offset(
                &request.element,
                &request.anchor,
                self.options.alignment.formula(candidate),
                request.offsets.vertical,
                request.offsets.horizontal,
                false,
                request.direction,
            );
            current = request.element.moved_to(offset);
            let attempts = budget - state.attempts_remaining();

            if is_clear(&current, boundary, self.options.collision_axes) {
                #[cfg(feature = "tracing")]
                tracing::debug!(placement = %candidate, attempts, "placement clear");
                return Resolution {
                    placement: candidate,
                    offset,
                    width: None,
                    terminal: Terminal::Clear,
                    attempts,
                    class_changed: attempts > 0,
                };
            }
            if state.is_exhausted() {
                // Still colliding with nothing left to spend.
                return self.overflow(request, candidate, attempts);
            }

            let failed = candidate;
            candidate = state.advance(failed);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                %failed,
                next = %candidate,
                remaining = state.attempts_remaining(),
                "placement collided, repositioning"
            );
        }
    }

    fn overflow(&self, request: &PlacementRequest, attached: Placement, attempts: u8) -> Resolution {
        let h = request.offsets.horizontal;
        let mut width = request.element.viewport.width;
        let mut shift = 0.0;
        if let Some(b) = &request.boundary {
            width = width.min(b.width);
            shift = b.offset.left;
        }
        let offset = compute_offset(
            &request.element,
            &request.anchor,
            Placement::CenterBottom,
            request.offsets.vertical,
            h + shift,
            true,
            request.direction,
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(placement = %attached, attempts, width, "falling back to full width");
        Resolution {
            placement: attached,
            offset,
            width: Some(width - 2.0 * h),
            terminal: Terminal::Overflow,
            attempts,
            class_changed: true,
        }
    }
}
