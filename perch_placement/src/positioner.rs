// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-widget placement state.
//!
//! A [`Positioner`] belongs to one floating element. It remembers the placement the
//! widget was configured with, the placement currently attached after fallbacks, and
//! the retry budget for the current open, so that closing can undo a fallback.

use perch_geometry::{Document, ElementId, GeometryError, Placement};

use crate::engine::{Engine, EngineOptions, Offsets, PlacementRequest, Resolution};
use crate::retry::RetryState;

/// Stateful placement for one floating element.
///
/// ## Lifecycle
///
/// 1) [`Positioner::open`] when the element is shown: resets the retry budget.
/// 2) [`Positioner::position`] on open and on every resize/scroll/mutation notification.
/// 3) [`Positioner::close`] when hidden: restores the configured placement.
///
/// ```
/// use kurbo::Rect;
/// use perch_geometry::{Document, ElementNode, Placement, Viewport};
/// use perch_placement::{EngineOptions, Positioner};
///
/// let mut doc = Document::new(Viewport::new(800.0, 600.0));
/// let button = doc.insert(Some(doc.root()), ElementNode::new(Rect::new(700.0, 20.0, 780.0, 50.0)));
/// let panel = doc.insert(Some(doc.root()), ElementNode::new(Rect::new(0.0, 0.0, 200.0, 120.0)));
///
/// let mut pos = Positioner::new(Placement::Unset, EngineOptions::dropdown());
/// pos.open();
/// let res = pos.position(&mut doc, panel, button, None).unwrap();
/// assert_eq!(res.placement, Placement::Left);
/// assert_eq!(pos.placement(), Placement::Left);
///
/// // Closing detaches the fallback and restores the configured placement.
/// assert_eq!(pos.close(&mut doc, panel), Some(Placement::Left));
/// assert_eq!(pos.placement(), Placement::Unset);
/// ```
#[derive(Clone, Debug)]
pub struct Positioner {
    engine: Engine,
    offsets: Offsets,
    original: Placement,
    attached: Placement,
    class_changed: bool,
    retry: RetryState,
}

impl Positioner {
    /// Create a positioner for an element configured with `placement`.
    pub fn new(placement: Placement, options: EngineOptions) -> Self {
        Self {
            engine: Engine::new(options),
            offsets: Offsets::default(),
            original: placement,
            attached: placement,
            class_changed: false,
            retry: RetryState::new(options.max_attempts),
        }
    }

    /// Set the anchor gaps.
    #[must_use]
    pub fn with_offsets(mut self, offsets: Offsets) -> Self {
        self.offsets = offsets;
        self
    }

    /// The placement currently attached to the element.
    pub fn placement(&self) -> Placement {
        self.attached
    }

    /// The placement the widget was configured with.
    pub fn original(&self) -> Placement {
        self.original
    }

    /// Whether a fallback changed the attached placement or size since the last close.
    pub fn class_changed(&self) -> bool {
        self.class_changed
    }

    /// Retry budget for the current open.
    pub fn retry_state(&self) -> &RetryState {
        &self.retry
    }

    /// Start a new open: restore the full retry budget.
    pub fn open(&mut self) {
        self.retry.reset(self.engine.options().max_attempts);
    }

    /// Measure `element`, `anchor`, and the optional bounding container into a request
    /// starting from the attached placement.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError`] from [`Document::snapshot`] for any of the three elements.
    pub fn request(
        &self,
        doc: &Document,
        element: ElementId,
        anchor: ElementId,
        boundary: Option<ElementId>,
    ) -> Result<PlacementRequest, GeometryError> {
        Ok(PlacementRequest {
            element: doc.snapshot(element)?,
            anchor: doc.rect_snapshot(anchor)?,
            placement: self.attached,
            offsets: self.offsets,
            boundary: boundary.map(|b| doc.rect_snapshot(b)).transpose()?,
            direction: doc.direction(),
        })
    }

    /// Find a position for `element` against `anchor` and apply it.
    ///
    /// # Errors
    ///
    /// Fails only if measuring fails; see [`Positioner::request`]. The document is not
    /// modified in that case.
    pub fn position(
        &mut self,
        doc: &mut Document,
        element: ElementId,
        anchor: ElementId,
        boundary: Option<ElementId>,
    ) -> Result<Resolution, GeometryError> {
        let request = self.request(doc, element, anchor, boundary)?;
        let resolution = self.engine.resolve_with(&request, &mut self.retry);
        self.attached = resolution.placement;
        self.class_changed |= resolution.class_changed;
        resolution.apply(doc, element);
        Ok(resolution)
    }

    /// Undo fallbacks on close.
    ///
    /// When a fallback changed anything, clears the forced width, restores the configured
    /// placement, resets the budget, and returns the placement that was detached.
    /// Returns `None` when there was nothing to undo.
    pub fn close(&mut self, doc: &mut Document, element: ElementId) -> Option<Placement> {
        if !self.class_changed {
            return None;
        }
        let detached = self.attached;
        doc.set_width(element, None);
        self.attached = self.original;
        self.class_changed = false;
        self.retry.reset(self.engine.options().max_attempts);
        Some(detached)
    }
}
