// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document implementation: structure, updates, geometry reads.

use alloc::vec::Vec;
use kurbo::{Rect, Size, Vec2};

use crate::error::GeometryError;
use crate::snapshot::{Dimensions, Offset, RectSnapshot};
use crate::types::{Direction, ElementFlags, ElementId, ElementNode, Viewport};

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    local: ElementNode,
    // Explicit width set by a full-width fallback; `None` keeps the layout width.
    width_override: Option<f64>,
}

impl Element {
    fn new(generation: u32, local: ElementNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            width_override: None,
        }
    }
}

/// An in-memory page: a tree of positioned elements, a viewport, and a writing direction.
///
/// The document owns one root element (the page body) created with the document.
/// Geometry is read through [`Document::snapshot`], which always derives rectangles
/// from the current state; nothing is memoized between calls.
pub struct Document {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: ElementId,
    viewport: Viewport,
    direction: Direction,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("viewport", &self.viewport)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document whose root covers the viewport at the origin.
    pub fn new(viewport: Viewport) -> Self {
        let body = ElementNode::new(Rect::from_origin_size((0.0, 0.0), viewport.size));
        Self {
            elements: alloc::vec![Some(Element::new(1, body))],
            generations: alloc::vec![1],
            free_list: Vec::new(),
            root: ElementId::new(0, 1),
            viewport,
            direction: Direction::Ltr,
        }
    }

    /// The root element (page body).
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize the viewport.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport.size = size;
    }

    /// Scroll the viewport so that `scroll` is its top-left corner in document space.
    pub fn scroll_to(&mut self, scroll: Vec2) {
        self.viewport.scroll = scroll;
    }

    /// Page writing direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Change the page writing direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Insert a new element as a child of `parent`, or detached if `None`.
    pub fn insert(&mut self, parent: Option<ElementId>, local: ElementNode) -> ElementId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].wrapping_add(1);
            idx
        } else {
            self.elements.push(None);
            self.generations.push(1);
            self.elements.len() - 1
        };
        let generation = self.generations[idx];
        self.elements[idx] = Some(Element::new(generation, local));
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId indices are 32-bit."
        )]
        let id = ElementId::new(idx as u32, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove an element and its subtree. The root cannot be removed.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root || !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.element(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.element(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent`, or detach it if `None`.
    ///
    /// Moving an element into its own subtree, or moving the root, is ignored.
    pub fn reparent(&mut self, id: ElementId, new_parent: Option<ElementId>) {
        if id == self.root || !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.is_ancestor_or_self(id, p))
        {
            return;
        }
        if let Some(parent) = self.element(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Update an element's layout box.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(el) = self.element_opt_mut(id) {
            el.local.bounds = bounds;
        }
    }

    /// Update an element's positioning flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(el) = self.element_opt_mut(id) {
            el.local.flags = flags;
        }
    }

    /// Move an element so its top-left corner sits at `offset` in document coordinates.
    pub fn set_offset(&mut self, id: ElementId, offset: Offset) {
        let scroll = self.viewport.scroll;
        if let Some(el) = self.element_opt_mut(id) {
            let mut origin = offset.to_point();
            if el.local.flags.contains(ElementFlags::FIXED) {
                origin -= scroll;
            }
            el.local.bounds = el.local.bounds.with_origin(origin);
        }
    }

    /// Force an element's width, or restore its layout width with `None`.
    pub fn set_width(&mut self, id: ElementId, width: Option<f64>) {
        if let Some(el) = self.element_opt_mut(id) {
            el.width_override = width;
        }
    }

    /// The forced width of an element, if any.
    pub fn width_override(&self, id: ElementId) -> Option<f64> {
        self.element_opt(id).and_then(|el| el.width_override)
    }

    /// Parent of an element, or `None` for the root, detached, or stale elements.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.element_opt(id).and_then(|el| el.parent)
    }

    /// Children of an element in insertion order.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.element_opt(id).map_or(&[], |el| &el.children)
    }

    /// The element's current box in document coordinates.
    pub fn bounds_of(&self, id: ElementId) -> Option<Rect> {
        let el = self.element_opt(id)?;
        let mut r = el.local.bounds;
        if el.local.flags.contains(ElementFlags::FIXED) {
            r = r + self.viewport.scroll;
        }
        if let Some(w) = el.width_override {
            r.x1 = r.x0 + w;
        }
        Some(r)
    }

    /// Returns `true` if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.element_opt(id).is_some()
    }

    /// Snapshot an element, its container, and the viewport in document coordinates.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::RootElement`] for the root: it has no container to measure.
    /// - [`GeometryError::StaleElement`] if `id` was removed.
    /// - [`GeometryError::Detached`] if the element has no parent.
    pub fn snapshot(&self, id: ElementId) -> Result<Dimensions, GeometryError> {
        let result = self.try_snapshot(id);
        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::warn!(?id, %err, "geometry snapshot rejected");
        }
        result
    }

    fn try_snapshot(&self, id: ElementId) -> Result<Dimensions, GeometryError> {
        if id == self.root {
            return Err(GeometryError::RootElement);
        }
        let el = self.element_opt(id).ok_or(GeometryError::StaleElement(id))?;
        let parent = el.parent.ok_or(GeometryError::Detached(id))?;
        let element = self.bounds_of(id).ok_or(GeometryError::StaleElement(id))?;
        let parent = self.bounds_of(parent).ok_or(GeometryError::Detached(id))?;
        Ok(Dimensions {
            element: element.into(),
            parent: parent.into(),
            viewport: self.viewport.document_rect().into(),
        })
    }

    /// Snapshot a single element's rectangle, e.g. to use as a bounding container.
    ///
    /// # Errors
    ///
    /// Same as [`Document::snapshot`].
    pub fn rect_snapshot(&self, id: ElementId) -> Result<RectSnapshot, GeometryError> {
        self.snapshot(id).map(|d| d.element)
    }

    // --- internals ---

    fn element_opt(&self, id: ElementId) -> Option<&Element> {
        let el = self.elements.get(id.idx())?.as_ref()?;
        (el.generation == id.generation()).then_some(el)
    }

    fn element_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let el = self.elements.get_mut(id.idx())?.as_mut()?;
        if el.generation != id.generation() {
            return None;
        }
        Some(el)
    }

    fn element(&self, id: ElementId) -> &Element {
        self.elements[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements[id.idx()]
            .as_mut()
            .expect("dangling ElementId")
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.element_mut(parent).children.push(id);
        self.element_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.element_mut(parent).children.retain(|c| *c != id);
        self.element_mut(id).parent = None;
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent_of(id) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }
}
