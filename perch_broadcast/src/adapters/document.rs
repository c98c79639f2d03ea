// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for the Perch document model.
//!
//! ## Feature
//!
//! Enable with `document_adapter`.
//!
//! ## Notes
//!
//! [`Document`] implements [`ParentLookup`], so mutation records targeting a
//! descendant reach the closest tagged ancestor. [`viewport_event`] reads the
//! payload a host would report with a native resize or scroll.

use perch_geometry::{Document, ElementId};

use crate::types::{ParentLookup, ViewportEvent};

impl ParentLookup<ElementId> for Document {
    fn parent_of(&self, node: &ElementId) -> Option<ElementId> {
        Self::parent_of(self, *node)
    }
}

/// Current viewport state of `doc`, as carried by resize and scroll notifications.
pub fn viewport_event(doc: &Document) -> ViewportEvent {
    let vp = doc.viewport();
    ViewportEvent {
        width: vp.size.width,
        height: vp.size.height,
        scroll_x: vp.scroll.x,
        scroll_y: vp.scroll.y,
    }
}
