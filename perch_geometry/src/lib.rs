// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=perch_geometry --heading-base-level=0

//! Perch Geometry: rectangle snapshots, named placements, and collision tests for floating elements.
//!
//! Perch Geometry is the measuring half of a floating-element placement engine (dropdown panels,
//! tooltip bubbles, submenus).
//!
//! - Snapshots an element, its container, and the viewport in document coordinates.
//! - Computes the anchor-relative offset for each [`Placement`], mirroring the anchor point for
//!   right-to-left pages where the placement calls for it.
//! - Tests a candidate rectangle against the viewport or a bounding container, per side or per axis.
//!
//! ## Not a layout engine
//!
//! This crate does not measure content or run layout. Upstream code owns layout and
//! writes the resulting boxes into a [`Document`]; this crate only reads those boxes back
//! and answers "where should the floating element go" and "does it fit".
//!
//! ## Coordinates
//!
//! Every rectangle is in document coordinates: viewport-relative position plus the current
//! scroll. The viewport snapshot's offset is the scroll position itself. Geometry is read
//! fresh on every [`Document::snapshot`] call and never cached.
//!
//! ## API overview
//!
//! - [`Document`]: page model holding elements, the viewport, and the writing direction.
//! - [`ElementNode`] / [`ElementFlags`]: per-element layout box and positioning flags.
//! - [`Dimensions`] / [`RectSnapshot`] / [`Offset`]: snapshot types.
//! - [`compute_offset`]: one formula per [`Placement`].
//! - [`clearance`] / [`is_clear`]: collision tests, restricted by [`Axes`].
//!
//! ### Minimal usage
//!
//! ```
//! use kurbo::Rect;
//! use perch_geometry::{compute_offset, is_clear, Axes, Document, ElementNode, Placement, Viewport};
//!
//! let mut doc = Document::new(Viewport::new(800.0, 600.0));
//! let button = doc.insert(Some(doc.root()), ElementNode::new(Rect::new(700.0, 20.0, 780.0, 50.0)));
//! let panel = doc.insert(Some(doc.root()), ElementNode::new(Rect::new(0.0, 0.0, 200.0, 120.0)));
//!
//! let dims = doc.snapshot(panel).unwrap();
//! let anchor = doc.snapshot(button).unwrap().element;
//!
//! // Below the button, left-aligned: the panel runs off the right edge.
//! let below = compute_offset(&dims, &anchor, Placement::Bottom, 0.0, 0.0, false, doc.direction());
//! assert!(!is_clear(&dims.moved_to(below), None, Axes::Horizontal));
//!
//! // Below the button, right-aligned: it fits.
//! let right = compute_offset(&dims, &anchor, Placement::RightBottom, 0.0, 0.0, false, doc.direction());
//! assert!(is_clear(&dims.moved_to(right), None, Axes::Horizontal));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collision;
mod document;
mod error;
mod offset;
mod placement;
mod snapshot;
mod types;

pub use collision::{Axes, Clearance, clearance, is_clear};
pub use document::Document;
pub use error::GeometryError;
pub use offset::compute_offset;
pub use placement::Placement;
pub use snapshot::{Dimensions, Offset, RectSnapshot};
pub use types::{Direction, ElementFlags, ElementId, ElementNode, Viewport};
