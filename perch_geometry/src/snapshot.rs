// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle snapshots in document coordinates.
//!
//! Snapshots are taken fresh for every placement call and discarded afterwards;
//! nothing here caches layout.

use kurbo::{Point, Rect, Size};

/// A top/left position in document coordinates.
///
/// This is the output of [`compute_offset`](crate::compute_offset) and is applied
/// directly as absolute position coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    /// Distance from the document's top edge.
    pub top: f64,
    /// Distance from the document's left edge.
    pub left: f64,
}

impl Offset {
    /// Create an offset.
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    /// The offset as a Kurbo point (`x = left`, `y = top`).
    pub fn to_point(self) -> Point {
        Point::new(self.left, self.top)
    }
}

impl From<Point> for Offset {
    fn from(p: Point) -> Self {
        Self {
            top: p.y,
            left: p.x,
        }
    }
}

/// Width, height, and document offset of one rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RectSnapshot {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Top-left corner in document coordinates.
    pub offset: Offset,
}

impl RectSnapshot {
    /// Create a snapshot from an explicit offset and size.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            offset: Offset { top, left },
        }
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.offset.top + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.offset.left + self.width
    }

    /// The snapshot as a Kurbo rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.offset.to_point(), Size::new(self.width, self.height))
    }
}

impl From<Rect> for RectSnapshot {
    fn from(r: Rect) -> Self {
        Self {
            width: r.width(),
            height: r.height(),
            offset: Offset {
                top: r.y0,
                left: r.x0,
            },
        }
    }
}

/// An element's rectangle together with its container and the viewport.
///
/// Produced by [`Document::snapshot`](crate::Document::snapshot).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Dimensions {
    /// The element itself.
    pub element: RectSnapshot,
    /// The element's immediate container.
    pub parent: RectSnapshot,
    /// The viewport; its offset is the current scroll position.
    pub viewport: RectSnapshot,
}

impl Dimensions {
    /// The same dimensions with the element moved to `offset`.
    ///
    /// Used to test a candidate position without mutating the document.
    #[must_use]
    pub fn moved_to(&self, offset: Offset) -> Self {
        Self {
            element: RectSnapshot {
                offset,
                ..self.element
            },
            ..*self
        }
    }

    /// The same dimensions with the element resized to `width`.
    #[must_use]
    pub fn with_width(&self, width: f64) -> Self {
        Self {
            element: RectSnapshot {
                width,
                ..self.element
            },
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_round_trips_through_snapshot() {
        let r = Rect::new(10.0, 20.0, 60.0, 100.0);
        let s = RectSnapshot::from(r);
        assert_eq!(s.width, 50.0);
        assert_eq!(s.height, 80.0);
        assert_eq!(s.offset, Offset::new(20.0, 10.0));
        assert_eq!(s.rect(), r);
        assert_eq!(s.right(), 60.0);
        assert_eq!(s.bottom(), 100.0);
    }

    #[test]
    fn moved_to_keeps_size_and_context() {
        let dims = Dimensions {
            element: RectSnapshot::new(0.0, 0.0, 40.0, 30.0),
            parent: RectSnapshot::new(0.0, 0.0, 500.0, 500.0),
            viewport: RectSnapshot::new(0.0, 100.0, 800.0, 600.0),
        };
        let moved = dims.moved_to(Offset::new(250.0, 75.0));
        assert_eq!(moved.element, RectSnapshot::new(75.0, 250.0, 40.0, 30.0));
        assert_eq!(moved.parent, dims.parent);
        assert_eq!(moved.viewport, dims.viewport);
    }
}
