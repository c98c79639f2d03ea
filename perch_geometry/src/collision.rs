// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision tests against a bounding container or the viewport.
//!
//! ## Overview
//!
//! [`clearance`] reports, per side, whether the floating element stays inside its
//! boundary. [`is_clear`] reduces that to a single answer for a set of [`Axes`].
//! A restricted test requires *both* sides of its axis to be clear; two failing
//! sides never count as agreement.

use crate::snapshot::{Dimensions, RectSnapshot};

bitflags::bitflags! {
    /// Sides of the floating element that lie inside the boundary.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Clearance: u8 {
        /// Element top is at or below the boundary top.
        const TOP    = 0b0000_0001;
        /// Element bottom is at or above the boundary bottom.
        const BOTTOM = 0b0000_0010;
        /// Element left is at or right of the boundary left.
        const LEFT   = 0b0000_0100;
        /// Element right is at or left of the boundary right.
        const RIGHT  = 0b0000_1000;
        /// Left and right.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Top and bottom.
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

/// Which sides a collision test considers.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axes {
    /// All four sides.
    #[default]
    All,
    /// Left and right only.
    Horizontal,
    /// Top and bottom only.
    Vertical,
}

impl Axes {
    /// Sides that must be clear for this test to pass.
    pub const fn required(self) -> Clearance {
        match self {
            Self::All => Clearance::all(),
            Self::Horizontal => Clearance::HORIZONTAL,
            Self::Vertical => Clearance::VERTICAL,
        }
    }
}

impl Clearance {
    /// Returns `true` when every side required by `axes` is clear.
    pub const fn satisfies(self, axes: Axes) -> bool {
        self.contains(axes.required())
    }
}

/// Per-side clearance of `element` against `boundary`, or the viewport when `None`.
pub fn clearance(element: &Dimensions, boundary: Option<&RectSnapshot>) -> Clearance {
    let el = &element.element;
    let bounds = boundary.unwrap_or(&element.viewport);
    let mut out = Clearance::empty();
    out.set(Clearance::TOP, el.offset.top >= bounds.offset.top);
    out.set(Clearance::BOTTOM, el.bottom() <= bounds.bottom());
    out.set(Clearance::LEFT, el.offset.left >= bounds.offset.left);
    out.set(Clearance::RIGHT, el.right() <= bounds.right());
    out
}

/// Returns `true` when `element` does not collide with `boundary` on `axes`.
///
/// With no boundary the viewport is used.
///
/// ```
/// use perch_geometry::{is_clear, Axes, Dimensions, RectSnapshot};
///
/// let dims = Dimensions {
///     element: RectSnapshot::new(-10.0, 0.0, 50.0, 50.0),
///     viewport: RectSnapshot::new(0.0, 0.0, 800.0, 600.0),
///     ..Default::default()
/// };
/// assert!(!is_clear(&dims, None, Axes::Horizontal));
/// assert!(is_clear(&dims, None, Axes::Vertical));
/// ```
pub fn is_clear(element: &Dimensions, boundary: Option<&RectSnapshot>, axes: Axes) -> bool {
    clearance(element, boundary).satisfies(axes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(left: f64, top: f64, width: f64, height: f64) -> Dimensions {
        Dimensions {
            element: RectSnapshot::new(left, top, width, height),
            parent: RectSnapshot::default(),
            viewport: RectSnapshot::new(0.0, 0.0, 800.0, 600.0),
        }
    }

    #[test]
    fn inside_viewport_is_clear_everywhere() {
        let d = dims(10.0, 10.0, 100.0, 100.0);
        assert_eq!(clearance(&d, None), Clearance::all());
        assert!(is_clear(&d, None, Axes::All));
        assert!(is_clear(&d, None, Axes::Horizontal));
        assert!(is_clear(&d, None, Axes::Vertical));
    }

    #[test]
    fn touching_edges_counts_as_clear() {
        let d = dims(0.0, 0.0, 800.0, 600.0);
        assert!(is_clear(&d, None, Axes::All));
    }

    #[test]
    fn horizontal_requires_both_sides_true() {
        // Wider than the viewport on both sides: left and right both fail.
        let d = dims(-10.0, 10.0, 900.0, 50.0);
        let c = clearance(&d, None);
        assert!(!c.contains(Clearance::LEFT));
        assert!(!c.contains(Clearance::RIGHT));
        assert!(!is_clear(&d, None, Axes::Horizontal));
        // The vertical pair is unaffected.
        assert!(is_clear(&d, None, Axes::Vertical));
    }

    #[test]
    fn vertical_requires_both_sides_true() {
        let d = dims(10.0, -10.0, 50.0, 700.0);
        assert!(!is_clear(&d, None, Axes::Vertical));
        assert!(is_clear(&d, None, Axes::Horizontal));
    }

    #[test]
    fn single_side_collisions() {
        let right = dims(780.0, 10.0, 50.0, 50.0);
        assert_eq!(clearance(&right, None), Clearance::all() - Clearance::RIGHT);
        assert!(!is_clear(&right, None, Axes::Horizontal));
        let bottom = dims(10.0, 580.0, 50.0, 50.0);
        assert!(is_clear(&bottom, None, Axes::Horizontal));
        assert!(!is_clear(&bottom, None, Axes::All));
    }

    #[test]
    fn explicit_boundary_replaces_viewport() {
        let d = dims(150.0, 10.0, 100.0, 50.0);
        let container = RectSnapshot::new(100.0, 0.0, 120.0, 400.0);
        assert!(is_clear(&d, None, Axes::Horizontal));
        assert!(!is_clear(&d, Some(&container), Axes::Horizontal));
    }

    #[test]
    fn scrolled_viewport_is_in_document_space() {
        let mut d = dims(10.0, 1000.0, 50.0, 50.0);
        assert!(!is_clear(&d, None, Axes::Vertical));
        d.viewport.offset.top = 900.0;
        assert!(is_clear(&d, None, Axes::Vertical));
    }
}
