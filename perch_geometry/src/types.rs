// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document model: element identifiers, flags, local geometry,
//! the viewport, and the page writing direction.

use kurbo::{Rect, Size, Vec2};

/// Identifier for an element in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether an `ElementId` still
/// refers to a live element. Stale ids never alias a different live element because the
/// generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Element flags controlling how document coordinates are derived.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is positioned against the viewport (`position: fixed`).
        ///
        /// Its stored bounds are viewport-relative, so its document offset
        /// follows the current scroll.
        const FIXED = 0b0000_0001;
    }
}

/// Local geometry for an element.
#[derive(Clone, Debug, Default)]
pub struct ElementNode {
    /// Layout box in document coordinates (viewport coordinates for [`ElementFlags::FIXED`]).
    pub bounds: Rect,
    /// Positioning flags.
    pub flags: ElementFlags,
}

impl ElementNode {
    /// An in-flow element occupying `bounds` in document coordinates.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            flags: ElementFlags::empty(),
        }
    }

    /// A viewport-anchored element occupying `bounds` in viewport coordinates.
    pub fn fixed(bounds: Rect) -> Self {
        Self {
            bounds,
            flags: ElementFlags::FIXED,
        }
    }
}

/// The visible, scrollable window area.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Visible size.
    pub size: Size,
    /// Current scroll offset (`x` = horizontal, `y` = vertical).
    pub scroll: Vec2,
}

impl Viewport {
    /// A viewport of the given size, scrolled to the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            scroll: Vec2::ZERO,
        }
    }

    /// The visible area in document coordinates.
    pub fn document_rect(&self) -> Rect {
        Rect::from_origin_size(self.scroll.to_point(), self.size)
    }
}

/// Page writing direction.
///
/// Right-to-left pages mirror the horizontal anchor point of the `top` and
/// default placements.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Direction {
    /// Returns `true` for right-to-left pages.
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}
