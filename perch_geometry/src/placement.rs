// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of named placements.
//!
//! ## Class names
//!
//! Widgets attach the placement to the floating element as a class name and read
//! it back later (for example to undo a fallback on close). [`Placement::class_name`]
//! and [`Placement::parse`] convert between the two. Parsing accepts both the
//! space-separated (`"center top"`) and hyphenated (`"center-top"`) spellings.
//! Unknown names are not an error: they parse as [`Placement::Unset`] and use the
//! default formula.

/// Where a floating element sits relative to its anchor (or the viewport).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// No placement attached; behaves like [`Placement::Bottom`].
    #[default]
    Unset,
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor, top edges aligned.
    Left,
    /// Right of the anchor, top edges aligned.
    Right,
    /// Above the anchor, horizontally centered.
    CenterTop,
    /// Below the anchor, horizontally centered.
    CenterBottom,
    /// Left of the anchor, vertically centered.
    CenterLeft,
    /// Right of the anchor, vertically centered.
    CenterRight,
    /// Centered in the viewport.
    Center,
    /// Horizontally centered at the top of the viewport (modal overlays).
    Overlay,
    /// Pinned to the viewport's top-left corner (full-screen overlays).
    OverlayFull,
    /// Below the anchor, left edges aligned.
    LeftBottom,
    /// Below the anchor, right edges aligned.
    RightBottom,
}

impl Placement {
    /// Every placement, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Unset,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::CenterTop,
        Self::CenterBottom,
        Self::CenterLeft,
        Self::CenterRight,
        Self::Center,
        Self::Overlay,
        Self::OverlayFull,
        Self::LeftBottom,
        Self::RightBottom,
    ];

    /// Parse a class name. Unrecognized names yield [`Placement::Unset`].
    pub fn parse(name: &str) -> Self {
        let mut words = name.trim().split(|c: char| c == '-' || c.is_ascii_whitespace());
        let first = words.next().unwrap_or("");
        let second = words.find(|w| !w.is_empty()).unwrap_or("");
        match (first, second) {
            ("top", "") => Self::Top,
            ("bottom", "") => Self::Bottom,
            ("left", "") => Self::Left,
            ("right", "") => Self::Right,
            ("center", "top") => Self::CenterTop,
            ("center", "bottom") => Self::CenterBottom,
            ("center", "left") => Self::CenterLeft,
            ("center", "right") => Self::CenterRight,
            ("center", "") => Self::Center,
            ("overlay", "") => Self::Overlay,
            ("overlay", "full") => Self::OverlayFull,
            ("left", "bottom") => Self::LeftBottom,
            ("right", "bottom") => Self::RightBottom,
            _ => Self::Unset,
        }
    }

    /// The class name attached to the floating element, or `None` when unset.
    pub const fn class_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Unset => return None,
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::CenterTop => "center top",
            Self::CenterBottom => "center bottom",
            Self::CenterLeft => "center left",
            Self::CenterRight => "center right",
            Self::Center => "center",
            Self::Overlay => "overlay",
            Self::OverlayFull => "overlay full",
            Self::LeftBottom => "left bottom",
            Self::RightBottom => "right bottom",
        })
    }

    /// The centered variant used by tooltip-style widgets.
    ///
    /// `Top`, `Left`, and `Right` map to their centered forms; everything else
    /// centers below the anchor.
    pub const fn centered(self) -> Self {
        match self {
            Self::Top | Self::CenterTop => Self::CenterTop,
            Self::Left | Self::CenterLeft => Self::CenterLeft,
            Self::Right | Self::CenterRight => Self::CenterRight,
            _ => Self::CenterBottom,
        }
    }
}

impl From<&str> for Placement {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl core::fmt::Display for Placement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.class_name().unwrap_or(""))
    }
}
