// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor-relative offsets for each named placement.

use crate::placement::Placement;
use crate::snapshot::{Dimensions, Offset, RectSnapshot};
use crate::types::Direction;

/// Compute where the floating element should sit for `placement`.
///
/// `element` supplies the floating element's size and the viewport; `anchor` is the
/// element being pointed at. The result is in document coordinates.
///
/// - `v_offset` and `h_offset` are the gaps between the anchor and the element.
/// - `overflow` pins `left` to `h_offset` for [`Placement::CenterBottom`]; it is set
///   by the full-width fallback.
/// - [`Placement::Top`], [`Placement::Bottom`], and [`Placement::Unset`] mirror the
///   horizontal anchor point under [`Direction::Rtl`].
/// - [`Placement::Center`], [`Placement::Overlay`], and [`Placement::OverlayFull`]
///   ignore the anchor and align against the viewport.
///
/// ```
/// use perch_geometry::{compute_offset, Dimensions, Direction, Placement, RectSnapshot};
///
/// let element = Dimensions {
///     element: RectSnapshot::new(0.0, 0.0, 50.0, 20.0),
///     viewport: RectSnapshot::new(0.0, 0.0, 800.0, 600.0),
///     ..Default::default()
/// };
/// let anchor = RectSnapshot::new(100.0, 200.0, 80.0, 30.0);
///
/// let ltr = compute_offset(&element, &anchor, Placement::Top, 0.0, 0.0, false, Direction::Ltr);
/// let rtl = compute_offset(&element, &anchor, Placement::Top, 0.0, 0.0, false, Direction::Rtl);
/// assert_eq!(ltr.left, 100.0);
/// assert_eq!(rtl.left, 130.0);
/// assert_eq!(ltr.top, 180.0);
/// ```
pub fn compute_offset(
    element: &Dimensions,
    anchor: &RectSnapshot,
    placement: Placement,
    v_offset: f64,
    h_offset: f64,
    overflow: bool,
    direction: Direction,
) -> Offset {
    let el = &element.element;
    let win = &element.viewport;
    let a = anchor;
    // Anchor's right edge minus the element width: the RTL horizontal anchor point.
    let mirrored_left = a.offset.left - el.width + a.width;
    let below = a.offset.top + a.height + v_offset;
    let above = a.offset.top - (el.height + v_offset);
    let centered_left = a.offset.left + a.width / 2.0 - el.width / 2.0;
    let centered_top = a.offset.top + a.height / 2.0 - el.height / 2.0;

    match placement {
        Placement::Top => Offset {
            left: if direction.is_rtl() {
                mirrored_left
            } else {
                a.offset.left
            },
            top: above,
        },
        Placement::Left => Offset {
            left: a.offset.left - (el.width + h_offset),
            top: a.offset.top,
        },
        Placement::Right => Offset {
            left: a.offset.left + a.width + h_offset,
            top: a.offset.top,
        },
        Placement::CenterTop => Offset {
            left: centered_left,
            top: above,
        },
        Placement::CenterBottom => Offset {
            left: if overflow { h_offset } else { centered_left },
            top: below,
        },
        Placement::CenterLeft => Offset {
            left: a.offset.left - (el.width + h_offset),
            top: centered_top,
        },
        Placement::CenterRight => Offset {
            left: a.offset.left + a.width + h_offset,
            top: centered_top,
        },
        Placement::Center => Offset {
            left: win.offset.left + win.width / 2.0 - el.width / 2.0,
            top: win.offset.top + win.height / 2.0 - el.height / 2.0,
        },
        Placement::Overlay => Offset {
            left: (win.width - el.width) / 2.0,
            top: win.offset.top + v_offset,
        },
        Placement::OverlayFull => win.offset,
        Placement::LeftBottom => Offset {
            left: a.offset.left,
            top: below,
        },
        Placement::RightBottom => Offset {
            left: a.offset.left + a.width + h_offset - el.width,
            top: below,
        },
        Placement::Unset | Placement::Bottom => Offset {
            left: if direction.is_rtl() {
                mirrored_left
            } else {
                a.offset.left + h_offset
            },
            top: below,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: f64, height: f64) -> Dimensions {
        Dimensions {
            element: RectSnapshot::new(0.0, 0.0, width, height),
            parent: RectSnapshot::new(0.0, 0.0, 1000.0, 1000.0),
            viewport: RectSnapshot::new(0.0, 40.0, 800.0, 600.0),
        }
    }

    const ANCHOR: RectSnapshot = RectSnapshot::new(100.0, 200.0, 80.0, 30.0);

    fn at(placement: Placement, direction: Direction) -> Offset {
        compute_offset(
            &dims(50.0, 20.0),
            &ANCHOR,
            placement,
            5.0,
            7.0,
            false,
            direction,
        )
    }

    #[test]
    fn rtl_mirrors_top_and_default() {
        assert_eq!(at(Placement::Top, Direction::Ltr).left, 100.0);
        assert_eq!(at(Placement::Top, Direction::Rtl).left, 130.0);
        assert_eq!(at(Placement::Unset, Direction::Ltr).left, 107.0);
        assert_eq!(at(Placement::Unset, Direction::Rtl).left, 130.0);
        assert_eq!(at(Placement::Bottom, Direction::Rtl).left, 130.0);
    }

    #[test]
    fn rtl_leaves_sided_placements_alone() {
        for p in [Placement::Left, Placement::Right, Placement::CenterTop] {
            assert_eq!(at(p, Direction::Ltr), at(p, Direction::Rtl), "{p:?}");
        }
    }

    #[test]
    fn vertical_placements() {
        // above: 200 - (20 + 5)
        assert_eq!(at(Placement::Top, Direction::Ltr).top, 175.0);
        assert_eq!(at(Placement::CenterTop, Direction::Ltr).top, 175.0);
        // below: 200 + 30 + 5
        assert_eq!(at(Placement::Bottom, Direction::Ltr).top, 235.0);
        assert_eq!(at(Placement::LeftBottom, Direction::Ltr).top, 235.0);
        assert_eq!(at(Placement::RightBottom, Direction::Ltr).top, 235.0);
    }

    #[test]
    fn horizontal_placements() {
        assert_eq!(at(Placement::Left, Direction::Ltr), Offset::new(200.0, 43.0));
        assert_eq!(at(Placement::Right, Direction::Ltr), Offset::new(200.0, 187.0));
        assert_eq!(
            at(Placement::CenterLeft, Direction::Ltr),
            Offset::new(205.0, 43.0)
        );
        assert_eq!(
            at(Placement::CenterRight, Direction::Ltr),
            Offset::new(205.0, 187.0)
        );
        // 100 + 80 + 7 - 50
        assert_eq!(at(Placement::RightBottom, Direction::Ltr).left, 137.0);
        assert_eq!(at(Placement::LeftBottom, Direction::Ltr).left, 100.0);
    }

    #[test]
    fn centered_placements_use_anchor_midpoint() {
        assert_eq!(at(Placement::CenterTop, Direction::Ltr).left, 115.0);
        assert_eq!(at(Placement::CenterBottom, Direction::Ltr).left, 115.0);
    }

    #[test]
    fn overflow_pins_center_bottom_left() {
        let o = compute_offset(
            &dims(50.0, 20.0),
            &ANCHOR,
            Placement::CenterBottom,
            5.0,
            7.0,
            true,
            Direction::Ltr,
        );
        assert_eq!(o, Offset::new(235.0, 7.0));
    }

    #[test]
    fn viewport_placements_ignore_anchor() {
        let far = RectSnapshot::new(5000.0, 5000.0, 1.0, 1.0);
        for p in [Placement::Center, Placement::Overlay, Placement::OverlayFull] {
            let near = at(p, Direction::Ltr);
            let moved = compute_offset(&dims(50.0, 20.0), &far, p, 5.0, 7.0, false, Direction::Ltr);
            assert_eq!(near, moved, "{p:?}");
        }
        assert_eq!(at(Placement::Center, Direction::Ltr), Offset::new(330.0, 375.0));
        assert_eq!(at(Placement::Overlay, Direction::Ltr), Offset::new(45.0, 375.0));
        assert_eq!(
            at(Placement::OverlayFull, Direction::Ltr),
            Offset::new(40.0, 0.0)
        );
    }
}
