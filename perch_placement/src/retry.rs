// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retry budget and the fallback table.
//!
//! ## Fallback order
//!
//! Each failed candidate is recorded (an unset placement is recorded as
//! [`Placement::Bottom`]) and the next candidate is chosen from the failed one and the
//! sides already tried:
//!
//! | failed | condition | next |
//! |---|---|---|
//! | unset | `top` untried | `top` |
//! | `top` | `bottom` untried | unset |
//! | `left` | `right` untried | `right` |
//! | `right` | `left` untried | `left` |
//! | unset | `top` tried, `left` untried | `left` |
//! | `top` | `bottom` tried, `left` untried | `left` |
//! | `left` | `right` tried, `bottom` untried | unset |
//! | `right` | `left` tried, `bottom` untried | unset |
//! | anything else | | unset |
//!
//! Starting from an unset placement with every candidate colliding, the walk is
//! unset -> `top` -> `left` -> `right` -> unset, which spends the default budget of four.

use alloc::vec::Vec;

use perch_geometry::Placement;

/// Default number of fallback attempts per open.
pub const DEFAULT_MAX_ATTEMPTS: u8 = 4;

/// Remaining fallback budget and the placements already tried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryState {
    attempts_remaining: u8,
    tried: Vec<Placement>,
}

impl Default for RetryState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl RetryState {
    /// A fresh state with `ceiling` attempts and nothing tried.
    pub fn new(ceiling: u8) -> Self {
        Self {
            attempts_remaining: ceiling,
            tried: Vec::new(),
        }
    }

    /// Restore `ceiling` attempts and forget what was tried.
    pub fn reset(&mut self, ceiling: u8) {
        self.attempts_remaining = ceiling;
        self.tried.clear();
    }

    /// Attempts left before the engine must fall back to full width.
    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    /// Returns `true` once the budget is spent.
    pub fn is_exhausted(&self) -> bool {
        self.attempts_remaining == 0
    }

    /// Distinct placements tried so far, in first-tried order. Unset placements appear as
    /// [`Placement::Bottom`].
    pub fn tried(&self) -> &[Placement] {
        &self.tried
    }

    /// Returns `true` if `placement` has been tried.
    pub fn has_tried(&self, placement: Placement) -> bool {
        self.tried.contains(&placement)
    }

    /// Record `failed`, spend one attempt, and return the next candidate.
    ///
    /// Does nothing but return `failed` when the budget is already spent.
    pub fn advance(&mut self, failed: Placement) -> Placement {
        if self.is_exhausted() {
            return failed;
        }
        let recorded = match failed {
            Placement::Unset => Placement::Bottom,
            other => other,
        };
        if !self.has_tried(recorded) {
            self.tried.push(recorded);
        }
        let next = next_candidate(failed, self);
        self.attempts_remaining -= 1;
        next
    }
}

/// The candidate to try after `failed`, given what `state` has already tried.
///
/// `state` is expected to include `failed` already; see [`RetryState::advance`].
pub fn next_candidate(failed: Placement, state: &RetryState) -> Placement {
    use Placement::{Bottom, Left, Right, Top, Unset};
    let tried = |p| state.has_tried(p);
    match failed {
        // Swap to the opposite side first.
        Unset if !tried(Top) => Top,
        Top if !tried(Bottom) => Unset,
        Left if !tried(Right) => Right,
        Right if !tried(Left) => Left,
        // The opposite side failed too: try left, or clear back toward bottom.
        Unset if tried(Top) && !tried(Left) => Left,
        Top if tried(Bottom) && !tried(Left) => Left,
        Left if tried(Right) && !tried(Bottom) => Unset,
        Right if tried(Left) && !tried(Bottom) => Unset,
        // Every side has been tried, or the placement has no opposite.
        _ => Unset,
    }
}
