// Copyright 2025 the Balloon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Balloon Anchor: selection-aware positioning input for floating panels.
//!
//! A balloon panel attached to a text selection needs two things from the
//! selection before the host's placement search can run:
//!
//! - An **anchor rectangle**: the on-screen rectangle the panel should point
//!   at. A selection boundary range may span several visual lines and so
//!   yields several rectangles; which one is the anchor depends on the
//!   direction the user made the selection in.
//! - A **ranked list of placements** ([`PanelPosition`]): direction-dependent
//!   preference order the host walks until a candidate fits the viewport.
//!
//! This crate computes both. It owns no view state and performs no placement
//! search; it turns a read-only [`SelectionSnapshot`] plus a caller-supplied
//! geometry provider into a [`PositionRequest`] the host consumes.
//!
//! The anchor is exposed as a zero-argument accessor rather than a cached
//! rectangle: the host re-invokes it on every reposition, so the panel tracks
//! layout shifts (scrolling, reflow) without any re-subscription.
//!
//! # Example
//!
//! ```rust
//! use balloon_anchor::{position_request, SelectionSnapshot, FORWARD_POSITIONS};
//! use kurbo::Rect;
//!
//! // A forward selection whose boundary range is range id 7.
//! let selection = SelectionSnapshot {
//!     is_collapsed: false,
//!     is_backward: false,
//!     first_range: 3_u32,
//!     last_range: 7_u32,
//! };
//!
//! // Geometry provider: the host's "range to client rects" utility.
//! let request = position_request(&selection, |range: &u32| {
//!     assert_eq!(*range, 7); // forward selections anchor on the last range
//!     vec![
//!         Rect::new(0.0, 0.0, 80.0, 16.0),
//!         Rect::new(0.0, 16.0, 40.0, 32.0),
//!     ]
//! });
//!
//! // Forward selections anchor on the last rectangle…
//! assert_eq!((request.target)(), Some(Rect::new(0.0, 16.0, 40.0, 32.0)));
//! // …and prefer south-anchored placements.
//! assert_eq!(request.positions, &FORWARD_POSITIONS);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

mod position;

pub use position::{
    AnchorCorner, ArrowDirection, BACKWARD_POSITIONS, FORWARD_POSITIONS, PanelPosition,
    preferred_positions,
};

/// Direction the user made the active selection in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionDirection {
    /// Selection extends toward the end of the document.
    Forward,
    /// Selection extends toward the start of the document (anchor after focus).
    Backward,
}

impl SelectionDirection {
    /// Derive the direction from the document model's `is_backward` flag.
    pub const fn from_backward(is_backward: bool) -> Self {
        if is_backward {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

/// Read-only snapshot of the document selection.
///
/// `R` is the host's range handle (for example a range id, or a cloneable
/// range value from the document model). The snapshot is queried per event
/// and never stored by this crate; geometry is resolved lazily through the
/// provider passed to [`position_request`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSnapshot<R> {
    /// True when the selection is a caret rather than a range.
    pub is_collapsed: bool,
    /// True when the selection was made from its end toward its start.
    pub is_backward: bool,
    /// The first (document-order) range of the selection.
    pub first_range: R,
    /// The last (document-order) range of the selection.
    pub last_range: R,
}

impl<R> SelectionSnapshot<R> {
    /// Direction of the active selection.
    pub const fn direction(&self) -> SelectionDirection {
        SelectionDirection::from_backward(self.is_backward)
    }

    /// The boundary range the balloon anchors on: the first range for
    /// backward selections (where the drag started), the last otherwise.
    pub const fn boundary_range(&self) -> &R {
        if self.is_backward {
            &self.first_range
        } else {
            &self.last_range
        }
    }
}

/// Pick the anchor rectangle from the boundary range's visual rectangles.
///
/// - Backward: the first rectangle, closest to where the backward drag began.
/// - Forward: the last rectangle, except that a zero-width trailing rectangle
///   is discarded in favor of the second-to-last when more than one rectangle
///   exists. Browsers emit such a rectangle at line wraps but do not render
///   it as selection, so anchoring on it would point the balloon at blank
///   space. A sole zero-width rectangle is kept: there is nothing better.
///
/// Returns `None` when the range yields no rectangles at all.
pub fn anchor_rect(rects: &[Rect], direction: SelectionDirection) -> Option<Rect> {
    match direction {
        SelectionDirection::Backward => rects.first().copied(),
        SelectionDirection::Forward => {
            let last = *rects.last()?;
            if rects.len() > 1 && last.width() == 0.0 {
                Some(rects[rects.len() - 2])
            } else {
                Some(last)
            }
        }
    }
}

/// What the floating-panel host needs to place (or re-place) the balloon.
///
/// `target` is a fresh-geometry accessor: each invocation re-queries the
/// geometry provider, so the host sees current layout even if the document
/// scrolled or reflowed since the request was built. `positions` is one of
/// the two fixed preference orderings.
pub struct PositionRequest<F> {
    /// Lazily evaluated anchor rectangle; `None` when the boundary range
    /// currently yields no rectangles.
    pub target: F,
    /// Ranked placement candidates, best first.
    pub positions: &'static [PanelPosition],
}

impl<F> fmt::Debug for PositionRequest<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionRequest")
            .field("positions", &self.positions)
            .finish_non_exhaustive()
    }
}

/// Build a [`PositionRequest`] for the current selection.
///
/// `geometry` is the host's range-to-rectangles utility (for example, client
/// rects of a DOM range). It is captured by value along with a clone of the
/// boundary range, so the returned accessor stays valid independently of the
/// snapshot and re-resolves geometry on every call.
pub fn position_request<R, G>(
    selection: &SelectionSnapshot<R>,
    geometry: G,
) -> PositionRequest<impl Fn() -> Option<Rect>>
where
    R: Clone,
    G: Fn(&R) -> Vec<Rect>,
{
    let direction = selection.direction();
    let range = selection.boundary_range().clone();
    PositionRequest {
        target: move || anchor_rect(&geometry(&range), direction),
        positions: preferred_positions(direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::Cell;

    fn snapshot(is_backward: bool) -> SelectionSnapshot<u32> {
        SelectionSnapshot {
            is_collapsed: false,
            is_backward,
            first_range: 1,
            last_range: 2,
        }
    }

    #[test]
    fn backward_anchors_on_first_rect() {
        let rects = [
            Rect::new(10.0, 0.0, 90.0, 16.0),
            Rect::new(0.0, 16.0, 90.0, 32.0),
            Rect::new(0.0, 32.0, 40.0, 48.0),
        ];
        assert_eq!(
            anchor_rect(&rects, SelectionDirection::Backward),
            Some(rects[0])
        );
    }

    #[test]
    fn forward_anchors_on_last_rect() {
        let rects = [
            Rect::new(10.0, 0.0, 90.0, 16.0),
            Rect::new(0.0, 16.0, 40.0, 32.0),
        ];
        assert_eq!(
            anchor_rect(&rects, SelectionDirection::Forward),
            Some(rects[1])
        );
    }

    #[test]
    fn forward_discards_zero_width_trailing_rect() {
        // A zero-width rectangle at a line wrap is a rendering artifact, not
        // visible selection; the previous rectangle is the real anchor.
        let rects = [
            Rect::new(10.0, 0.0, 90.0, 16.0),
            Rect::new(0.0, 16.0, 0.0, 32.0),
        ];
        assert_eq!(
            anchor_rect(&rects, SelectionDirection::Forward),
            Some(rects[0])
        );
    }

    #[test]
    fn sole_zero_width_rect_is_kept() {
        let rects = [Rect::new(0.0, 16.0, 0.0, 32.0)];
        assert_eq!(
            anchor_rect(&rects, SelectionDirection::Forward),
            Some(rects[0])
        );
    }

    #[test]
    fn backward_keeps_zero_width_first_rect() {
        // The discard rule is forward-only; backward always takes the first.
        let rects = [
            Rect::new(0.0, 0.0, 0.0, 16.0),
            Rect::new(0.0, 16.0, 40.0, 32.0),
        ];
        assert_eq!(
            anchor_rect(&rects, SelectionDirection::Backward),
            Some(rects[0])
        );
    }

    #[test]
    fn no_rects_yields_no_anchor() {
        assert_eq!(anchor_rect(&[], SelectionDirection::Forward), None);
        assert_eq!(anchor_rect(&[], SelectionDirection::Backward), None);
    }

    #[test]
    fn boundary_range_follows_direction() {
        assert_eq!(*snapshot(true).boundary_range(), 1);
        assert_eq!(*snapshot(false).boundary_range(), 2);
    }

    #[test]
    fn request_uses_first_range_and_backward_list_for_backward_selection() {
        let selection = snapshot(true);
        let request = position_request(&selection, |range: &u32| {
            assert_eq!(*range, 1, "backward selections resolve the first range");
            vec![
                Rect::new(10.0, 0.0, 90.0, 16.0),
                Rect::new(0.0, 16.0, 90.0, 32.0),
                Rect::new(0.0, 32.0, 40.0, 48.0),
            ]
        });
        assert_eq!((request.target)(), Some(Rect::new(10.0, 0.0, 90.0, 16.0)));
        assert_eq!(request.positions, &BACKWARD_POSITIONS);
    }

    #[test]
    fn request_uses_last_range_and_forward_list_for_forward_selection() {
        let selection = snapshot(false);
        let request = position_request(&selection, |range: &u32| {
            assert_eq!(*range, 2, "forward selections resolve the last range");
            vec![Rect::new(0.0, 16.0, 40.0, 32.0)]
        });
        assert_eq!((request.target)(), Some(Rect::new(0.0, 16.0, 40.0, 32.0)));
        assert_eq!(request.positions, &FORWARD_POSITIONS);
    }

    #[test]
    fn target_accessor_sees_fresh_geometry() {
        let selection = snapshot(false);
        let scroll_y = Cell::new(0.0);
        let request = position_request(&selection, |_range: &u32| {
            let dy = scroll_y.get();
            vec![Rect::new(0.0, 16.0 - dy, 40.0, 32.0 - dy)]
        });

        assert_eq!((request.target)(), Some(Rect::new(0.0, 16.0, 40.0, 32.0)));

        // The document scrolls between computation and use; the accessor must
        // reflect the new layout without being rebuilt.
        scroll_y.set(10.0);
        assert_eq!((request.target)(), Some(Rect::new(0.0, 6.0, 40.0, 22.0)));
    }
}
