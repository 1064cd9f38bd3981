// Copyright 2025 the Balloon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel position vocabulary and the direction-dependent preference orderings.

use crate::SelectionDirection;

/// Corner of the anchor rectangle a balloon panel attaches to.
///
/// The names describe where the panel body sits relative to the anchor:
/// a `SouthEast` panel hangs below the anchor with its arrow on the
/// panel's top edge pointing back up at it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnchorCorner {
    /// Panel above the anchor, aligned to its west end.
    NorthWest,
    /// Panel above the anchor, aligned to its east end.
    NorthEast,
    /// Panel below the anchor, aligned to its west end.
    SouthWest,
    /// Panel below the anchor, aligned to its east end.
    SouthEast,
}

/// Direction the balloon's arrow points, from the panel toward the anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    /// Arrow on the panel's top edge, pointing up.
    North,
    /// Arrow near the panel's top-west corner, pointing up.
    NorthWest,
    /// Arrow near the panel's top-east corner, pointing up.
    NorthEast,
    /// Arrow on the panel's bottom edge, pointing down.
    South,
    /// Arrow near the panel's bottom-west corner, pointing down.
    SouthWest,
    /// Arrow near the panel's bottom-east corner, pointing down.
    SouthEast,
}

/// One candidate placement for the balloon panel.
///
/// The floating-panel host tries candidates in the order given by a
/// [`PositionRequest`](crate::PositionRequest) until one fits the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PanelPosition {
    /// Where the panel body sits relative to the anchor rectangle.
    pub corner: AnchorCorner,
    /// Where the panel's arrow is and which way it points.
    pub arrow: ArrowDirection,
}

impl PanelPosition {
    /// Create a placement candidate.
    pub const fn new(corner: AnchorCorner, arrow: ArrowDirection) -> Self {
        Self { corner, arrow }
    }
}

/// Preference order for backward selections.
///
/// Backward selections end where the user started dragging, near the top of
/// the selected region, so north-anchored placements (arrow pointing south)
/// come first and south-anchored placements are the fallback.
pub const BACKWARD_POSITIONS: [PanelPosition; 6] = [
    PanelPosition::new(AnchorCorner::NorthWest, ArrowDirection::South),
    PanelPosition::new(AnchorCorner::NorthWest, ArrowDirection::SouthWest),
    PanelPosition::new(AnchorCorner::NorthWest, ArrowDirection::SouthEast),
    PanelPosition::new(AnchorCorner::SouthWest, ArrowDirection::North),
    PanelPosition::new(AnchorCorner::SouthWest, ArrowDirection::NorthWest),
    PanelPosition::new(AnchorCorner::SouthWest, ArrowDirection::NorthEast),
];

/// Preference order for forward selections: the mirror image of
/// [`BACKWARD_POSITIONS`], preferring south-anchored placements.
pub const FORWARD_POSITIONS: [PanelPosition; 6] = [
    PanelPosition::new(AnchorCorner::SouthEast, ArrowDirection::North),
    PanelPosition::new(AnchorCorner::SouthEast, ArrowDirection::NorthEast),
    PanelPosition::new(AnchorCorner::SouthEast, ArrowDirection::NorthWest),
    PanelPosition::new(AnchorCorner::NorthEast, ArrowDirection::South),
    PanelPosition::new(AnchorCorner::NorthEast, ArrowDirection::SouthEast),
    PanelPosition::new(AnchorCorner::NorthEast, ArrowDirection::SouthWest),
];

/// The ranked placement list for a selection direction.
pub const fn preferred_positions(direction: SelectionDirection) -> &'static [PanelPosition; 6] {
    match direction {
        SelectionDirection::Backward => &BACKWARD_POSITIONS,
        SelectionDirection::Forward => &FORWARD_POSITIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backward_prefers_north_anchored_placements() {
        for p in &BACKWARD_POSITIONS[..3] {
            assert_eq!(p.corner, AnchorCorner::NorthWest);
        }
        for p in &BACKWARD_POSITIONS[3..] {
            assert_eq!(p.corner, AnchorCorner::SouthWest);
        }
    }

    #[test]
    fn forward_is_the_mirror_ordering() {
        for p in &FORWARD_POSITIONS[..3] {
            assert_eq!(p.corner, AnchorCorner::SouthEast);
        }
        for p in &FORWARD_POSITIONS[3..] {
            assert_eq!(p.corner, AnchorCorner::NorthEast);
        }
    }

    #[test]
    fn preferred_positions_selects_by_direction() {
        assert_eq!(
            preferred_positions(SelectionDirection::Backward),
            &BACKWARD_POSITIONS
        );
        assert_eq!(
            preferred_positions(SelectionDirection::Forward),
            &FORWARD_POSITIONS
        );
    }
}
