// Copyright 2025 the Balloon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Balloon Toolbar: show/hide logic for a floating selection toolbar.
//!
//! A contextual toolbar floats next to the user's text selection, offers a
//! handful of editing commands, and gets out of the way the moment it stops
//! being relevant. The hard part is not drawing it — that belongs to the
//! toolbar widget and the shared floating-panel host — but deciding *when*
//! it should be there at all, under a stream of overlapping UI events:
//!
//! - selection changes arrive in rapid bursts while the user drags,
//! - focus moves between the editing surface and the rest of the UI,
//! - the document re-renders and shifts the selection's on-screen geometry,
//! - other features push their own balloons onto the same host.
//!
//! This crate provides that decision logic as a deterministic, caller-driven
//! state machine:
//!
//! - [`VisibilityController`]: the Hidden/Visible state machine with guarded,
//!   idempotent, interceptable show and idempotent hide, plus teardown.
//! - [`Debounce`]: the trailing-edge quiet-window trigger that turns a burst
//!   of selection changes into a single "settled" signal.
//! - [`ToolbarItem`] / [`normalize_config`]: the item model consulted by the
//!   all-disabled guard and the user-facing configuration normalizer.
//! - [`PanelHost`]: the narrow seam to the shared floating-panel service.
//!
//! Anchor geometry and placement preference orderings come from
//! [`balloon_anchor`], whose key types are re-exported here.
//!
//! Like its sibling crates, this one has no event loop and no timers: the
//! host application forwards the events it already receives and supplies
//! millisecond timestamps, which keeps every transition synchronous and
//! testable. See [`VisibilityController`] for the event wiring and a worked
//! example.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
pub mod debounce;
pub mod items;

pub use controller::{
    FLOATING_PANEL_CLASS, Outcome, PanelHost, ShowRequest, Visibility, VisibilityController,
};
pub use debounce::{DEFAULT_QUIET_MS, Debounce};
pub use items::{ItemSpec, SEPARATOR_TOKEN, ToolbarItem, all_disabled, normalize_config};

pub use balloon_anchor::{
    AnchorCorner, ArrowDirection, PanelPosition, PositionRequest, SelectionDirection,
    SelectionSnapshot, anchor_rect, position_request, preferred_positions,
};
