// Copyright 2025 the Balloon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visibility state machine for the floating selection toolbar.
//!
//! [`VisibilityController`] owns the Hidden/Visible decision and nothing
//! else: rendering belongs to the toolbar widget, placement search to the
//! floating-panel host. The host application feeds it the UI events it
//! already receives — focus changes, selection changes, document re-renders,
//! and a periodic tick carrying the current time — and the controller talks
//! back to the shared panel host through the narrow [`PanelHost`] seam.
//!
//! Transitions are synchronous: every entry point leaves the controller's
//! core invariant intact, namely that the toolbar view is registered with the
//! panel host exactly when the controller is [`Visibility::Visible`].
//! Registration and deregistration happen inside the transition itself, so
//! there is no half-shown state to observe and no reposition subscription to
//! leak across show/hide cycles; [`VisibilityController::on_render`] simply
//! repositions while visible and is inert otherwise.
//!
//! Showing is guarded and interceptable. A show request first runs an
//! ordered chain of interceptors, any of which can [`Outcome::Stop`] it with
//! no external effect; then the guards drop requests that would produce a
//! useless balloon (already registered, collapsed selection, nothing
//! enabled). All guards are silent no-ops: a toolbar that cannot usefully
//! appear is steady state, not an error.

use alloc::boxed::Box;
use alloc::vec::Vec;

use balloon_anchor::{PositionRequest, SelectionSnapshot, position_request};
use kurbo::Rect;
use smallvec::SmallVec;

use crate::debounce::{DEFAULT_QUIET_MS, Debounce};
use crate::items::{ToolbarItem, all_disabled};

/// Style class the toolbar view is tagged with when added to the panel host.
pub const FLOATING_PANEL_CLASS: &str = "balloon-toolbar-floating";

/// Whether the toolbar is currently registered with the panel host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Not registered; no reposition activity.
    Hidden,
    /// Registered with the panel host and repositioned on re-render.
    Visible,
}

/// Propagation control returned by show interceptors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Let the request continue to later interceptors and the guards.
    Continue,
    /// Suppress the show request; no external effect occurs.
    Stop,
}

/// A show request as seen by interceptors, before any guard has run.
#[derive(Debug)]
pub struct ShowRequest<'a, R> {
    /// The selection the toolbar would attach to.
    pub selection: &'a SelectionSnapshot<R>,
}

/// Narrow seam to the shared floating-panel host.
///
/// The host manages many balloon-like features at once; this controller only
/// ever adds or removes its own view (`V` is the view handle) and checks
/// [`PanelHost::has_view`] before adding to avoid duplicate registration.
/// Placement search against the viewport is entirely the host's concern; it
/// receives the ranked candidates and the lazy anchor accessor in the
/// [`PositionRequest`] and re-invokes the accessor as it sees fit.
pub trait PanelHost<V> {
    /// Whether `view` is currently registered with the host.
    fn has_view(&self, view: &V) -> bool;

    /// Register `view`, to be placed per `request` and tagged with `class`.
    fn add<F: Fn() -> Option<Rect>>(&mut self, view: V, request: PositionRequest<F>, class: &str);

    /// Unregister `view`.
    fn remove(&mut self, view: &V);

    /// Re-place the currently visible view per `request`.
    fn update_position<F: Fn() -> Option<Rect>>(&mut self, request: PositionRequest<F>);

    /// The view currently on top of the host's stack, if any.
    fn visible_view(&self) -> Option<&V>;
}

type ShowInterceptor<R> = Box<dyn FnMut(&ShowRequest<'_, R>) -> Outcome>;

/// Event-driven show/hide state machine for a floating selection toolbar.
///
/// `R` is the document model's range handle; `V` the panel host's view
/// handle. Both are small cloneable handles in the spirit of the generic node
/// keys used across this workspace.
///
/// # Event wiring
///
/// - Editing-surface focus changes → [`Self::on_focus_change`].
/// - Document selection range changes → [`Self::on_selection_change`].
/// - Document re-renders → [`Self::on_render`].
/// - The host's periodic tick (with the current time) → [`Self::tick`],
///   which fires the debounced "selection settled" signal.
///
/// # Example
///
/// ```
/// use balloon_toolbar::{PanelHost, ToolbarItem, VisibilityController};
/// use balloon_anchor::{PositionRequest, SelectionSnapshot};
/// use kurbo::Rect;
///
/// // A minimal single-slot host.
/// #[derive(Default)]
/// struct Host {
///     shown: Option<u32>,
/// }
///
/// impl PanelHost<u32> for Host {
///     fn has_view(&self, view: &u32) -> bool {
///         self.shown == Some(*view)
///     }
///     fn add<F: Fn() -> Option<Rect>>(&mut self, view: u32, _: PositionRequest<F>, _: &str) {
///         self.shown = Some(view);
///     }
///     fn remove(&mut self, view: &u32) {
///         if self.shown == Some(*view) {
///             self.shown = None;
///         }
///     }
///     fn update_position<F: Fn() -> Option<Rect>>(&mut self, _: PositionRequest<F>) {}
///     fn visible_view(&self) -> Option<&u32> {
///         self.shown.as_ref()
///     }
/// }
///
/// let mut host = Host::default();
/// let mut toolbar: VisibilityController<u8, u32> =
///     VisibilityController::new(1, vec![ToolbarItem::with_enabled("bold", true)]);
///
/// let selection = SelectionSnapshot {
///     is_collapsed: false,
///     is_backward: false,
///     first_range: 0_u8,
///     last_range: 0_u8,
/// };
/// let rects = |_: &u8| vec![Rect::new(0.0, 0.0, 40.0, 16.0)];
///
/// // The user selects some text…
/// toolbar.on_focus_change(true, &selection, rects, &mut host);
/// toolbar.on_selection_change(true, &selection, 1000, &mut host);
/// assert!(!toolbar.is_visible()); // direct change hides until settled
///
/// // …and once the selection settles, the toolbar appears.
/// toolbar.tick(1200, &selection, rects, &mut host);
/// assert!(toolbar.is_visible());
/// assert!(host.has_view(&1));
/// ```
pub struct VisibilityController<R, V> {
    view: V,
    items: Vec<ToolbarItem>,
    visibility: Visibility,
    is_focused: bool,
    debounce: Debounce,
    interceptors: SmallVec<[ShowInterceptor<R>; 2]>,
    destroyed: bool,
}

impl<R, V> core::fmt::Debug for VisibilityController<R, V>
where
    V: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityController")
            .field("view", &self.view)
            .field("items", &self.items)
            .field("visibility", &self.visibility)
            .field("is_focused", &self.is_focused)
            .field("debounce", &self.debounce)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl<R, V> VisibilityController<R, V>
where
    R: Clone,
    V: Clone + PartialEq,
{
    /// Create a controller for `view` with the default 200 ms quiet window.
    pub fn new(view: V, items: Vec<ToolbarItem>) -> Self {
        Self::with_quiet_window(view, items, DEFAULT_QUIET_MS)
    }

    /// Create a controller with an explicit quiet window in milliseconds.
    pub fn with_quiet_window(view: V, items: Vec<ToolbarItem>, quiet_ms: u64) -> Self {
        Self {
            view,
            items,
            visibility: Visibility::Hidden,
            is_focused: false,
            debounce: Debounce::new(quiet_ms),
            interceptors: SmallVec::new(),
            destroyed: false,
        }
    }

    /// Register a show interceptor.
    ///
    /// Interceptors run in registration order on every show request, before
    /// the guards; the first [`Outcome::Stop`] suppresses the request with no
    /// external effect. This is the decoration point for features that need
    /// to veto the balloon (for example while another overlay owns the
    /// selection).
    pub fn intercept_show<F>(&mut self, interceptor: F)
    where
        F: FnMut(&ShowRequest<'_, R>) -> Outcome + 'static,
    {
        self.interceptors.push(Box::new(interceptor));
    }

    /// Current visibility state.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the toolbar is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Whether the editing surface was focused at the last focus event.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// The items consulted by the all-disabled guard.
    pub fn items(&self) -> &[ToolbarItem] {
        &self.items
    }

    /// Mutable access to the items, for hosts that track command enablement.
    pub fn items_mut(&mut self) -> &mut Vec<ToolbarItem> {
        &mut self.items
    }

    /// The view handle this controller registers with the panel host.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handle a focus change on the editing surface.
    ///
    /// Gaining focus requests a show (subject to interception and guards).
    /// Losing focus hides immediately, but only when this toolbar is the
    /// host's currently visible view; if another feature's balloon is on
    /// top, its visibility is not this controller's to change.
    pub fn on_focus_change<G, H>(
        &mut self,
        focused: bool,
        selection: &SelectionSnapshot<R>,
        geometry: G,
        host: &mut H,
    ) where
        G: Fn(&R) -> Vec<Rect>,
        H: PanelHost<V>,
    {
        if self.destroyed {
            return;
        }
        self.is_focused = focused;
        if focused {
            self.show(selection, geometry, host);
        } else if host.visible_view() == Some(&self.view) {
            self.hide(host);
        }
    }

    /// Handle a document selection range change.
    ///
    /// A direct (user-initiated) change or a collapse invalidates the current
    /// display and hides immediately. Every change, hiding or not, re-arms
    /// the debounce so that visibility is re-evaluated once the selection
    /// settles — including the hidden-then-settled case.
    pub fn on_selection_change<H>(
        &mut self,
        direct: bool,
        selection: &SelectionSnapshot<R>,
        now: u64,
        host: &mut H,
    ) where
        H: PanelHost<V>,
    {
        if self.destroyed {
            return;
        }
        if direct || selection.is_collapsed {
            self.hide(host);
        }
        self.debounce.notify(now);
    }

    /// Drive the debounce with the current time.
    ///
    /// When the settled signal fires and the surface is focused, a show is
    /// requested. A fire while unfocused is consumed without effect; a later
    /// focus gain requests its own show.
    pub fn tick<G, H>(
        &mut self,
        now: u64,
        selection: &SelectionSnapshot<R>,
        geometry: G,
        host: &mut H,
    ) where
        G: Fn(&R) -> Vec<Rect>,
        H: PanelHost<V>,
    {
        if self.destroyed {
            return;
        }
        if self.debounce.poll(now) && self.is_focused {
            self.show(selection, geometry, host);
        }
    }

    /// Handle a document re-render.
    ///
    /// While visible, the anchor and placement candidates are recomputed and
    /// re-applied; while hidden this is a no-op. Visibility itself acts as
    /// the reposition subscription, so transitioning to Hidden detaches it by
    /// construction.
    pub fn on_render<G, H>(&mut self, selection: &SelectionSnapshot<R>, geometry: G, host: &mut H)
    where
        G: Fn(&R) -> Vec<Rect>,
        H: PanelHost<V>,
    {
        if self.destroyed {
            return;
        }
        if self.is_visible() {
            host.update_position(position_request(selection, geometry));
        }
    }

    /// Request the toolbar to be shown near the current selection.
    ///
    /// Interceptors run first and may suppress the request entirely. The
    /// request is then dropped, silently, when any of these hold:
    ///
    /// - the view is already registered with the host (idempotent),
    /// - the selection is collapsed (a balloon on a caret is meaningless),
    /// - every item is definitely disabled (see
    ///   [`all_disabled`](crate::items::all_disabled)).
    ///
    /// Otherwise the controller transitions to Visible and registers its view
    /// with the host, tagged with [`FLOATING_PANEL_CLASS`].
    pub fn show<G, H>(&mut self, selection: &SelectionSnapshot<R>, geometry: G, host: &mut H)
    where
        G: Fn(&R) -> Vec<Rect>,
        H: PanelHost<V>,
    {
        if self.destroyed {
            return;
        }
        let request = ShowRequest { selection };
        for interceptor in &mut self.interceptors {
            if interceptor(&request) == Outcome::Stop {
                return;
            }
        }
        if self.is_visible() || host.has_view(&self.view) {
            return;
        }
        if selection.is_collapsed {
            return;
        }
        if all_disabled(&self.items) {
            return;
        }
        self.visibility = Visibility::Visible;
        host.add(
            self.view.clone(),
            position_request(selection, geometry),
            FLOATING_PANEL_CLASS,
        );
    }

    /// Hide the toolbar if it is shown.
    ///
    /// Idempotent: when not registered there is no host interaction at all.
    pub fn hide<H>(&mut self, host: &mut H)
    where
        H: PanelHost<V>,
    {
        if self.is_visible() {
            self.visibility = Visibility::Hidden;
            host.remove(&self.view);
        }
    }

    /// Tear the controller down.
    ///
    /// Hides if shown, cancels any pending settled signal (it can never fire
    /// afterward), and drops the interceptor chain. All subsequent events are
    /// inert. Safe to call when the toolbar was never shown, and safe to call
    /// twice.
    pub fn destroy<H>(&mut self, host: &mut H)
    where
        H: PanelHost<V>,
    {
        if self.destroyed {
            return;
        }
        self.hide(host);
        self.debounce.cancel();
        self.interceptors.clear();
        self.destroyed = true;
    }
}
