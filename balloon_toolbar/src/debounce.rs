// Copyright 2025 the Balloon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce as a cancellable deadline.
//!
//! Selection-change notifications arrive in rapid bursts while the user
//! drags; the toolbar should only react once the selection has settled.
//! [`Debounce`] turns the burst into a single "settled" signal: each
//! [`Debounce::notify`] replaces the pending deadline with `now + quiet`,
//! and [`Debounce::poll`] fires exactly once when the deadline passes with
//! no further notification.
//!
//! There is no timer here. Like the rest of this workspace, time is supplied
//! by the host as millisecond timestamps and the host's tick drives `poll`.
//! This keeps the state machine deterministic and makes cancellation trivial:
//! [`Debounce::cancel`] clears the deadline, after which the signal can never
//! fire.
//!
//! ```
//! use balloon_toolbar::debounce::Debounce;
//!
//! let mut debounce = Debounce::new(200);
//! debounce.notify(1000);
//! debounce.notify(1150); // re-arm: the window restarts from the last call
//!
//! assert!(!debounce.poll(1200)); // old deadline, no longer relevant
//! assert!(debounce.poll(1350)); // 200ms after the last notify
//! assert!(!debounce.poll(1400)); // fires at most once per arm
//! ```

/// Quiet window applied when no explicit window is configured, in milliseconds.
pub const DEFAULT_QUIET_MS: u64 = 200;

/// A single pending "settled" signal with a replace-on-re-arm deadline.
///
/// At most one deadline is live at a time; re-arming replaces it and
/// cancellation clears it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debounce {
    quiet: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Create a debounce with the given quiet window in milliseconds.
    pub const fn new(quiet_ms: u64) -> Self {
        Self {
            quiet: quiet_ms,
            deadline: None,
        }
    }

    /// Record a notification at `now`, scheduling the settled signal for
    /// `now + quiet`. Any previously pending deadline is replaced.
    pub fn notify(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.quiet));
    }

    /// Fire the settled signal if its deadline has passed.
    ///
    /// Returns `true` at most once per arm; the deadline is cleared on fire.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Discard any pending signal without firing it.
    ///
    /// Safe to call when nothing is pending.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a settled signal is currently scheduled.
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// The configured quiet window in milliseconds.
    pub const fn quiet(&self) -> u64 {
        self.quiet
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_quiet_window() {
        let mut debounce = Debounce::new(200);
        debounce.notify(1000);

        assert!(!debounce.poll(1100));
        assert!(debounce.poll(1200));
        // Cleared on fire; does not fire again.
        assert!(!debounce.poll(1300));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn rearm_times_from_last_notify() {
        let mut debounce = Debounce::new(200);
        debounce.notify(1000);
        debounce.notify(1050);
        debounce.notify(1150);

        // The window restarts from the last call, so the original deadline
        // passes without firing.
        assert!(!debounce.poll(1200));
        assert!(!debounce.poll(1349));
        assert!(debounce.poll(1350));
    }

    #[test]
    fn burst_yields_exactly_one_signal() {
        let mut debounce = Debounce::new(200);
        let mut fired = 0;
        for t in (1000..1100).step_by(10) {
            debounce.notify(t);
        }
        for t in (1100..2000).step_by(50) {
            if debounce.poll(t) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1, "a burst of notifies settles exactly once");
    }

    #[test]
    fn cancel_discards_pending_signal() {
        let mut debounce = Debounce::new(200);
        debounce.notify(1000);
        debounce.cancel();

        assert!(!debounce.is_pending());
        assert!(!debounce.poll(5000));
    }

    #[test]
    fn cancel_when_idle_is_safe() {
        let mut debounce = Debounce::new(200);
        debounce.cancel();
        assert!(!debounce.poll(1000));
    }

    #[test]
    fn default_uses_standard_quiet_window() {
        let mut debounce = Debounce::default();
        assert_eq!(debounce.quiet(), DEFAULT_QUIET_MS);
        debounce.notify(0);
        assert_eq!(debounce.deadline(), Some(DEFAULT_QUIET_MS));
    }

    #[test]
    fn deadline_saturates_near_the_end_of_time() {
        let mut debounce = Debounce::new(200);
        debounce.notify(u64::MAX - 10);
        assert_eq!(debounce.deadline(), Some(u64::MAX));
        assert!(debounce.poll(u64::MAX));
    }
}
