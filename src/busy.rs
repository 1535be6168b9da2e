//! The busy indicator shown while a network call is outstanding.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// A transient visual signal. The views call [`show`](BusyIndicator::show) before every network
/// call and [`hide`](BusyIndicator::hide) after it.
pub trait BusyIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Shows `indicator` until dropped.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct BusyGuard<'a> {
    indicator: &'a dyn BusyIndicator,
}

impl<'a> BusyGuard<'a> {
    pub fn new(indicator: &'a dyn BusyIndicator) -> Self {
        indicator.show();
        Self { indicator }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

/// Counts outstanding calls. Visible while at least one call is pending.
#[derive(Debug, Clone, Default)]
pub struct CountingBusyIndicator {
    pending: Arc<AtomicUsize>,
    shown: Arc<AtomicUsize>,
}

impl CountingBusyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any call is outstanding.
    pub fn is_visible(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// How many times the indicator was shown in total.
    pub fn times_shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl BusyIndicator for CountingBusyIndicator {
    fn show(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.shown.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        // Saturating: an unmatched hide leaves the counter at zero.
        let _ = self
            .pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}
