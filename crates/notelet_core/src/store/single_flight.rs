//! Mutual-exclusion token coalescing overlapping refreshes.

use std::cell::Cell;

/// Single-flight token: at most one holder at a time. A second `begin`
/// while a flight is active yields `None`, which callers report as a
/// coalesced outcome instead of starting a duplicate fetch.
#[derive(Debug, Default)]
pub struct SingleFlight {
    active: Cell<bool>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the token. The returned guard releases it on drop, so every
    /// exit path of the flight (including errors) ends the exclusion.
    pub fn begin(&self) -> Option<FlightGuard<'_>> {
        if self.active.get() {
            return None;
        }
        self.active.set(true);
        Some(FlightGuard { active: &self.active })
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Active-flight guard handed out by [`SingleFlight::begin`].
#[derive(Debug)]
pub struct FlightGuard<'a> {
    active: &'a Cell<bool>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.active.set(false);
    }
}
