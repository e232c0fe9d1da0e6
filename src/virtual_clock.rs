// src/virtual_clock.rs
//
// Virtual clock for testing period and trial computations.
// Allows tests to pin "now" without depending on wall-clock time.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

use crate::client_ops::Clock;

/// A clock that can be controlled for testing.
/// Clones share the same instant.
#[derive(Clone)]
pub struct VirtualClock {
    inner: Arc<RwLock<DateTime<Utc>>>,
}

impl VirtualClock {
    /// Create a new virtual clock set to the current real time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Create a virtual clock set to a specific time.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(time)),
        }
    }

    /// Get the current virtual time.
    pub fn now(&self) -> DateTime<Utc> {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Advance time by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.update(|t| *t += duration);
    }

    /// Advance time by the given number of days.
    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }

    /// Set the clock to a specific time.
    pub fn set(&self, time: DateTime<Utc>) {
        self.update(|t| *t = time);
    }

    fn update(&self, f: impl FnOnce(&mut DateTime<Utc>)) {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> DateTime<Utc> {
        VirtualClock::now(self)
    }
}
