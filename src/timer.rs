use std::time::{Duration, Instant};

/// A timer that fires at most once. Dropping it cancels it, so whatever owns
/// the timer can never be updated by it after teardown.
#[derive(Debug)]
pub struct OneShot {
    deadline: Instant,
    fired: bool,
}

impl OneShot {
    pub fn schedule(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
            fired: false,
        }
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        !self.fired
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

impl Drop for OneShot {
    fn drop(&mut self) {
        if !self.fired {
            tracing::trace!("one-shot timer cancelled before firing");
        }
    }
}
