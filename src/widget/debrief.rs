use std::time::{Duration, Instant};

use crate::lesson::DebriefItem;
use crate::timer::OneShot;

pub const STAMP_DELAY: Duration = Duration::from_millis(1500);

/// End-of-lesson reflection. The stamp appears once, shortly after mount.
#[derive(Debug)]
pub struct DebriefBoard {
    items: Vec<DebriefItem>,
    stamp: OneShot,
}

impl DebriefBoard {
    pub fn new(items: Vec<DebriefItem>, mounted_at: Instant) -> Self {
        Self {
            items,
            stamp: OneShot::schedule(mounted_at, STAMP_DELAY),
        }
    }

    pub fn items(&self) -> &[DebriefItem] {
        &self.items
    }

    pub fn is_stamped(&self) -> bool {
        !self.stamp.is_pending()
    }

    /// Time left until the stamp appears; `None` once it has.
    pub fn stamp_due_in(&self, now: Instant) -> Option<Duration> {
        self.stamp.is_pending().then(|| self.stamp.remaining(now))
    }

    /// Returns true when this tick made the stamp appear.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.stamp.poll(now) {
            tracing::debug!("debrief stamped");
            return true;
        }
        false
    }
}
