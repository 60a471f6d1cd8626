//! Once-a-day trigger for the dashboard summary.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Fires on the first check at or after `hour` (local time), once per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    hour: u32,
    last_sent: Option<NaiveDate>,
}

impl DailySchedule {
    #[must_use]
    pub const fn new(hour: u32) -> Self {
        Self {
            hour,
            last_sent: None,
        }
    }

    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    #[must_use]
    pub const fn last_sent(&self) -> Option<NaiveDate> {
        self.last_sent
    }

    /// Whether the summary should go out at `now`.
    #[must_use]
    pub fn due(&self, now: NaiveDateTime) -> bool {
        now.hour() >= self.hour && self.last_sent != Some(now.date())
    }

    pub fn mark_sent(&mut self, now: NaiveDateTime) {
        self.last_sent = Some(now.date());
    }
}
