//! Clock port for obtaining the current time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// Provides the current time.
///
/// Scoring and reports depend on "today"; tests substitute a [`FixedClock`].
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date used for due-date comparisons.
    fn today(&self) -> NaiveDate;

    /// Wall-clock time in the user's timezone, for schedules.
    fn local_now(&self) -> NaiveDateTime;
}

/// Clock backed by the system time. Due dates compare against the local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock fixed at midday UTC of the given date.
    ///
    /// Returns `None` for an invalid calendar date.
    #[must_use]
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// A fixed clock treats UTC as local time.
    fn local_now(&self) -> NaiveDateTime {
        self.0.naive_utc()
    }
}
