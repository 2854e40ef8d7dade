use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// Source of the current local time. Injected so "today" can be pinned in tests and replays.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Timestamp stamped on watermark records. Truncated to whole seconds, which is the
    /// precision the persisted log keeps.
    fn run_timestamp(&self) -> NaiveDateTime {
        let now = self.now();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
