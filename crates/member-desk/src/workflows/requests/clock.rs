use chrono::{Local, NaiveTime};

/// Source of the current time-of-day used for gating.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// Reads the host's local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Always reports the same time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveTime);

impl FixedClock {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Returns `None` for an out-of-range hour/minute/second.
    pub fn at(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}
