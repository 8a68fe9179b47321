use chrono::NaiveTime;

use super::domain::MemberInfo;

/// Business-hours gate with a VIP override.
///
/// A submission is admitted when the time-of-day falls inside the window, bounds included,
/// or when the member is VIP. The calendar date plays no part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHoursPolicy {
    opens_at: NaiveTime,
    closes_at: NaiveTime,
}

impl BusinessHoursPolicy {
    pub fn new(opens_at: NaiveTime, closes_at: NaiveTime) -> Result<Self, PolicyError> {
        if opens_at > closes_at {
            return Err(PolicyError::InvertedWindow {
                opens_at,
                closes_at,
            });
        }
        Ok(Self {
            opens_at,
            closes_at,
        })
    }

    /// The 09:00 to 18:00 window.
    pub fn standard() -> Self {
        Self {
            opens_at: NaiveTime::MIN + chrono::Duration::hours(9),
            closes_at: NaiveTime::MIN + chrono::Duration::hours(18),
        }
    }

    pub fn opens_at(&self) -> NaiveTime {
        self.opens_at
    }

    pub fn closes_at(&self) -> NaiveTime {
        self.closes_at
    }

    pub fn within_hours(&self, now: NaiveTime) -> bool {
        self.opens_at <= now && now <= self.closes_at
    }

    pub fn is_admitted(&self, now: NaiveTime, member: &MemberInfo) -> bool {
        self.within_hours(now) || member.is_vip()
    }
}

impl Default for BusinessHoursPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("business hours open at {opens_at} but close at {closes_at}")]
    InvertedWindow {
        opens_at: NaiveTime,
        closes_at: NaiveTime,
    },
}
