//! Time remaining until an event starts

use chrono::{DateTime, Utc};

/// Whole days/hours/minutes/seconds left until a target instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// The target is now or in the past
    pub complete: bool,
}

impl Countdown {
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = target - now;
        if remaining.num_milliseconds() <= 0 {
            return Self {
                complete: true,
                ..Self::default()
            };
        }

        let total = remaining.num_seconds();
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
            complete: false,
        }
    }
}
