//! Calendar-day clock used by the reminder engine.

use chrono::{FixedOffset, Local, NaiveDate, Utc};

/// Source of "today" as a calendar day.
///
/// The time of day is discarded so that day arithmetic never depends on
/// when during the day a cycle runs.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time.
///
/// Uses the host's local timezone unless a fixed UTC offset is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    utc_offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Clock in the host's local timezone.
    pub fn local() -> Self {
        Self { utc_offset: None }
    }

    /// Clock pinned to a fixed offset from UTC, in minutes.
    ///
    /// Returns `None` if the offset is outside +/- 24 hours.
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self {
            utc_offset: Some(offset),
        })
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.utc_offset {
            Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}

/// Clock frozen on a given day. Used by tests and manual replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(FixedClock(day).today(), day);
    }

    #[test]
    fn test_offset_bounds() {
        assert!(SystemClock::with_offset_minutes(180).is_some());
        assert!(SystemClock::with_offset_minutes(-300).is_some());
        assert!(SystemClock::with_offset_minutes(24 * 60).is_none());
        assert!(SystemClock::with_offset_minutes(i32::MAX).is_none());
    }

    #[test]
    fn test_offset_clock_is_within_a_day_of_utc() {
        let utc_today = Utc::now().date_naive();
        let east = SystemClock::with_offset_minutes(14 * 60).unwrap().today();
        let west = SystemClock::with_offset_minutes(-12 * 60).unwrap().today();
        assert!((east - utc_today).num_days().abs() <= 1);
        assert!((west - utc_today).num_days().abs() <= 1);
    }
}
