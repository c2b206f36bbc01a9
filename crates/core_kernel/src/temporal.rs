//! Simulated-clock time handling
//!
//! The engine never reads wall-clock time. Every operation runs against a
//! simulated clock owned by the registry, advanced only by an explicit
//! external call. Billing cycles step forward in calendar months.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The timestamp type used throughout the engine
pub type Timestamp = DateTime<Utc>;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Clock may not regress: current {current}, requested {requested}")]
    ClockRegression { current: String, requested: String },
}

/// Advances a timestamp by a number of calendar months
pub fn add_months(timestamp: Timestamp, months: u32) -> Timestamp {
    timestamp
        .checked_add_months(Months::new(months))
        .expect("Timestamp out of representable range")
}

/// The simulated clock
///
/// `advance_to` is the only mutation; it never moves backwards, so every
/// timestamp recorded by the engine is monotonically non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    now: Timestamp,
}

impl SimClock {
    /// Creates a clock starting at the given instant
    pub fn starting_at(now: Timestamp) -> Self {
        Self { now }
    }

    /// Returns the current simulated instant
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Advances the clock to the given instant
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::ClockRegression` if the target instant is
    /// earlier than the current one. Advancing to the same instant is a no-op.
    pub fn advance_to(&mut self, target: Timestamp) -> Result<(), TemporalError> {
        if target < self.now {
            return Err(TemporalError::ClockRegression {
                current: self.now.to_string(),
                requested: target.to_string(),
            });
        }
        self.now = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_months_steps_calendar() {
        assert_eq!(add_months(ts(2024, 1, 15), 1), ts(2024, 2, 15));
        assert_eq!(add_months(ts(2024, 11, 15), 3), ts(2025, 2, 15));
        assert_eq!(add_months(ts(2024, 6, 1), 12), ts(2025, 6, 1));
    }

    #[test]
    fn test_add_months_clamps_short_months() {
        let jan31 = Utc.with_ymd_and_hms(2023, 1, 31, 0, 0, 0).unwrap();
        let feb28 = Utc.with_ymd_and_hms(2023, 2, 28, 0, 0, 0).unwrap();
        assert_eq!(add_months(jan31, 1), feb28);
    }

    #[test]
    fn test_clock_advances() {
        let mut clock = SimClock::starting_at(ts(2024, 1, 1));
        clock.advance_to(ts(2024, 3, 1)).unwrap();
        assert_eq!(clock.now(), ts(2024, 3, 1));
    }

    #[test]
    fn test_clock_rejects_regression() {
        let mut clock = SimClock::starting_at(ts(2024, 3, 1));
        let result = clock.advance_to(ts(2024, 1, 1));
        assert!(matches!(result, Err(TemporalError::ClockRegression { .. })));
        assert_eq!(clock.now(), ts(2024, 3, 1));
    }

    #[test]
    fn test_clock_same_instant_is_noop() {
        let mut clock = SimClock::starting_at(ts(2024, 3, 1));
        clock.advance_to(ts(2024, 3, 1)).unwrap();
        assert_eq!(clock.now(), ts(2024, 3, 1));
    }
}
