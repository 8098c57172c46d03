use crate::error::{GaugeError, GaugeResult};
use std::time::{Duration, Instant};

/// Fixed-period wall-clock timer
///
/// The first period ends one `period` after creation. `fire` reports at most
/// one expiry per call; periods missed while the caller was busy are dropped
/// rather than replayed.
#[derive(Debug, Clone)]
pub struct WallTimer {
    period: Duration,
    next_due: Instant,
}

impl WallTimer {
    pub fn new(period: Duration) -> GaugeResult<Self> {
        Self::starting_at(period, Instant::now())
    }

    /// Create a timer whose first period starts at `start`
    pub fn starting_at(period: Duration, start: Instant) -> GaugeResult<Self> {
        if period.is_zero() {
            return Err(GaugeError::config("timer period must be greater than zero"));
        }
        let next_due = start
            .checked_add(period)
            .ok_or_else(|| GaugeError::config(format!("timer period {:?} is too long", period)))?;
        Ok(Self { period, next_due })
    }

    /// Returns true if a period has elapsed by `now`, and re-arms the timer
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        // Re-arm on the period grid, skipping every period that already passed
        let late = (now - self.next_due).as_nanos() % self.period.as_nanos();
        let into_period = Duration::from_nanos(u64::try_from(late).unwrap_or(0));
        self.next_due = now + (self.period - into_period);
        true
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next expiry, zero if already due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let start = Instant::now();
        let mut timer = WallTimer::starting_at(Duration::from_secs(1), start).unwrap();

        assert!(!timer.fire(start));
        assert!(!timer.fire(start + Duration::from_millis(999)));
        assert!(timer.fire(start + Duration::from_secs(1)));
        assert!(!timer.fire(start + Duration::from_millis(1500)));
        assert!(timer.fire(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_skips_missed_periods() {
        let start = Instant::now();
        let mut timer = WallTimer::starting_at(Duration::from_secs(1), start).unwrap();

        // Caller stalled for three and a half periods: one expiry, not three
        assert!(timer.fire(start + Duration::from_millis(3500)));
        assert!(!timer.fire(start + Duration::from_millis(3900)));
        assert!(timer.fire(start + Duration::from_secs(4)));
    }

    #[test]
    fn test_long_stall_with_short_period() {
        let start = Instant::now();
        let mut timer = WallTimer::starting_at(Duration::from_nanos(1), start).unwrap();

        let later = start + Duration::from_secs(3600);
        assert!(timer.fire(later));
        assert!(!timer.fire(later));
        assert_eq!(timer.remaining(later), Duration::from_nanos(1));
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let timer = WallTimer::starting_at(Duration::from_secs(1), start).unwrap();
        assert_eq!(timer.remaining(start), Duration::from_secs(1));
        assert_eq!(timer.remaining(start + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(WallTimer::new(Duration::ZERO).is_err());
    }
}
