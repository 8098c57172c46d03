//! Bounded emission counter for heartbeat publishers
//!
//! Counts emissions and reports, exactly once, the emission that reaches the
//! limit. The counter never resets and never goes down.

pub const DEFAULT_EMIT_LIMIT: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitCounter {
    count: u64,
    limit: u64,
}

impl Default for EmitCounter {
    fn default() -> Self {
        Self::new(DEFAULT_EMIT_LIMIT)
    }
}

impl EmitCounter {
    /// A limit of zero means the counter never reports the limit
    pub fn new(limit: u64) -> Self {
        Self { count: 0, limit }
    }

    /// Count one emission. Returns true only on the emission that reaches the limit.
    pub fn record_emission(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.limit != 0 && self.count == self.limit
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// True once the limit has been reached
    pub fn is_exhausted(&self) -> bool {
        self.limit != 0 && self.count >= self.limit
    }

    /// Emissions left before the limit, None when unlimited
    pub fn remaining(&self) -> Option<u64> {
        (self.limit != 0).then(|| self.limit.saturating_sub(self.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_reported_exactly_once() {
        let mut counter = EmitCounter::default();
        let hits: Vec<u64> = (1..=15)
            .filter(|_| counter.record_emission())
            .collect();
        assert_eq!(hits, vec![10]);
        assert_eq!(counter.count(), 15);
    }

    #[test]
    fn test_count_strictly_increasing() {
        let mut counter = EmitCounter::new(3);
        let mut previous = counter.count();
        for _ in 0..5 {
            counter.record_emission();
            assert_eq!(counter.count(), previous + 1);
            previous = counter.count();
        }
    }

    #[test]
    fn test_exhaustion_and_remaining() {
        let mut counter = EmitCounter::new(2);
        assert_eq!(counter.remaining(), Some(2));
        assert!(!counter.record_emission());
        assert!(!counter.is_exhausted());
        assert!(counter.record_emission());
        assert!(counter.is_exhausted());
        assert_eq!(counter.remaining(), Some(0));
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        let mut counter = EmitCounter::new(0);
        assert!((0..100).all(|_| !counter.record_emission()));
        assert!(!counter.is_exhausted());
        assert_eq!(counter.remaining(), None);
    }
}
