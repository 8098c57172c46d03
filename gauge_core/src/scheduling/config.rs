use crate::error::{GaugeError, GaugeResult};
use std::time::Duration;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Rate at which every node is ticked
    pub global_rate_hz: f64,
    /// Install a Ctrl+C handler that stops the tick loop
    pub install_signal_handler: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SchedulerConfig {
    /// 100 Hz with Ctrl+C handling, for normal runs
    pub fn standard() -> Self {
        Self {
            global_rate_hz: 100.0,
            install_signal_handler: true,
        }
    }

    /// 1 kHz without signal handling, for tests that run many schedulers in one process
    pub fn testing() -> Self {
        Self {
            global_rate_hz: 1000.0,
            install_signal_handler: false,
        }
    }

    pub fn with_rate(mut self, rate_hz: f64) -> Self {
        self.global_rate_hz = rate_hz;
        self
    }

    pub fn validate(&self) -> GaugeResult<()> {
        self.tick_period().map(|_| ())
    }

    /// Time between two passes over the node list
    ///
    /// Rates whose period rounds to zero or does not fit a `Duration` are
    /// configuration errors.
    pub fn tick_period(&self) -> GaugeResult<Duration> {
        if !self.global_rate_hz.is_finite() || self.global_rate_hz <= 0.0 {
            return Err(GaugeError::config(format!(
                "scheduler rate must be a positive number of Hz, got {}",
                self.global_rate_hz
            )));
        }
        match Duration::try_from_secs_f64(1.0 / self.global_rate_hz) {
            Ok(period) if !period.is_zero() => Ok(period),
            _ => Err(GaugeError::config(format!(
                "scheduler rate of {} Hz gives no usable tick period",
                self.global_rate_hz
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_period_from_rate() {
        let config = SchedulerConfig::standard().with_rate(50.0);
        assert_eq!(config.tick_period().unwrap(), Duration::from_millis(20));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(SchedulerConfig::standard().with_rate(0.0).validate().is_err());
        assert!(SchedulerConfig::standard().with_rate(-5.0).validate().is_err());
        assert!(SchedulerConfig::standard().with_rate(f64::NAN).validate().is_err());
        assert!(SchedulerConfig::testing().validate().is_ok());
    }

    #[test]
    fn test_rejects_rate_too_high_for_a_period() {
        let config = SchedulerConfig::testing().with_rate(1e10);
        assert!(matches!(config.tick_period(), Err(GaugeError::Config(_))));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_rate_too_low_for_a_period() {
        let config = SchedulerConfig::testing().with_rate(1e-20);
        assert!(matches!(config.tick_period(), Err(GaugeError::Config(_))));
        assert!(config.validate().is_err());
    }
}
