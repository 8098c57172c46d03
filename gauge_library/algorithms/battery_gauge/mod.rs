//! Battery gauge: voltage to state-of-charge percentage
//!
//! Linear interpolation between a configured empty and full voltage. Samples
//! outside the bounds read as 0% instead of being extrapolated, so sensor
//! noise past either end never produces a negative or >100% charge.
//!
//! # Example
//!
//! ```rust
//! use gauge_library::algorithms::battery_gauge::{SampleStatus, VoltageBounds};
//!
//! let bounds = VoltageBounds::new(36.0, 42.0).unwrap();
//! assert_eq!(bounds.percentage(39.0), 50.0);
//!
//! let reading = bounds.convert(43.5);
//! assert_eq!(reading.percentage, 0.0);
//! assert_eq!(reading.status, SampleStatus::AboveRange);
//! ```

use gauge_core::error::{GaugeError, GaugeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MIN_VOLTAGE: f32 = 36.0;
pub const DEFAULT_MAX_VOLTAGE: f32 = 42.0;

/// Empty/full voltage pair, validated so that `max_voltage > min_voltage`
///
/// Deserialization goes through `VoltageBounds::new`, so a config file
/// cannot produce bounds the constructor would reject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVoltageBounds")]
pub struct VoltageBounds {
    min_voltage: f32,
    max_voltage: f32,
}

#[derive(Deserialize)]
struct RawVoltageBounds {
    min_voltage: f32,
    max_voltage: f32,
}

impl TryFrom<RawVoltageBounds> for VoltageBounds {
    type Error = GaugeError;

    fn try_from(raw: RawVoltageBounds) -> GaugeResult<Self> {
        Self::new(raw.min_voltage, raw.max_voltage)
    }
}

impl Default for VoltageBounds {
    fn default() -> Self {
        Self {
            min_voltage: DEFAULT_MIN_VOLTAGE,
            max_voltage: DEFAULT_MAX_VOLTAGE,
        }
    }
}

/// Where a sample fell relative to the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStatus {
    InRange,
    BelowRange,
    AboveRange,
    NotANumber,
}

impl SampleStatus {
    pub fn is_in_range(&self) -> bool {
        matches!(self, SampleStatus::InRange)
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleStatus::InRange => write!(f, "in range"),
            SampleStatus::BelowRange => write!(f, "below range"),
            SampleStatus::AboveRange => write!(f, "above range"),
            SampleStatus::NotANumber => write!(f, "not a number"),
        }
    }
}

/// One converted sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReading {
    pub voltage: f32,
    pub percentage: f32,
    pub status: SampleStatus,
}

impl VoltageBounds {
    pub fn new(min_voltage: f32, max_voltage: f32) -> GaugeResult<Self> {
        if !min_voltage.is_finite() || !max_voltage.is_finite() {
            return Err(GaugeError::config(format!(
                "voltage bounds must be finite, got min_voltage={} max_voltage={}",
                min_voltage, max_voltage
            )));
        }
        if max_voltage <= min_voltage {
            return Err(GaugeError::InvalidBounds {
                min: min_voltage,
                max: max_voltage,
            });
        }
        Ok(Self {
            min_voltage,
            max_voltage,
        })
    }

    pub fn min_voltage(&self) -> f32 {
        self.min_voltage
    }

    pub fn max_voltage(&self) -> f32 {
        self.max_voltage
    }

    /// Voltage span between empty and full
    pub fn span(&self) -> f32 {
        self.max_voltage - self.min_voltage
    }

    pub fn classify(&self, voltage: f32) -> SampleStatus {
        if voltage.is_nan() {
            SampleStatus::NotANumber
        } else if voltage < self.min_voltage {
            SampleStatus::BelowRange
        } else if voltage > self.max_voltage {
            SampleStatus::AboveRange
        } else {
            SampleStatus::InRange
        }
    }

    /// Charge percentage for `voltage`; 0.0 for anything outside the bounds
    pub fn percentage(&self, voltage: f32) -> f32 {
        if self.min_voltage <= voltage && voltage <= self.max_voltage {
            (voltage - self.min_voltage) / self.span() * 100.0
        } else {
            0.0
        }
    }

    pub fn convert(&self, voltage: f32) -> GaugeReading {
        GaugeReading {
            voltage,
            percentage: self.percentage(voltage),
            status: self.classify(voltage),
        }
    }
}
