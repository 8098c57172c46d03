use crate::algorithms::battery_gauge::{GaugeReading, VoltageBounds};
use gauge_core::core::NodeInfoExt;
use gauge_core::error::GaugeResult;
use gauge_core::{Hub, NodeInfo};

/// Battery Gauge Converter - turns voltage samples into charge percentages
///
/// Publishes exactly one percentage per sample. Out-of-range samples are
/// published as 0% and additionally logged as a warning.
pub struct BatteryGaugeConverter {
    bounds: VoltageBounds,
    publisher: Hub<f32>,
}

impl BatteryGaugeConverter {
    pub fn new(bounds: VoltageBounds, topic: &str) -> GaugeResult<Self> {
        Self::new_with_capacity(bounds, topic, gauge_core::communication::DEFAULT_QUEUE_DEPTH)
    }

    pub fn new_with_capacity(
        bounds: VoltageBounds,
        topic: &str,
        queue_depth: usize,
    ) -> GaugeResult<Self> {
        Ok(Self {
            bounds,
            publisher: Hub::new_with_capacity(topic, queue_depth)?,
        })
    }

    pub fn on_voltage_sample(&self, voltage: f32, mut ctx: Option<&mut NodeInfo>) -> GaugeReading {
        let reading = self.bounds.convert(voltage);

        if self
            .publisher
            .send(reading.percentage, ctx.as_deref_mut())
            .is_err()
        {
            ctx.log_warning(&format!(
                "Failed to publish battery percentage on '{}'",
                self.publisher.topic_name()
            ));
        }

        ctx.log_info(&format!(
            "Battery Voltage: {:.2}V, Battery Percentage: {:.2}%",
            reading.voltage, reading.percentage
        ));
        if !reading.status.is_in_range() {
            ctx.log_warning(&format!(
                "Voltage sample {:.2}V is {} [{:.2}V, {:.2}V], reporting 0%",
                reading.voltage,
                reading.status,
                self.bounds.min_voltage(),
                self.bounds.max_voltage()
            ));
        }

        reading
    }

    pub fn bounds(&self) -> &VoltageBounds {
        &self.bounds
    }

    pub fn topic(&self) -> &str {
        self.publisher.topic_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::battery_gauge::SampleStatus;

    #[test]
    fn test_publishes_one_percentage_per_sample() {
        let converter =
            BatteryGaugeConverter::new(VoltageBounds::default(), "converter_test/pct").unwrap();
        let observer: Hub<f32> = Hub::new("converter_test/pct").unwrap();

        converter.on_voltage_sample(39.0, None);
        converter.on_voltage_sample(30.0, None);
        converter.on_voltage_sample(42.0, None);

        assert_eq!(observer.recv(None), Some(50.0));
        assert_eq!(observer.recv(None), Some(0.0));
        assert_eq!(observer.recv(None), Some(100.0));
        assert_eq!(observer.recv(None), None);
    }

    #[test]
    fn test_out_of_range_sample_is_flagged() {
        let converter =
            BatteryGaugeConverter::new(VoltageBounds::default(), "converter_test/warn").unwrap();
        let mut ctx = NodeInfo::new("converter_test", false);

        let reading = converter.on_voltage_sample(44.0, Some(&mut ctx));
        assert_eq!(reading.status, SampleStatus::AboveRange);
        assert_eq!(reading.percentage, 0.0);
        assert_eq!(ctx.metrics().warnings_count, 1);

        let reading = converter.on_voltage_sample(38.0, Some(&mut ctx));
        assert!(reading.status.is_in_range());
        assert_eq!(ctx.metrics().warnings_count, 1);
        assert_eq!(ctx.metrics().messages_sent, 2);
    }
}
