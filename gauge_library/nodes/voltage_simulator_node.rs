use crate::algorithms::battery_gauge::VoltageBounds;
use gauge_core::core::{TickStatus, TopicMetadata};
use gauge_core::error::{GaugeError, GaugeResult};
use gauge_core::{Hub, Node, NodeInfo};

/// Voltage Simulator Node - publishes a triangle-wave voltage sweep
///
/// Stands in for a real battery sensor on local runs. The sweep covers the
/// bounds plus `margin` volts on each side, so out-of-range samples show up too.
pub struct VoltageSimulatorNode {
    publisher: Hub<f32>,
    low: f32,
    high: f32,
    step: f32,
    current: f32,
    rising: bool,
}

impl VoltageSimulatorNode {
    /// Sweep `bounds` widened by `margin`, moving `step` volts per tick
    pub fn new(topic: &str, bounds: &VoltageBounds, margin: f32, step: f32) -> GaugeResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(GaugeError::config(format!(
                "simulator step must be positive, got {}",
                step
            )));
        }
        if !margin.is_finite() || margin < 0.0 {
            return Err(GaugeError::config(format!(
                "simulator margin must not be negative, got {}",
                margin
            )));
        }
        let low = bounds.min_voltage() - margin;
        Ok(Self {
            publisher: Hub::new(topic)?,
            low,
            high: bounds.max_voltage() + margin,
            step,
            current: low,
            rising: true,
        })
    }

    /// Next voltage in the sweep
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.current;
        if self.rising {
            self.current += self.step;
            if self.current >= self.high {
                self.current = self.high;
                self.rising = false;
            }
        } else {
            self.current -= self.step;
            if self.current <= self.low {
                self.current = self.low;
                self.rising = true;
            }
        }
        sample
    }
}

impl Node for VoltageSimulatorNode {
    fn name(&self) -> &str {
        "voltage_simulator"
    }

    fn tick(&mut self, ctx: Option<&mut NodeInfo>) -> TickStatus {
        let sample = self.next_sample();
        let _ = self.publisher.send(sample, ctx);
        TickStatus::Continue
    }

    fn get_publishers(&self) -> Vec<TopicMetadata> {
        vec![TopicMetadata::new::<f32>(self.publisher.topic_name())]
    }
}
