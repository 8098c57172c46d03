use crate::algorithms::battery_gauge::{VoltageBounds, DEFAULT_MAX_VOLTAGE, DEFAULT_MIN_VOLTAGE};
use crate::algorithms::heartbeat::DEFAULT_EMIT_LIMIT;
use crate::nodes::{BatteryGaugeConverter, HeartbeatEmitter};
use gauge_core::core::{TickStatus, TopicMetadata};
use gauge_core::error::{GaugeError, GaugeResult};
use gauge_core::{Hub, Node, NodeInfo, RuntimeParams, WallTimer};
use std::time::{Duration, Instant};

pub const DEFAULT_NODE_NAME: &str = "battery_monitor";
pub const DEFAULT_VOLTAGE_TOPIC: &str = "battery_voltage";
pub const DEFAULT_PERCENTAGE_TOPIC: &str = "battery_percentage";
pub const DEFAULT_HEARTBEAT_PERIOD: Duration = Duration::from_secs(1);

/// Everything a `BatteryMonitorNode` needs, fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryMonitorConfig {
    pub node_name: String,
    /// Heartbeat channel, named after the node unless overridden
    pub heartbeat_topic: String,
    pub heartbeat_payload: String,
    pub voltage_topic: String,
    pub percentage_topic: String,
    pub heartbeat_period: Duration,
    /// Heartbeats before shutdown is requested; 0 runs forever
    pub heartbeat_limit: u64,
    pub bounds: VoltageBounds,
    pub queue_depth: usize,
}

impl Default for BatteryMonitorConfig {
    fn default() -> Self {
        Self::named(DEFAULT_NODE_NAME)
    }
}

impl BatteryMonitorConfig {
    /// Defaults with the heartbeat topic and payload following `node_name`
    pub fn named(node_name: &str) -> Self {
        Self {
            node_name: node_name.to_string(),
            heartbeat_topic: node_name.to_string(),
            heartbeat_payload: node_name.to_string(),
            voltage_topic: DEFAULT_VOLTAGE_TOPIC.to_string(),
            percentage_topic: DEFAULT_PERCENTAGE_TOPIC.to_string(),
            heartbeat_period: DEFAULT_HEARTBEAT_PERIOD,
            heartbeat_limit: DEFAULT_EMIT_LIMIT,
            bounds: VoltageBounds::default(),
            queue_depth: gauge_core::communication::DEFAULT_QUEUE_DEPTH,
        }
    }

    /// Declare the node's parameters and build a validated config from them
    ///
    /// Parameters: `node_name`, `heartbeat_topic`, `heartbeat_payload`,
    /// `voltage_topic`, `percentage_topic`, `heartbeat_period_ms`,
    /// `heartbeat_limit`, `min_voltage`, `max_voltage`, `queue_depth`.
    pub fn from_params(params: &RuntimeParams) -> GaugeResult<Self> {
        let node_name: String = params.declare("node_name", DEFAULT_NODE_NAME.to_string())?;
        let heartbeat_topic: String = params.declare("heartbeat_topic", node_name.clone())?;
        let heartbeat_payload: String = params.declare("heartbeat_payload", node_name.clone())?;
        let voltage_topic: String =
            params.declare("voltage_topic", DEFAULT_VOLTAGE_TOPIC.to_string())?;
        let percentage_topic: String =
            params.declare("percentage_topic", DEFAULT_PERCENTAGE_TOPIC.to_string())?;
        let period_ms: u64 = params.declare(
            "heartbeat_period_ms",
            DEFAULT_HEARTBEAT_PERIOD.as_millis() as u64,
        )?;
        let heartbeat_limit: u64 = params.declare("heartbeat_limit", DEFAULT_EMIT_LIMIT)?;
        let min_voltage: f32 = params.declare("min_voltage", DEFAULT_MIN_VOLTAGE)?;
        let max_voltage: f32 = params.declare("max_voltage", DEFAULT_MAX_VOLTAGE)?;
        let queue_depth: usize =
            params.declare("queue_depth", gauge_core::communication::DEFAULT_QUEUE_DEPTH)?;

        let config = Self {
            node_name,
            heartbeat_topic,
            heartbeat_payload,
            voltage_topic,
            percentage_topic,
            heartbeat_period: Duration::from_millis(period_ms),
            heartbeat_limit,
            bounds: VoltageBounds::new(min_voltage, max_voltage)?,
            queue_depth,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GaugeResult<()> {
        if self.node_name.is_empty() {
            return Err(GaugeError::config("node_name must not be empty"));
        }
        if self.heartbeat_period.is_zero() {
            return Err(GaugeError::config("heartbeat_period_ms must be greater than zero"));
        }
        if self.queue_depth == 0 {
            return Err(GaugeError::config("queue_depth must be at least 1"));
        }
        let topics = [
            &self.heartbeat_topic,
            &self.voltage_topic,
            &self.percentage_topic,
        ];
        if topics.iter().any(|t| t.is_empty()) {
            return Err(GaugeError::config("topic names must not be empty"));
        }
        if self.voltage_topic == self.percentage_topic {
            return Err(GaugeError::config(format!(
                "voltage_topic and percentage_topic are both '{}'",
                self.voltage_topic
            )));
        }
        Ok(())
    }
}

/// Battery Monitor Node - heartbeat publisher and battery gauge in one node
///
/// Each tick first converts every pending voltage sample, then publishes a
/// heartbeat if the heartbeat timer has expired. The tick returns
/// `TickStatus::Shutdown` when the heartbeat limit is reached.
pub struct BatteryMonitorNode {
    config: BatteryMonitorConfig,
    heartbeat: HeartbeatEmitter,
    gauge: BatteryGaugeConverter,
    voltage_subscriber: Hub<f32>,
    heartbeat_timer: WallTimer,
}

impl BatteryMonitorNode {
    /// Create a node with the default configuration
    pub fn new() -> GaugeResult<Self> {
        Self::with_config(BatteryMonitorConfig::default())
    }

    pub fn with_config(config: BatteryMonitorConfig) -> GaugeResult<Self> {
        config.validate()?;
        Ok(Self {
            heartbeat: HeartbeatEmitter::new_with_capacity(
                &config.heartbeat_topic,
                &config.heartbeat_payload,
                config.heartbeat_limit,
                config.queue_depth,
            )?,
            gauge: BatteryGaugeConverter::new_with_capacity(
                config.bounds,
                &config.percentage_topic,
                config.queue_depth,
            )?,
            voltage_subscriber: Hub::new_with_capacity(&config.voltage_topic, config.queue_depth)?,
            heartbeat_timer: WallTimer::new(config.heartbeat_period)?,
            config,
        })
    }

    pub fn config(&self) -> &BatteryMonitorConfig {
        &self.config
    }

    pub fn heartbeats_sent(&self) -> u64 {
        self.heartbeat.emitted()
    }

    /// One tick against an explicit clock reading
    pub fn step(&mut self, now: Instant, mut ctx: Option<&mut NodeInfo>) -> TickStatus {
        while let Some(voltage) = self.voltage_subscriber.recv(ctx.as_deref_mut()) {
            self.gauge.on_voltage_sample(voltage, ctx.as_deref_mut());
        }

        if self.heartbeat_timer.fire(now) {
            return self.heartbeat.on_timer_tick(ctx);
        }
        TickStatus::Continue
    }
}

impl Node for BatteryMonitorNode {
    fn name(&self) -> &str {
        &self.config.node_name
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> GaugeResult<()> {
        // Heartbeat cadence starts when the node starts running
        self.heartbeat_timer = WallTimer::new(self.config.heartbeat_period)?;
        ctx.log_info(&format!(
            "Battery gauge bounds: {:.2}V - {:.2}V, heartbeat every {:?} on '{}'",
            self.config.bounds.min_voltage(),
            self.config.bounds.max_voltage(),
            self.config.heartbeat_period,
            self.config.heartbeat_topic
        ));
        Ok(())
    }

    fn tick(&mut self, ctx: Option<&mut NodeInfo>) -> TickStatus {
        self.step(Instant::now(), ctx)
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> GaugeResult<()> {
        ctx.log_info(&format!(
            "Shutting down after {} heartbeats",
            self.heartbeat.emitted()
        ));
        Ok(())
    }

    fn get_publishers(&self) -> Vec<TopicMetadata> {
        vec![
            TopicMetadata::new::<String>(self.heartbeat.topic()),
            TopicMetadata::new::<f32>(self.gauge.topic()),
        ]
    }

    fn get_subscribers(&self) -> Vec<TopicMetadata> {
        vec![TopicMetadata::new::<f32>(&self.config.voltage_topic)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(prefix: &str) -> BatteryMonitorConfig {
        BatteryMonitorConfig {
            voltage_topic: format!("{}/voltage", prefix),
            percentage_topic: format!("{}/percentage", prefix),
            ..BatteryMonitorConfig::named(prefix)
        }
    }

    #[test]
    fn test_config_defaults_follow_node_name() {
        let config = BatteryMonitorConfig::named("pack_a");
        assert_eq!(config.heartbeat_topic, "pack_a");
        assert_eq!(config.heartbeat_payload, "pack_a");
        assert_eq!(config.voltage_topic, "battery_voltage");
        assert_eq!(config.percentage_topic, "battery_percentage");
        assert_eq!(config.heartbeat_period, Duration::from_secs(1));
        assert_eq!(config.heartbeat_limit, 10);
    }

    #[test]
    fn test_from_params_declares_defaults() {
        let params = RuntimeParams::new();
        let config = BatteryMonitorConfig::from_params(&params).unwrap();
        assert_eq!(config, BatteryMonitorConfig::default());
        assert_eq!(params.get_f64("min_voltage", 0.0), 36.0);
        assert_eq!(params.get_f64("max_voltage", 0.0), 42.0);
    }

    #[test]
    fn test_from_params_overrides() {
        let params = RuntimeParams::new();
        params.set("node_name", "pack_b").unwrap();
        params.set("min_voltage", 20.0).unwrap();
        params.set("max_voltage", 25.0).unwrap();
        params.set("heartbeat_period_ms", 250).unwrap();

        let config = BatteryMonitorConfig::from_params(&params).unwrap();
        assert_eq!(config.heartbeat_topic, "pack_b");
        assert_eq!(config.bounds, VoltageBounds::new(20.0, 25.0).unwrap());
        assert_eq!(config.heartbeat_period, Duration::from_millis(250));
    }

    #[test]
    fn test_from_params_rejects_inverted_bounds() {
        let params = RuntimeParams::new();
        params.set("min_voltage", 42.0).unwrap();
        params.set("max_voltage", 36.0).unwrap();
        assert!(matches!(
            BatteryMonitorConfig::from_params(&params),
            Err(GaugeError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_shared_topic() {
        let config = BatteryMonitorConfig {
            percentage_topic: "battery_voltage".to_string(),
            ..BatteryMonitorConfig::default()
        };
        assert!(matches!(config.validate(), Err(GaugeError::Config(_))));
    }

    #[test]
    fn test_step_converts_pending_samples_before_heartbeat() {
        let config = test_config("monitor_test/step");
        let voltage_pub: Hub<f32> = Hub::new(&config.voltage_topic).unwrap();
        let percentage_sub: Hub<f32> = Hub::new(&config.percentage_topic).unwrap();
        let heartbeat_sub: Hub<String> = Hub::new(&config.heartbeat_topic).unwrap();
        let mut node = BatteryMonitorNode::with_config(config).unwrap();

        voltage_pub.send(39.0, None).unwrap();
        voltage_pub.send(42.0, None).unwrap();

        // Timer not yet due: samples converted, no heartbeat
        assert_eq!(node.step(Instant::now(), None), TickStatus::Continue);
        assert_eq!(percentage_sub.recv(None), Some(50.0));
        assert_eq!(percentage_sub.recv(None), Some(100.0));
        assert_eq!(heartbeat_sub.pending(), 0);

        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(node.step(later, None), TickStatus::Continue);
        assert_eq!(heartbeat_sub.recv(None).as_deref(), Some("monitor_test/step"));
    }

    #[test]
    fn test_tenth_heartbeat_requests_shutdown() {
        let config = test_config("monitor_test/ten");
        let heartbeat_sub: Hub<String> = Hub::new(&config.heartbeat_topic).unwrap();
        let mut node = BatteryMonitorNode::with_config(config).unwrap();

        let start = Instant::now();
        let statuses: Vec<TickStatus> = (1..=10)
            .map(|second| node.step(start + Duration::from_secs(second), None))
            .collect();

        assert!(statuses[..9].iter().all(|s| *s == TickStatus::Continue));
        assert_eq!(statuses[9], TickStatus::Shutdown);
        assert_eq!(node.heartbeats_sent(), 10);
        assert_eq!(heartbeat_sub.pending(), 10);
    }

    #[test]
    fn test_topic_metadata() {
        let node = BatteryMonitorNode::with_config(test_config("monitor_test/meta")).unwrap();
        let publishers: Vec<String> = node
            .get_publishers()
            .into_iter()
            .map(|m| m.topic_name)
            .collect();
        assert_eq!(publishers, vec!["monitor_test/meta", "monitor_test/meta/percentage"]);
        assert_eq!(node.get_subscribers()[0].topic_name, "monitor_test/meta/voltage");
    }
}
