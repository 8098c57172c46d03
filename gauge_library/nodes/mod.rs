//! Gauge nodes
//!
//! - `BatteryMonitorNode` - heartbeat publisher and battery gauge hosted in one node
//! - `HeartbeatEmitter` - bounded periodic liveness publisher
//! - `BatteryGaugeConverter` - voltage to percentage republisher
//! - `VoltageSimulatorNode` - synthetic voltage source for local runs
//!
//! ```rust,no_run
//! use gauge_library::nodes::{BatteryMonitorConfig, BatteryMonitorNode};
//!
//! let monitor = BatteryMonitorNode::with_config(BatteryMonitorConfig::named("pack_a")).unwrap();
//! ```

pub mod battery_gauge_converter;
pub mod battery_monitor_node;
pub mod heartbeat_emitter;
pub mod voltage_simulator_node;

pub use battery_gauge_converter::BatteryGaugeConverter;
pub use battery_monitor_node::{BatteryMonitorConfig, BatteryMonitorNode};
pub use heartbeat_emitter::HeartbeatEmitter;
pub use voltage_simulator_node::VoltageSimulatorNode;
