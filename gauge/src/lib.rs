//! # Gauge
//!
//! A battery monitor node: publishes a bounded heartbeat and republishes
//! battery voltage samples as a charge percentage.
//!
//! ```rust,no_run
//! use gauge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut scheduler = Scheduler::new();
//!     scheduler.add(Box::new(BatteryMonitorNode::new()?), 0, Some(true));
//!     scheduler.run()?;
//!     Ok(())
//! }
//! ```

pub mod cli;

pub use gauge_core;
pub use gauge_library as library;

/// Everything needed to assemble and run gauge nodes
pub mod prelude {
    pub use gauge_core::core::{Node, NodeInfo, NodeInfoExt, NodeState, TickStatus};
    pub use gauge_core::communication::Hub;
    pub use gauge_core::error::{GaugeError, GaugeResult};
    pub use gauge_core::params::RuntimeParams;
    pub use gauge_core::scheduling::{Scheduler, SchedulerConfig, StopReason};
    pub type Result<T> = GaugeResult<T>;

    pub use gauge_library::nodes::{
        BatteryGaugeConverter, BatteryMonitorConfig, BatteryMonitorNode, HeartbeatEmitter,
        VoltageSimulatorNode,
    };
    pub use gauge_library::{GaugeReading, SampleStatus, VoltageBounds};

    pub use std::time::{Duration, Instant};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
