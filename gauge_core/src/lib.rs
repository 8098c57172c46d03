//! # Gauge Core
//!
//! The node runtime used by the battery gauge workspace.
//!
//! This crate provides the building blocks the gauge nodes are hosted in:
//!
//! - **Nodes**: Independent computational units with an init/tick/shutdown lifecycle
//! - **Communication**: Named in-process topics (`Hub`) for publish/subscribe
//! - **Params**: Declared runtime parameters with YAML loading
//! - **Scheduling**: A tick loop that drives nodes and honors shutdown requests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gauge_core::{Hub, Node, NodeInfo, Scheduler, TickStatus};
//!
//! struct ExampleNode {
//!     output: Hub<String>,
//! }
//!
//! impl Node for ExampleNode {
//!     fn name(&self) -> &str { "example" }
//!
//!     fn tick(&mut self, ctx: Option<&mut NodeInfo>) -> TickStatus {
//!         let _ = self.output.send("alive".to_string(), ctx);
//!         TickStatus::Continue
//!     }
//! }
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add(Box::new(ExampleNode { output: Hub::new("example").unwrap() }), 0, Some(true));
//! scheduler.run().unwrap();
//! ```

pub mod communication;
pub mod core;
pub mod error;
pub mod params;
pub mod scheduling;

// Re-export commonly used types for easy access
pub use communication::Hub;
pub use core::{LogSummary, Node, NodeInfo, NodeInfoExt, NodeState, TickStatus};
pub use error::{GaugeError, GaugeResult};
pub use params::RuntimeParams;
pub use scheduling::{Scheduler, SchedulerConfig, WallTimer};
