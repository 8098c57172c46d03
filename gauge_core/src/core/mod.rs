//! # Core types and traits for gauge nodes
//!
//! - **Node**: The trait every computational unit implements
//! - **NodeInfo**: Runtime context handed to nodes (logging, metrics, state)
//! - **TickStatus**: What a node tells the scheduler after each tick
//!
//! ## Node Lifecycle
//!
//! 1. **Construction** - Node is created with its configuration
//! 2. **Initialization** - `init()` is called once by the scheduler
//! 3. **Execution** - `tick()` is called repeatedly until a node asks to stop
//! 4. **Shutdown** - `shutdown()` is called to release resources

pub mod node;
pub mod node_info_ext;

pub use node::{
    LogSummary, Node, NodeInfo, NodeMetrics, NodeState, TickStatus, TopicMetadata,
};
pub use node_info_ext::NodeInfoExt;
