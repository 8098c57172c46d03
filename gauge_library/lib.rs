//! # Gauge Library
//!
//! Battery gauge algorithms and the nodes built on them.
//!
//! ```text
//! gauge_library/
//! ── algorithms/     # Pure conversion and counting logic
//! ── nodes/          # Nodes wiring the algorithms to topics
//! ```

pub mod algorithms;
pub mod nodes;

pub use algorithms::battery_gauge::{GaugeReading, SampleStatus, VoltageBounds};
pub use algorithms::heartbeat::EmitCounter;
pub use nodes::*;
