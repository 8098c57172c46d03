//! Pure computational algorithms
//!
//! No I/O here: nodes own the topics and call into these.
//!
//! - **battery_gauge**: voltage bounds and clamped linear percentage conversion
//! - **heartbeat**: bounded emission counter for periodic liveness messages

pub mod battery_gauge;
pub mod heartbeat;
