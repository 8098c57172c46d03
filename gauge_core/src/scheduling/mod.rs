//! # Scheduling
//!
//! - **Scheduler**: drives registered nodes through init, tick and shutdown
//! - **SchedulerConfig**: tick rate and signal handling presets
//! - **WallTimer**: fixed-period timer nodes use for periodic work inside `tick`

pub mod config;
pub mod scheduler;
pub mod timer;

pub use config::SchedulerConfig;
pub use scheduler::{Scheduler, StopReason};
pub use timer::WallTimer;
