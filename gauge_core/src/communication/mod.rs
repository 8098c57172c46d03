//! # Communication layer
//!
//! Named in-process topics for publish/subscribe between nodes:
//!
//! ```rust,no_run
//! use gauge_core::communication::Hub;
//! let hub: Hub<f32> = Hub::new("battery_voltage").unwrap();
//! hub.send(39.0, None).unwrap();
//! ```

pub mod hub;

pub use hub::{Hub, HubMetrics, DEFAULT_QUEUE_DEPTH};
