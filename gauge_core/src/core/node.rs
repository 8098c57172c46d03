use crate::error::GaugeResult;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Trait for providing lightweight logging summaries of message types
///
/// Hubs log what they publish and receive through this trait, so large
/// messages can print metadata instead of their whole payload.
pub trait LogSummary {
    /// Return a compact string representation suitable for logging
    fn log_summary(&self) -> String;
}

/// Node states for monitoring and lifecycle management
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Uninitialized,
    Initializing,
    Running,
    Stopping,
    Stopped,
    Error(String),
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Uninitialized => write!(f, "Uninitialized"),
            NodeState::Initializing => write!(f, "Initializing"),
            NodeState::Running => write!(f, "Running"),
            NodeState::Stopping => write!(f, "Stopping"),
            NodeState::Stopped => write!(f, "Stopped"),
            NodeState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Result of a single tick, observed by the scheduler driving the node
///
/// Nodes never stop the process themselves; they return `Shutdown` and the
/// driving loop decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickStatus {
    #[default]
    Continue,
    Shutdown,
}

impl TickStatus {
    pub fn is_shutdown(&self) -> bool {
        matches!(self, TickStatus::Shutdown)
    }
}

/// Performance and traffic counters for a node
#[derive(Debug, Clone, Default)]
pub struct NodeMetrics {
    pub total_ticks: u64,
    pub messages_sent: u64,
    pub messages_received: u64,
    pub warnings_count: u64,
    pub errors_count: u64,
    pub last_tick_duration: Duration,
    pub max_tick_duration: Duration,
}

/// Runtime context the scheduler hands to a node on every call
pub struct NodeInfo {
    name: String,
    logging_enabled: bool,

    state: NodeState,
    metrics: NodeMetrics,
    tick_start_time: Option<Instant>,

    // topic -> message count
    published_topics: HashMap<String, u64>,
    subscribed_topics: HashMap<String, u64>,
}

impl NodeInfo {
    /// Context for `node_name`; with `logging_enabled` false the node stays
    /// silent but its metrics are still counted
    pub fn new(node_name: impl Into<String>, logging_enabled: bool) -> Self {
        Self {
            name: node_name.into(),
            logging_enabled,
            state: NodeState::Uninitialized,
            metrics: NodeMetrics::default(),
            tick_start_time: None,
            published_topics: HashMap::new(),
            subscribed_topics: HashMap::new(),
        }
    }

    // State Management Methods
    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn set_state(&mut self, new_state: NodeState) {
        if self.state != new_state {
            log::debug!(target: self.name.as_str(), "state {} -> {}", self.state, new_state);
            self.state = new_state;
        }
    }

    pub fn transition_to_error(&mut self, error_msg: String) {
        self.log_error(&error_msg);
        self.set_state(NodeState::Error(error_msg));
    }

    // Tick Management
    pub fn start_tick(&mut self) {
        self.tick_start_time = Some(Instant::now());
    }

    pub fn record_tick(&mut self) {
        if let Some(start_time) = self.tick_start_time.take() {
            let duration = start_time.elapsed();
            self.metrics.total_ticks += 1;
            self.metrics.last_tick_duration = duration;
            if duration > self.metrics.max_tick_duration {
                self.metrics.max_tick_duration = duration;
            }
        }
    }

    /// Record an outbound message; used by `Hub::send`
    pub fn log_pub_summary(&mut self, topic: &str, summary: &str) {
        if self.logging_enabled {
            log::debug!(target: self.name.as_str(), "--PUB--> '{}' = {}", topic, summary);
        }
        *self.published_topics.entry(topic.to_string()).or_insert(0) += 1;
        self.metrics.messages_sent += 1;
    }

    /// Record an inbound message; used by `Hub::recv`
    pub fn log_sub_summary(&mut self, topic: &str, summary: &str) {
        if self.logging_enabled {
            log::debug!(target: self.name.as_str(), "<--SUB-- '{}' = {}", topic, summary);
        }
        *self.subscribed_topics.entry(topic.to_string()).or_insert(0) += 1;
        self.metrics.messages_received += 1;
    }

    pub fn log_info(&self, message: &str) {
        if self.logging_enabled {
            log::info!(target: self.name.as_str(), "{}", message);
        }
    }

    pub fn log_warning(&mut self, message: &str) {
        if self.logging_enabled {
            log::warn!(target: self.name.as_str(), "{}", message);
        }
        self.metrics.warnings_count += 1;
    }

    pub fn log_error(&mut self, message: &str) {
        if self.logging_enabled {
            log::error!(target: self.name.as_str(), "{}", message);
        }
        self.metrics.errors_count += 1;
    }

    pub fn log_debug(&self, message: &str) {
        if self.logging_enabled {
            log::debug!(target: self.name.as_str(), "{}", message);
        }
    }

    // Getters
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }
    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }
    pub fn published_topics(&self) -> &HashMap<String, u64> {
        &self.published_topics
    }
    pub fn subscribed_topics(&self) -> &HashMap<String, u64> {
        &self.subscribed_topics
    }
}

/// Topic metadata for introspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMetadata {
    pub topic_name: String,
    pub type_name: String,
}

impl TopicMetadata {
    pub fn new<T>(topic_name: &str) -> Self {
        Self {
            topic_name: topic_name.to_string(),
            type_name: std::any::type_name::<T>().to_string(),
        }
    }
}

/// Trait for gauge nodes with full lifecycle support
pub trait Node: Send {
    /// Get the node's name (must be unique within a scheduler)
    fn name(&self) -> &str;

    /// Initialize the node (called once at startup)
    fn init(&mut self, ctx: &mut NodeInfo) -> GaugeResult<()> {
        ctx.log_info("Node initialized successfully");
        Ok(())
    }

    /// Main execution step (called repeatedly by the scheduler)
    fn tick(&mut self, ctx: Option<&mut NodeInfo>) -> TickStatus;

    /// Shutdown the node (called once at cleanup)
    fn shutdown(&mut self, ctx: &mut NodeInfo) -> GaugeResult<()> {
        ctx.log_info("Node shutdown successfully");
        Ok(())
    }

    /// Get list of publishers (topic metadata)
    fn get_publishers(&self) -> Vec<TopicMetadata> {
        Vec::new()
    }

    /// Get list of subscribers (topic metadata)
    fn get_subscribers(&self) -> Vec<TopicMetadata> {
        Vec::new()
    }
}

// LogSummary implementations for primitive types
impl LogSummary for f32 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for u64 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for String {
    fn log_summary(&self) -> String {
        self.clone()
    }
}
