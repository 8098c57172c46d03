use super::config::SchedulerConfig;
use crate::core::{Node, NodeInfo, NodeState, TopicMetadata};
use crate::error::{GaugeError, GaugeResult};
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Node registration info with lifecycle tracking
struct RegisteredNode {
    node: Box<dyn Node>,
    priority: u32,
    initialized: bool,
    context: NodeInfo,
}

/// Why a scheduler run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A node returned `TickStatus::Shutdown`
    NodeRequested(String),
    /// `stop()` was called or Ctrl+C was received
    Stopped,
    /// The `run_for` duration elapsed
    TimeLimit,
}

/// Central orchestrator: holds nodes, drives the tick loop.
pub struct Scheduler {
    nodes: Vec<RegisteredNode>,
    running: Arc<AtomicBool>,
    scheduler_name: String,
    config: SchedulerConfig,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty scheduler with the standard configuration.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            running: Arc::new(AtomicBool::new(true)),
            scheduler_name: "DefaultScheduler".to_string(),
            config: SchedulerConfig::standard(),
        }
    }

    /// Apply a configuration to this scheduler (builder pattern)
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set scheduler name (for logging)
    pub fn with_name(mut self, name: &str) -> Self {
        self.scheduler_name = name.to_string();
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Register a node. Lower priority values tick first; equal priorities
    /// keep their registration order.
    ///
    /// # Example
    /// ```ignore
    /// scheduler.add(Box::new(monitor), 0, Some(true));
    /// ```
    pub fn add(
        &mut self,
        node: Box<dyn Node>,
        priority: u32,
        logging_enabled: Option<bool>,
    ) -> &mut Self {
        let node_name = node.name().to_string();
        let logging_enabled = logging_enabled.unwrap_or(false);

        let context = NodeInfo::new(node_name.clone(), logging_enabled);
        self.nodes.push(RegisteredNode {
            node,
            priority,
            initialized: false,
            context,
        });
        self.nodes.sort_by_key(|registered| registered.priority);

        log::info!(
            "[{}] added node '{}' with priority {} (logging: {})",
            self.scheduler_name,
            node_name,
            priority,
            logging_enabled
        );
        self
    }

    /// Check if the scheduler is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the scheduler after the current pass
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Handle that stops this scheduler from another thread
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Names of all registered nodes, in tick order
    pub fn node_names(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|registered| registered.node.name().to_string())
            .collect()
    }

    /// Lifecycle state of a registered node
    pub fn node_state(&self, name: &str) -> Option<NodeState> {
        self.nodes
            .iter()
            .find(|registered| registered.node.name() == name)
            .map(|registered| registered.context.state().clone())
    }

    /// Main loop with signal handling and cleanup
    pub fn run(&mut self) -> GaugeResult<StopReason> {
        self.run_with_limit(None)
    }

    /// Run all nodes for at most `duration`, then shutdown gracefully
    pub fn run_for(&mut self, duration: Duration) -> GaugeResult<StopReason> {
        self.run_with_limit(Some(duration))
    }

    fn run_with_limit(&mut self, duration: Option<Duration>) -> GaugeResult<StopReason> {
        let period = self.config.tick_period()?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| GaugeError::Internal(format!("Failed to create tokio runtime: {}", e)))?;

        if self.config.install_signal_handler {
            let running = self.running.clone();
            if let Err(e) = ctrlc::set_handler(move || {
                eprintln!("{}", "\nCtrl+C received! Shutting down scheduler...".red());
                running.store(false, Ordering::SeqCst);
            }) {
                log::warn!("Failed to set signal handler: {}", e);
            }
        }

        self.running.store(true, Ordering::SeqCst);
        self.init_nodes();

        let reason = rt.block_on(self.tick_loop(period, duration));

        self.shutdown_nodes();
        log::info!("[{}] shutdown complete ({:?})", self.scheduler_name, reason);
        Ok(reason)
    }

    fn init_nodes(&mut self) {
        for registered in self.nodes.iter_mut() {
            if registered.initialized {
                continue;
            }
            let ctx = &mut registered.context;
            ctx.set_state(NodeState::Initializing);
            match registered.node.init(ctx) {
                Ok(()) => {
                    registered.initialized = true;
                    ctx.set_state(NodeState::Running);
                    log::info!(
                        "Initialized node '{}' (publishes: [{}], subscribes: [{}])",
                        ctx.name(),
                        topic_list(registered.node.get_publishers()),
                        topic_list(registered.node.get_subscribers())
                    );
                }
                Err(e) => {
                    ctx.transition_to_error(format!("Initialization failed: {}", e));
                }
            }
        }
    }

    async fn tick_loop(&mut self, period: Duration, duration: Option<Duration>) -> StopReason {
        let start_time = Instant::now();
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            if !self.is_running() {
                return StopReason::Stopped;
            }
            if let Some(max_duration) = duration {
                if start_time.elapsed() >= max_duration {
                    log::info!("Scheduler reached time limit of {:?}", max_duration);
                    return StopReason::TimeLimit;
                }
            }

            interval.tick().await;

            if let Some(requested_by) = self.tick_all() {
                self.stop();
                return StopReason::NodeRequested(requested_by);
            }
        }
    }

    /// One pass over every running node; returns the first node asking to stop.
    /// Remaining nodes still get their tick for this pass.
    fn tick_all(&mut self) -> Option<String> {
        let mut requested_by = None;
        for registered in self.nodes.iter_mut().filter(|r| r.initialized) {
            let ctx = &mut registered.context;
            ctx.start_tick();
            let status = registered.node.tick(Some(&mut *ctx));
            ctx.record_tick();

            if status.is_shutdown() && requested_by.is_none() {
                log::info!("Node '{}' requested shutdown", ctx.name());
                requested_by = Some(ctx.name().to_string());
            }
        }
        requested_by
    }

    fn shutdown_nodes(&mut self) {
        for registered in self.nodes.iter_mut().filter(|r| r.initialized) {
            let ctx = &mut registered.context;
            ctx.set_state(NodeState::Stopping);
            match registered.node.shutdown(ctx) {
                Ok(()) => {
                    ctx.set_state(NodeState::Stopped);
                    log::info!("Shutdown node '{}' successfully", ctx.name());
                }
                Err(e) => ctx.transition_to_error(format!("Shutdown failed: {}", e)),
            }
            registered.initialized = false;
        }
    }
}

fn topic_list(topics: Vec<TopicMetadata>) -> String {
    topics
        .iter()
        .map(|t| t.topic_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
