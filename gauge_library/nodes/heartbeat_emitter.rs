use crate::algorithms::heartbeat::EmitCounter;
use gauge_core::core::{NodeInfoExt, TickStatus};
use gauge_core::error::GaugeResult;
use gauge_core::{Hub, NodeInfo};

/// Heartbeat Emitter - publishes a fixed liveness message on every timer tick
///
/// After `limit` emissions it asks its driver to shut down, once. Ticks that
/// arrive after that publish nothing.
pub struct HeartbeatEmitter {
    publisher: Hub<String>,
    payload: String,
    counter: EmitCounter,
}

impl HeartbeatEmitter {
    pub fn new(topic: &str, payload: &str, limit: u64) -> GaugeResult<Self> {
        Self::new_with_capacity(topic, payload, limit, gauge_core::communication::DEFAULT_QUEUE_DEPTH)
    }

    pub fn new_with_capacity(
        topic: &str,
        payload: &str,
        limit: u64,
        queue_depth: usize,
    ) -> GaugeResult<Self> {
        Ok(Self {
            publisher: Hub::new_with_capacity(topic, queue_depth)?,
            payload: payload.to_string(),
            counter: EmitCounter::new(limit),
        })
    }

    pub fn on_timer_tick(&mut self, mut ctx: Option<&mut NodeInfo>) -> TickStatus {
        if self.counter.is_exhausted() {
            ctx.log_debug("Heartbeat limit already reached, ignoring tick");
            return TickStatus::Continue;
        }

        let message = self.payload.clone();
        ctx.log_info(&format!("'{}'", message));
        if self.publisher.send(message, ctx.as_deref_mut()).is_err() {
            ctx.log_warning(&format!(
                "Failed to publish heartbeat on '{}'",
                self.publisher.topic_name()
            ));
        }

        if self.counter.record_emission() {
            ctx.log_info(&format!(
                "Published {} messages, shutting down.",
                self.counter.count()
            ));
            return TickStatus::Shutdown;
        }
        TickStatus::Continue
    }

    pub fn emitted(&self) -> u64 {
        self.counter.count()
    }

    pub fn counter(&self) -> &EmitCounter {
        &self.counter
    }

    pub fn topic(&self) -> &str {
        self.publisher.topic_name()
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}
