use crate::core::node::{LogSummary, NodeInfo};
use crate::error::{GaugeError, GaugeResult};
use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Queue depth used when a topic is opened without an explicit capacity
pub const DEFAULT_QUEUE_DEPTH: usize = 10;

type TopicEntry = Arc<dyn Any + Send + Sync>;

/// Process-wide table of open topics, keyed by name
static TOPICS: Lazy<Mutex<HashMap<String, TopicEntry>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Bounded queue shared by every Hub opened on the same name
struct Topic<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

/// Lock-free counters for Hub monitoring
#[derive(Debug, Default)]
pub struct AtomicHubMetrics {
    pub messages_sent: AtomicU64,
    pub messages_received: AtomicU64,
    pub messages_dropped: AtomicU64,
    pub send_failures: AtomicU64,
}

impl AtomicHubMetrics {
    pub fn snapshot(&self) -> HubMetrics {
        HubMetrics {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubMetrics {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub messages_dropped: u64,
    pub send_failures: u64,
}

/// Handle on a named publish/subscribe topic
///
/// Hubs opened with the same name in one process share a bounded queue.
/// Clones share both the queue and the metrics.
///
/// Delivery is point-to-point: every message is taken by exactly one `recv`,
/// whichever Hub on the topic calls it first. Two readers of one topic split
/// the stream between them instead of each seeing every message, so give
/// each consumer its own topic.
pub struct Hub<T> {
    topic: Arc<Topic<T>>,
    topic_name: String,
    metrics: Arc<AtomicHubMetrics>,
}

impl<T> Clone for Hub<T> {
    fn clone(&self) -> Self {
        Self {
            topic: self.topic.clone(),
            topic_name: self.topic_name.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

// Manual Debug implementation to avoid a T: Debug requirement
impl<T> std::fmt::Debug for Hub<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("topic_name", &self.topic_name)
            .field("pending", &self.topic.rx.len())
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Hub<T> {
    /// Open a topic with the default queue depth
    pub fn new(topic_name: &str) -> GaugeResult<Self> {
        Self::new_with_capacity(topic_name, DEFAULT_QUEUE_DEPTH)
    }

    /// Open a topic, creating it with `capacity` slots if it does not exist yet
    ///
    /// The capacity only applies to the first Hub opened on a name.
    pub fn new_with_capacity(topic_name: &str, capacity: usize) -> GaugeResult<Self> {
        if topic_name.is_empty() {
            return Err(GaugeError::communication("topic name must not be empty"));
        }
        if capacity == 0 {
            return Err(GaugeError::communication(format!(
                "topic '{}' needs a queue depth of at least 1",
                topic_name
            )));
        }

        let mut topics = TOPICS.lock();
        let entry = topics
            .entry(topic_name.to_string())
            .or_insert_with(|| {
                let (tx, rx) = channel::bounded::<T>(capacity);
                Arc::new(Topic { tx, rx }) as TopicEntry
            })
            .clone();
        drop(topics);

        let topic = entry.downcast::<Topic<T>>().map_err(|_| {
            GaugeError::communication(format!(
                "topic '{}' already exists with a different message type than {}",
                topic_name,
                std::any::type_name::<T>()
            ))
        })?;

        Ok(Hub {
            topic,
            topic_name: topic_name.to_string(),
            metrics: Arc::new(AtomicHubMetrics::default()),
        })
    }

    /// Publish a message
    ///
    /// Topics keep the most recent `capacity` messages: when the queue is
    /// full the oldest pending message is dropped to make room.
    pub fn send(&self, msg: T, ctx: Option<&mut NodeInfo>) -> Result<(), T>
    where
        T: LogSummary,
    {
        // Summary is taken before the message moves into the queue
        let summary = ctx.as_ref().map(|_| msg.log_summary());

        let mut msg = msg;
        loop {
            match self.topic.tx.try_send(msg) {
                Ok(()) => break,
                Err(TrySendError::Full(rejected)) => {
                    msg = rejected;
                    if self.topic.rx.try_recv().is_ok() {
                        self.metrics.messages_dropped.fetch_add(1, Ordering::Relaxed);
                    }
                }
                Err(TrySendError::Disconnected(rejected)) => {
                    self.metrics.send_failures.fetch_add(1, Ordering::Relaxed);
                    return Err(rejected);
                }
            }
        }

        self.metrics.messages_sent.fetch_add(1, Ordering::Relaxed);
        if let (Some(ctx), Some(summary)) = (ctx, summary) {
            ctx.log_pub_summary(&self.topic_name, &summary);
        }
        Ok(())
    }

    /// Take the oldest pending message, if any
    pub fn recv(&self, ctx: Option<&mut NodeInfo>) -> Option<T>
    where
        T: LogSummary,
    {
        let msg = self.topic.rx.try_recv().ok()?;
        self.metrics.messages_received.fetch_add(1, Ordering::Relaxed);
        if let Some(ctx) = ctx {
            ctx.log_sub_summary(&self.topic_name, &msg.log_summary());
        }
        Some(msg)
    }

    /// Number of messages waiting on the topic
    pub fn pending(&self) -> usize {
        self.topic.rx.len()
    }

    pub fn capacity(&self) -> usize {
        self.topic.rx.capacity().unwrap_or(0)
    }

    pub fn get_metrics(&self) -> HubMetrics {
        self.metrics.snapshot()
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hubs_with_same_name_share_queue() {
        let publisher: Hub<f32> = Hub::new("hub_test/shared").unwrap();
        let subscriber: Hub<f32> = Hub::new("hub_test/shared").unwrap();

        publisher.send(39.0, None).unwrap();
        publisher.send(40.5, None).unwrap();

        assert_eq!(subscriber.recv(None), Some(39.0));
        assert_eq!(subscriber.recv(None), Some(40.5));
        assert_eq!(subscriber.recv(None), None);
        assert_eq!(publisher.get_metrics().messages_sent, 2);
        assert_eq!(subscriber.get_metrics().messages_received, 2);
    }

    #[test]
    fn test_each_message_is_taken_once() {
        let publisher: Hub<f32> = Hub::new("hub_test/readers").unwrap();
        let first: Hub<f32> = Hub::new("hub_test/readers").unwrap();
        let second: Hub<f32> = Hub::new("hub_test/readers").unwrap();

        publisher.send(50.0, None).unwrap();
        publisher.send(75.0, None).unwrap();

        assert_eq!(first.recv(None), Some(50.0));
        assert_eq!(second.recv(None), Some(75.0));
        assert_eq!(first.recv(None), None);
        assert_eq!(second.recv(None), None);
    }

    #[test]
    fn test_full_queue_keeps_latest() {
        let hub: Hub<String> = Hub::new_with_capacity("hub_test/full", 2).unwrap();
        hub.send("a".to_string(), None).unwrap();
        hub.send("b".to_string(), None).unwrap();
        hub.send("c".to_string(), None).unwrap();

        assert_eq!(hub.pending(), 2);
        assert_eq!(hub.get_metrics().messages_dropped, 1);
        assert_eq!(hub.get_metrics().messages_sent, 3);
        assert_eq!(hub.recv(None), Some("b".to_string()));
        assert_eq!(hub.recv(None), Some("c".to_string()));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let _strings: Hub<String> = Hub::new("hub_test/typed").unwrap();
        let floats = Hub::<f32>::new("hub_test/typed");
        assert!(matches!(floats, Err(GaugeError::Communication(_))));
    }

    #[test]
    fn test_invalid_topic_arguments() {
        assert!(Hub::<f32>::new("").is_err());
        assert!(Hub::<f32>::new_with_capacity("hub_test/zero", 0).is_err());
    }

    #[test]
    fn test_send_with_context_records_traffic() {
        let hub: Hub<f32> = Hub::new("hub_test/ctx").unwrap();
        let mut ctx = NodeInfo::new("hub_tester", false);

        hub.send(1.0, Some(&mut ctx)).unwrap();
        let _ = hub.recv(Some(&mut ctx));

        assert_eq!(ctx.published_topics().get("hub_test/ctx"), Some(&1));
        assert_eq!(ctx.subscribed_topics().get("hub_test/ctx"), Some(&1));
    }
}
