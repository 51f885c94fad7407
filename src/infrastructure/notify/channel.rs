use crate::core::errors::GroupStayError;
use crate::core::models::GroupEvent;
use crate::infrastructure::notify::Notifier;
use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::info;

/// Outbound event envelope: topic plus payload.
pub type Envelope = (String, GroupEvent);

/// Notifier that appends events to an unbounded channel drained by a separate
/// publisher task, so a slow or failing transport never blocks the mutating
/// operation. Events for one group are sent inside that group's critical
/// section, which makes channel order match serialization order.
pub struct ChannelNotifier {
    tx: UnboundedSender<Envelope>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }

    /// Drain the channel into the log. Stands in for the broker bridge; a real
    /// deployment would forward each envelope to the external transport here.
    pub fn spawn_logging_publisher(mut rx: UnboundedReceiver<Envelope>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some((topic, event)) = rx.recv().await {
                let payload = serde_json::to_string(&event).unwrap_or_default();
                info!(
                    topic = %topic,
                    event_type = event.event_type.as_str(),
                    payload = %payload,
                    "{}",
                    event.message
                );
            }
        })
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn publish(&self, topic: &str, event: GroupEvent) -> Result<(), GroupStayError> {
        self.tx
            .send((topic.to_string(), event))
            .map_err(|e| GroupStayError::NotificationError(e.to_string()))
    }
}
