use crate::core::errors::GroupStayError;
use crate::core::models::GroupEvent;
use async_trait::async_trait;

/// Fire-and-forget fan-out to group members. The topic is the group's join
/// code; the transport behind it (websocket hub, message broker) is external.
/// Publish failures must never fail the mutating operation that produced the
/// event — callers log and move on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, event: GroupEvent) -> Result<(), GroupStayError>;
}

pub mod channel;
pub mod in_memory;
