use crate::core::errors::GroupStayError;
use crate::core::models::GroupEvent;
use crate::infrastructure::notify::Notifier;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Records everything published, in publish order. Used by tests to assert
/// fan-out content and per-group ordering.
pub struct InMemoryNotifier {
    events: Mutex<Vec<(String, GroupEvent)>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        InMemoryNotifier {
            events: Mutex::new(Vec::new()),
        }
    }

    pub async fn events(&self) -> Vec<(String, GroupEvent)> {
        self.events.lock().await.clone()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn publish(&self, topic: &str, event: GroupEvent) -> Result<(), GroupStayError> {
        self.events.lock().await.push((topic.to_string(), event));
        Ok(())
    }
}
