use crate::domain_model::FriendshipEvent;
use crate::domain_port::EventPublisher;
use std::sync::Mutex;

/// Keeps every published event in order.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<FriendshipEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FriendshipEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: &FriendshipEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(e) => tracing::warn!("recording event publisher poisoned: {e}"),
        }
    }
}
