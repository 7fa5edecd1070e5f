use crate::domain_model::FriendshipEvent;
use crate::domain_port::EventPublisher;

/// Writes every event to the log as JSON. The default sink when no outbox is
/// configured.
pub struct LogEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for LogEventPublisher {
    async fn publish(&self, event: &FriendshipEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => tracing::info!(
                event_type = %event.event_type(),
                partition_key = %event.partition_key(),
                payload,
                "friendship event"
            ),
            Err(e) => tracing::warn!(event_type = %event.event_type(), "serialize event: {e}"),
        }
    }
}
