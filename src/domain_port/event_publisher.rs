use crate::domain_model::FriendshipEvent;

/// Sink for friendship domain events. Fire-and-forget: implementations log
/// their own failures and never fail the operation that produced the event.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &FriendshipEvent);
}
