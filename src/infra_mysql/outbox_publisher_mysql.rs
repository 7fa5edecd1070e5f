use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::MySqlPool;
use sqlx::types::JsonValue;
use uuid::Uuid;

/// Appends every event to `friendship_outbox` for a downstream relay. The
/// write happens after the friendship transaction has committed, so a failed
/// append only loses the notification.
pub struct MySqlOutboxPublisher {
    pool: MySqlPool,
}

impl MySqlOutboxPublisher {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlOutboxPublisher { pool }
    }

    async fn append(&self, event: &FriendshipEvent) -> anyhow::Result<Uuid> {
        let event_id = Uuid::new_v4();
        let payload: JsonValue = serde_json::to_value(event)?;

        sqlx::query(
            r#"
INSERT INTO friendship_outbox (event_id, event_type, partition_key, payload, created_at)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(event_id)
        .bind(event.event_type().to_string())
        .bind(event.partition_key())
        .bind(&payload)
        .bind(now_micros())
        .execute(&self.pool)
        .await?;

        Ok(event_id)
    }
}

#[async_trait::async_trait]
impl EventPublisher for MySqlOutboxPublisher {
    async fn publish(&self, event: &FriendshipEvent) {
        match self.append(event).await {
            Ok(event_id) => {
                tracing::debug!(%event_id, event_type = %event.event_type(), "event appended to outbox")
            }
            Err(e) => {
                tracing::warn!(event_type = %event.event_type(), "append event to outbox: {e}")
            }
        }
    }
}
