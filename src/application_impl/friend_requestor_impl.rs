use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct RealFriendRequestor {
    member_directory: Arc<dyn MemberDirectory>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    event_publisher: Arc<dyn EventPublisher>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealFriendRequestor {
    pub fn new(
        member_directory: Arc<dyn MemberDirectory>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        event_publisher: Arc<dyn EventPublisher>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            member_directory,
            friendship_repo,
            event_publisher,
            tx_manager,
        }
    }

    /// Returns the row and whether this call moved it to pending.
    async fn send_internal(
        &self,
        command: &FriendRequestCommand,
    ) -> Result<(Friendship, bool), FriendshipError> {
        self.member_directory
            .get_active_member(command.from_member_id())
            .await?;
        self.member_directory
            .get_active_member(command.to_member_id())
            .await?;

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| FriendshipError::Store(e.to_string()))?;
        let now = now_micros();

        let (friendship, changed) = match self
            .friendship_repo
            .find_by_pair_in_tx(&mut *tx, command.relationship())
            .await?
        {
            None => {
                let friendship = Friendship::request(command.relationship(), now);
                self.friendship_repo
                    .insert_in_tx(&mut *tx, &friendship)
                    .await?;
                (friendship, true)
            }
            Some(mut existing) if existing.status().is_terminal() => {
                existing.revive(now)?;
                self.friendship_repo
                    .update_status_in_tx(&mut *tx, &existing)
                    .await?;
                (existing, true)
            }
            // pending or accepted already reflects the request
            Some(existing) => (existing, false),
        };

        tx.commit()
            .await
            .map_err(|e| FriendshipError::Store(e.to_string()))?;

        Ok((friendship, changed))
    }
}

#[async_trait::async_trait]
impl FriendRequestor for RealFriendRequestor {
    async fn send_friend_request(
        &self,
        command: FriendRequestCommand,
    ) -> Result<Friendship, FriendRequestError> {
        match self.send_internal(&command).await {
            Ok((friendship, true)) => {
                tracing::info!(
                    friendship_id = %friendship.id(),
                    from = %command.from_member_id(),
                    to = %command.to_member_id(),
                    "friend request sent"
                );
                let event = FriendshipEvent::FriendRequestSent(FriendRequestSent {
                    friendship_id: friendship.id(),
                    from_member_id: command.from_member_id(),
                    to_member_id: command.to_member_id(),
                    to_display_name: command.to_display_name().to_owned(),
                });
                self.event_publisher.publish(&event).await;
                Ok(friendship)
            }
            Ok((friendship, false)) => {
                tracing::debug!(
                    friendship_id = %friendship.id(),
                    status = %friendship.status(),
                    "friend request already in place"
                );
                Ok(friendship)
            }
            Err(e) => {
                tracing::warn!(
                    from = %command.from_member_id(),
                    to = %command.to_member_id(),
                    "send friend request: {e}"
                );
                Err(e.into())
            }
        }
    }
}
