use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct RealFriendshipTerminator {
    member_directory: Arc<dyn MemberDirectory>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    event_publisher: Arc<dyn EventPublisher>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealFriendshipTerminator {
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

    /// Returns how many directional rows were dissolved (0 to 2).
    async fn unfriend_internal(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<usize, FriendshipError> {
        let relationship = Relationship::new(member_id, friend_member_id)?;
        self.member_directory.get_active_member(member_id).await?;

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| FriendshipError::Store(e.to_string()))?;
        let now = now_micros();

        let mut dissolved = 0;
        for direction in [relationship, relationship.reversed()] {
            let Some(mut friendship) = self
                .friendship_repo
                .find_by_pair_in_tx(&mut *tx, direction)
                .await?
            else {
                continue;
            };
            if !friendship.is_accepted() {
                continue;
            }
            friendship.unfriend(now)?;
            self.friendship_repo
                .update_status_in_tx(&mut *tx, &friendship)
                .await?;
            dissolved += 1;
        }

        tx.commit()
            .await
            .map_err(|e| FriendshipError::Store(e.to_string()))?;

        Ok(dissolved)
    }
}

#[async_trait::async_trait]
impl FriendshipTerminator for RealFriendshipTerminator {
    async fn unfriend(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<(), UnfriendError> {
        let dissolved = self
            .unfriend_internal(member_id, friend_member_id)
            .await
            .map_err(|e| {
                tracing::warn!(%member_id, %friend_member_id, "unfriend: {e}");
                UnfriendError::from(e)
            })?;

        if dissolved == 0 {
            tracing::debug!(%member_id, %friend_member_id, "unfriend found no accepted edge");
        } else {
            tracing::info!(%member_id, %friend_member_id, dissolved, "friendship terminated");
        }

        // published even when nothing was dissolved, so retries stay harmless
        let event = FriendshipEvent::FriendshipTerminated(FriendshipTerminated {
            member_id,
            friend_member_id,
        });
        self.event_publisher.publish(&event).await;

        Ok(())
    }
}
