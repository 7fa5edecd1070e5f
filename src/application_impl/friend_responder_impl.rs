use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct RealFriendResponder {
    member_directory: Arc<dyn MemberDirectory>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    event_publisher: Arc<dyn EventPublisher>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealFriendResponder {
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

    async fn respond_internal(
        &self,
        friendship_id: FriendshipId,
        respondent: MemberId,
        accept: bool,
    ) -> Result<Friendship, FriendshipError> {
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| FriendshipError::Store(e.to_string()))?;

        let mut friendship = self
            .friendship_repo
            .find_by_id_in_tx(&mut *tx, friendship_id)
            .await?
            .ok_or(FriendshipError::NotFound(friendship_id))?;

        if friendship.friend_member_id() != respondent {
            return Err(FriendshipError::NotRecipient {
                friendship_id,
                respondent,
            });
        }
        self.member_directory.get_active_member(respondent).await?;

        let now = now_micros();
        if accept {
            friendship.accept(now)?;
            self.friendship_repo
                .update_status_in_tx(&mut *tx, &friendship)
                .await?;

            // the request becomes mutual: make sure the reverse edge is accepted too
            let reverse = friendship.relationship().reversed();
            match self
                .friendship_repo
                .find_by_pair_in_tx(&mut *tx, reverse)
                .await?
            {
                Some(mut reciprocal) => {
                    reciprocal.reciprocate(now);
                    self.friendship_repo
                        .update_status_in_tx(&mut *tx, &reciprocal)
                        .await?;
                }
                None => {
                    self.friendship_repo
                        .insert_in_tx(&mut *tx, &Friendship::accepted(reverse, now))
                        .await?;
                }
            }
        } else {
            friendship.reject(now)?;
            self.friendship_repo
                .update_status_in_tx(&mut *tx, &friendship)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| FriendshipError::Store(e.to_string()))?;

        Ok(friendship)
    }
}

#[async_trait::async_trait]
impl FriendResponder for RealFriendResponder {
    async fn respond_to_friend_request(
        &self,
        friendship_id: FriendshipId,
        respondent: MemberId,
        accept: bool,
    ) -> Result<Friendship, FriendResponseError> {
        let friendship = self
            .respond_internal(friendship_id, respondent, accept)
            .await
            .map_err(|e| {
                tracing::warn!(%friendship_id, %respondent, accept, "respond to friend request: {e}");
                FriendResponseError::from(e)
            })?;

        tracing::info!(
            %friendship_id,
            from = %friendship.member_id(),
            to = %friendship.friend_member_id(),
            status = %friendship.status(),
            "friend request answered"
        );

        let event = if accept {
            FriendshipEvent::FriendRequestAccepted(FriendRequestAccepted {
                friendship_id,
                from_member_id: friendship.member_id(),
                to_member_id: friendship.friend_member_id(),
            })
        } else {
            FriendshipEvent::FriendRequestRejected(FriendRequestRejected {
                friendship_id,
                from_member_id: friendship.member_id(),
                to_member_id: friendship.friend_member_id(),
            })
        };
        self.event_publisher.publish(&event).await;

        Ok(friendship)
    }
}
