use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use futures_util::future::join_all;
use std::sync::Arc;

pub struct RealFriendshipReader {
    member_directory: Arc<dyn MemberDirectory>,
    friendship_repo: Arc<dyn FriendshipRepo>,
}

impl RealFriendshipReader {
    pub fn new(
        member_directory: Arc<dyn MemberDirectory>,
        friendship_repo: Arc<dyn FriendshipRepo>,
    ) -> Self {
        Self {
            member_directory,
            friendship_repo,
        }
    }

    /// Labels accepted rows with the counterpart's current display name.
    /// Lookup failures leave the name empty instead of failing the listing.
    async fn summarize(&self, friendships: Vec<Friendship>) -> Vec<FriendSummary> {
        let names = join_all(friendships.iter().map(|f| async move {
            let friend = f.friend_member_id();
            match self.member_directory.find_member(friend).await {
                Ok(member) => member.map(|m| m.display_name),
                Err(e) => {
                    tracing::warn!(%friend, "resolve friend display name: {e}");
                    None
                }
            }
        }))
        .await;

        friendships
            .into_iter()
            .zip(names)
            .map(|(f, display_name)| FriendSummary {
                friendship_id: f.id(),
                friend_member_id: f.friend_member_id(),
                display_name,
                since: f.created_at(),
            })
            .collect()
    }

    async fn find_pair(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<Option<Friendship>, FriendshipQueryError> {
        // a self pair can never have been stored
        let Ok(relationship) = Relationship::new(member_id, friend_member_id) else {
            return Ok(None);
        };
        Ok(self.friendship_repo.find_by_pair(relationship).await?)
    }
}

#[async_trait::async_trait]
impl FriendshipReader for RealFriendshipReader {
    async fn find_active_friendship(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<Option<Friendship>, FriendshipQueryError> {
        Ok(self
            .find_pair(member_id, friend_member_id)
            .await?
            .filter(Friendship::is_accepted))
    }

    async fn are_friends(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<bool, FriendshipQueryError> {
        let Ok(relationship) = Relationship::new(member_id, friend_member_id) else {
            return Ok(false);
        };
        Ok(self
            .friendship_repo
            .exists(relationship, FriendshipStatus::Accepted)
            .await?)
    }

    async fn find_by_members(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<Option<Friendship>, FriendshipQueryError> {
        self.find_pair(member_id, friend_member_id).await
    }

    async fn find_pending_friendship_received(
        &self,
        receiver_id: MemberId,
        sender_id: MemberId,
    ) -> Result<Option<Friendship>, FriendshipQueryError> {
        Ok(self
            .find_pair(sender_id, receiver_id)
            .await?
            .filter(Friendship::is_pending))
    }

    async fn find_friendship_by_id(
        &self,
        friendship_id: FriendshipId,
    ) -> Result<Friendship, FriendshipQueryError> {
        self.friendship_repo
            .find_by_id(friendship_id)
            .await?
            .ok_or(FriendshipQueryError::NotFound(friendship_id))
    }

    async fn find_friends_by_member_id(
        &self,
        member_id: MemberId,
        page: PageRequest,
    ) -> Result<Page<FriendSummary>, FriendshipQueryError> {
        let friendships = self
            .friendship_repo
            .list_by_member(member_id, Side::Subject, FriendshipStatus::Accepted, page)
            .await?;
        let items = self.summarize(friendships.items).await;
        Ok(Page::new(items, page, friendships.total))
    }

    async fn find_recent_friends(
        &self,
        member_id: MemberId,
        limit: u16,
    ) -> Result<Vec<FriendSummary>, FriendshipQueryError> {
        let page = PageRequest::first(limit, SortDirection::Desc);
        let friendships = self
            .friendship_repo
            .list_by_member(member_id, Side::Subject, FriendshipStatus::Accepted, page)
            .await?;
        Ok(self.summarize(friendships.items).await)
    }

    async fn search_friends(
        &self,
        member_id: MemberId,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<FriendSummary>, FriendshipQueryError> {
        // names live with the member records, so the filter runs after resolution
        let friendships = self
            .friendship_repo
            .list_all_by_member(
                member_id,
                Side::Subject,
                FriendshipStatus::Accepted,
                page.direction,
            )
            .await?;
        let needle = keyword.trim().to_lowercase();
        let matches = self
            .summarize(friendships)
            .await
            .into_iter()
            .filter(|summary| {
                summary
                    .display_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(Page::slice(matches, page))
    }

    async fn count_friends_by_member_id(
        &self,
        member_id: MemberId,
    ) -> Result<u64, FriendshipQueryError> {
        Ok(self
            .friendship_repo
            .count_by_member(member_id, Side::Subject, FriendshipStatus::Accepted)
            .await?)
    }

    async fn find_pending_requests_received(
        &self,
        member_id: MemberId,
        page: PageRequest,
    ) -> Result<Page<Friendship>, FriendshipQueryError> {
        Ok(self
            .friendship_repo
            .list_by_member(member_id, Side::Target, FriendshipStatus::Pending, page)
            .await?)
    }

    async fn find_pending_requests_sent(
        &self,
        member_id: MemberId,
        page: PageRequest,
    ) -> Result<Page<Friendship>, FriendshipQueryError> {
        Ok(self
            .friendship_repo
            .list_by_member(member_id, Side::Subject, FriendshipStatus::Pending, page)
            .await?)
    }

    async fn count_pending_requests(
        &self,
        member_id: MemberId,
    ) -> Result<u64, FriendshipQueryError> {
        Ok(self
            .friendship_repo
            .count_by_member(member_id, Side::Target, FriendshipStatus::Pending)
            .await?)
    }

    async fn count_pending_requests_sent(
        &self,
        member_id: MemberId,
    ) -> Result<u64, FriendshipQueryError> {
        Ok(self
            .friendship_repo
            .count_by_member(member_id, Side::Subject, FriendshipStatus::Pending)
            .await?)
    }
}
