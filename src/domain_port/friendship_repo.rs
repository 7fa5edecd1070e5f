use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::repo_tx::StorageTx;

/// Which end of a row a member sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `member_id`, the direction the row is from.
    Subject,
    /// `friend_member_id`, the receiver.
    Target,
}

#[async_trait::async_trait]
pub trait FriendshipRepo: Send + Sync {
    /// Locking read of the row for an ordered pair.
    async fn find_by_pair_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        relationship: Relationship,
    ) -> Result<Option<Friendship>, FriendshipError>;

    /// Locking read by id.
    async fn find_by_id_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship_id: FriendshipId,
    ) -> Result<Option<Friendship>, FriendshipError>;

    /// Fails with `DuplicatePair` when the ordered pair already has a row.
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship: &Friendship,
    ) -> Result<(), FriendshipError>;

    /// Persists `status` and `updated_at` of an existing row.
    async fn update_status_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship: &Friendship,
    ) -> Result<(), FriendshipError>;

    async fn find_by_id(
        &self,
        friendship_id: FriendshipId,
    ) -> Result<Option<Friendship>, FriendshipError>;

    async fn find_by_pair(
        &self,
        relationship: Relationship,
    ) -> Result<Option<Friendship>, FriendshipError>;

    async fn exists(
        &self,
        relationship: Relationship,
        status: FriendshipStatus,
    ) -> Result<bool, FriendshipError>;

    async fn list_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
        page: PageRequest,
    ) -> Result<Page<Friendship>, FriendshipError>;

    /// Unpaged variant for callers that filter on data the row does not hold.
    async fn list_all_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
        direction: SortDirection,
    ) -> Result<Vec<Friendship>, FriendshipError>;

    async fn count_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
    ) -> Result<u64, FriendshipError>;
}
