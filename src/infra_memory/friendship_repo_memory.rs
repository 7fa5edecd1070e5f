use super::repo_tx_memory::{MemoryState, MemoryStore, downcast};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;

pub struct MemoryFriendshipRepo {
    store: MemoryStore,
}

impl MemoryFriendshipRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemoryFriendshipRepo { store }
    }
}

fn on_side(friendship: &Friendship, member_id: MemberId, side: Side) -> bool {
    match side {
        Side::Subject => friendship.member_id() == member_id,
        Side::Target => friendship.friend_member_id() == member_id,
    }
}

fn select_by_member(
    state: &MemoryState,
    member_id: MemberId,
    side: Side,
    status: FriendshipStatus,
    direction: SortDirection,
) -> Vec<Friendship> {
    state.select(
        |f| f.status() == status && on_side(f, member_id, side),
        direction,
    )
}

#[async_trait::async_trait]
impl FriendshipRepo for MemoryFriendshipRepo {
    async fn find_by_pair_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        relationship: Relationship,
    ) -> Result<Option<Friendship>, FriendshipError> {
        let tx = downcast(tx)?;
        Ok(tx.state().get_by_pair(relationship))
    }

    async fn find_by_id_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship_id: FriendshipId,
    ) -> Result<Option<Friendship>, FriendshipError> {
        let tx = downcast(tx)?;
        Ok(tx.state().get(friendship_id))
    }

    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship: &Friendship,
    ) -> Result<(), FriendshipError> {
        let tx = downcast(tx)?;
        if !tx.state().insert(friendship) {
            return Err(FriendshipError::DuplicatePair {
                member_id: friendship.member_id(),
                friend_member_id: friendship.friend_member_id(),
            });
        }
        Ok(())
    }

    async fn update_status_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship: &Friendship,
    ) -> Result<(), FriendshipError> {
        let tx = downcast(tx)?;
        if !tx.state().replace(friendship) {
            return Err(FriendshipError::Store(format!(
                "update friendship: no row {}",
                friendship.id()
            )));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        friendship_id: FriendshipId,
    ) -> Result<Option<Friendship>, FriendshipError> {
        Ok(self.store.lock().await.get(friendship_id))
    }

    async fn find_by_pair(
        &self,
        relationship: Relationship,
    ) -> Result<Option<Friendship>, FriendshipError> {
        Ok(self.store.lock().await.get_by_pair(relationship))
    }

    async fn exists(
        &self,
        relationship: Relationship,
        status: FriendshipStatus,
    ) -> Result<bool, FriendshipError> {
        Ok(self
            .store
            .lock()
            .await
            .get_by_pair(relationship)
            .is_some_and(|f| f.status() == status))
    }

    async fn list_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
        page: PageRequest,
    ) -> Result<Page<Friendship>, FriendshipError> {
        let state = self.store.lock().await;
        let all = select_by_member(&state, member_id, side, status, page.direction);
        Ok(Page::slice(all, page))
    }

    async fn list_all_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
        direction: SortDirection,
    ) -> Result<Vec<Friendship>, FriendshipError> {
        let state = self.store.lock().await;
        Ok(select_by_member(&state, member_id, side, status, direction))
    }

    async fn count_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
    ) -> Result<u64, FriendshipError> {
        let state = self.store.lock().await;
        let count = select_by_member(&state, member_id, side, status, SortDirection::Asc).len();
        Ok(count as u64)
    }
}
