use crate::application_port::FriendshipError;
use crate::domain_model::*;
use crate::domain_port::{StorageTx, TxManager};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Friendship rows plus the unique `(member_id, friend_member_id)` index.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    rows: HashMap<FriendshipId, Friendship>,
    by_pair: HashMap<Relationship, FriendshipId>,
}

impl MemoryState {
    pub fn get(&self, friendship_id: FriendshipId) -> Option<Friendship> {
        self.rows.get(&friendship_id).cloned()
    }

    pub fn get_by_pair(&self, relationship: Relationship) -> Option<Friendship> {
        self.by_pair
            .get(&relationship)
            .and_then(|id| self.get(*id))
    }

    /// `false` when the pair is already taken.
    pub fn insert(&mut self, friendship: &Friendship) -> bool {
        if self.by_pair.contains_key(&friendship.relationship()) {
            return false;
        }
        self.by_pair
            .insert(friendship.relationship(), friendship.id());
        self.rows.insert(friendship.id(), friendship.clone());
        true
    }

    /// `false` when the row does not exist.
    pub fn replace(&mut self, friendship: &Friendship) -> bool {
        match self.rows.get_mut(&friendship.id()) {
            Some(row) => {
                *row = friendship.clone();
                true
            }
            None => false,
        }
    }

    pub fn select<F>(&self, predicate: F, direction: SortDirection) -> Vec<Friendship>
    where
        F: Fn(&Friendship) -> bool,
    {
        let mut out: Vec<Friendship> = self.rows.values().filter(|f| predicate(f)).cloned().collect();
        out.sort_by_key(|f| (f.created_at(), f.id()));
        if matches!(direction, SortDirection::Desc) {
            out.reverse();
        }
        out
    }
}

/// Shared handle to the in-memory tables. Cloning shares the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }

    pub(super) async fn lock(&self) -> tokio::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().await
    }
}

/// Transactions run one at a time: `begin` holds the store lock until the
/// transaction is committed or dropped.
pub struct MemoryTxManager {
    store: MemoryStore,
}

impl MemoryTxManager {
    pub fn new(store: MemoryStore) -> Self {
        MemoryTxManager { store }
    }
}

#[async_trait::async_trait]
impl TxManager for MemoryTxManager {
    async fn begin<'t>(&'t self) -> anyhow::Result<Box<dyn StorageTx<'t> + 't>> {
        let guard = self.store.state.clone().lock_owned().await;
        Ok(Box::new(MemoryTx::new(guard)))
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl MemoryTx {
    fn new(guard: OwnedMutexGuard<MemoryState>) -> Self {
        let working = guard.clone();
        MemoryTx { guard, working }
    }

    pub fn state(&mut self) -> &mut MemoryState {
        &mut self.working
    }
}

#[async_trait::async_trait]
impl<'t> StorageTx<'t> for MemoryTx {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let MemoryTx {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }

    fn as_any_mut(&mut self) -> Option<&mut dyn Any> {
        Some(self)
    }
}

/// Refuses transactions that were not opened by a `MemoryTxManager`.
pub fn downcast<'a, 't>(
    tx: &'a mut dyn StorageTx<'t>,
) -> Result<&'a mut MemoryTx, FriendshipError> {
    tx.as_any_mut()
        .and_then(|tx| tx.downcast_mut::<MemoryTx>())
        .ok_or_else(|| FriendshipError::Store("transaction not opened by the memory store".into()))
}
