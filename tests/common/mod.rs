#![allow(dead_code)]

use kinship::application_impl::*;
use kinship::application_port::*;
use kinship::domain_model::*;
use kinship::infra_memory::*;
use std::sync::Arc;

/// Services wired to the in-memory backend, with four active members.
pub struct Fixture {
    pub store: MemoryStore,
    pub members: Arc<MemoryMemberDirectory>,
    pub events: Arc<RecordingEventPublisher>,
    pub requestor: Arc<dyn FriendRequestor>,
    pub responder: Arc<dyn FriendResponder>,
    pub terminator: Arc<dyn FriendshipTerminator>,
    pub reader: Arc<dyn FriendshipReader>,
    pub alice: MemberId,
    pub bob: MemberId,
    pub carol: MemberId,
    pub dave: MemberId,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let members = Arc::new(MemoryMemberDirectory::new());
        let events = Arc::new(RecordingEventPublisher::new());
        let friendship_repo = Arc::new(MemoryFriendshipRepo::new(store.clone()));
        let tx_manager = Arc::new(MemoryTxManager::new(store.clone()));

        let alice = members.register(MemberId::from_handle("alice"), "Alice");
        let bob = members.register(MemberId::from_handle("bob"), "Bob");
        let carol = members.register(MemberId::from_handle("carol"), "Carol");
        let dave = members.register(MemberId::from_handle("dave"), "Dave");

        Self {
            requestor: Arc::new(RealFriendRequestor::new(
                members.clone(),
                friendship_repo.clone(),
                events.clone(),
                tx_manager.clone(),
            )),
            responder: Arc::new(RealFriendResponder::new(
                members.clone(),
                friendship_repo.clone(),
                events.clone(),
                tx_manager.clone(),
            )),
            terminator: Arc::new(RealFriendshipTerminator::new(
                members.clone(),
                friendship_repo.clone(),
                events.clone(),
                tx_manager,
            )),
            reader: Arc::new(RealFriendshipReader::new(members.clone(), friendship_repo)),
            store,
            members,
            events,
            alice,
            bob,
            carol,
            dave,
        }
    }

    /// Adds an active member under `handle`.
    pub fn member(&self, handle: &str, display_name: &str) -> MemberId {
        self.members
            .register(MemberId::from_handle(handle), display_name)
    }

    pub async fn send(&self, from: MemberId, to: MemberId) -> Friendship {
        let command = FriendRequestCommand::new(from, to, "friend").unwrap();
        self.requestor.send_friend_request(command).await.unwrap()
    }

    pub async fn respond(&self, request: &Friendship, accept: bool) -> Friendship {
        self.responder
            .respond_to_friend_request(request.id(), request.friend_member_id(), accept)
            .await
            .unwrap()
    }

    /// Sends and accepts, leaving both directional rows accepted.
    pub async fn befriend(&self, a: MemberId, b: MemberId) -> Friendship {
        let request = self.send(a, b).await;
        self.respond(&request, true).await
    }

    /// Every stored row, oldest first.
    pub async fn rows(&self) -> Vec<Friendship> {
        self.store
            .snapshot()
            .await
            .select(|_| true, SortDirection::Asc)
    }

    pub async fn row(&self, member_id: MemberId, friend_member_id: MemberId) -> Option<Friendship> {
        let relationship = Relationship::new(member_id, friend_member_id).unwrap();
        self.store.snapshot().await.get_by_pair(relationship)
    }
}
