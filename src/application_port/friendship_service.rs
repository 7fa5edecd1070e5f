use crate::application_port::MemberError;
use crate::domain_model::*;

/// Every way a friendship operation can fail. Callers of the services never
/// see this directly: each operation wraps it in its own coarse error kind.
#[derive(Debug, thiserror::Error)]
pub enum FriendshipError {
    #[error(transparent)]
    Member(#[from] MemberError),
    #[error(transparent)]
    SelfFriendship(#[from] SelfFriendshipError),
    #[error("friendship not found: {0}")]
    NotFound(FriendshipId),
    #[error("member {respondent} is not the recipient of friendship {friendship_id}")]
    NotRecipient {
        friendship_id: FriendshipId,
        respondent: MemberId,
    },
    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),
    #[error("friendship {member_id} -> {friend_member_id} already exists")]
    DuplicatePair {
        member_id: MemberId,
        friend_member_id: MemberId,
    },
    #[error("store error: {0}")]
    Store(String),
}

#[derive(Debug, thiserror::Error)]
#[error("failed to send friend request")]
pub struct FriendRequestError(#[from] FriendshipError);

impl FriendRequestError {
    pub fn cause(&self) -> &FriendshipError {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to respond to friend request")]
pub struct FriendResponseError(#[from] FriendshipError);

impl FriendResponseError {
    pub fn cause(&self) -> &FriendshipError {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to unfriend")]
pub struct UnfriendError(#[from] FriendshipError);

impl UnfriendError {
    pub fn cause(&self) -> &FriendshipError {
        &self.0
    }
}

/// Read-side failures. Only a by-id lookup reports absence as an error.
#[derive(Debug, thiserror::Error)]
pub enum FriendshipQueryError {
    #[error("friendship not found: {0}")]
    NotFound(FriendshipId),
    #[error("store error: {0}")]
    Store(String),
}

impl From<FriendshipError> for FriendshipQueryError {
    fn from(error: FriendshipError) -> Self {
        match error {
            FriendshipError::NotFound(id) => FriendshipQueryError::NotFound(id),
            other => FriendshipQueryError::Store(other.to_string()),
        }
    }
}

/// Input of [`FriendRequestor::send_friend_request`]. Construction refuses
/// a request addressed to oneself.
#[derive(Debug, Clone)]
pub struct FriendRequestCommand {
    relationship: Relationship,
    to_display_name: String,
}

impl FriendRequestCommand {
    pub fn new(
        from_member_id: MemberId,
        to_member_id: MemberId,
        to_display_name: impl Into<String>,
    ) -> Result<Self, SelfFriendshipError> {
        Ok(Self {
            relationship: Relationship::new(from_member_id, to_member_id)?,
            to_display_name: to_display_name.into(),
        })
    }

    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    pub fn from_member_id(&self) -> MemberId {
        self.relationship.member_id()
    }

    pub fn to_member_id(&self) -> MemberId {
        self.relationship.friend_member_id()
    }

    pub fn to_display_name(&self) -> &str {
        &self.to_display_name
    }
}

#[async_trait::async_trait]
pub trait FriendRequestor: Send + Sync {
    /// Creates or revives the `(from, to)` row as pending. Repeating the call
    /// while the row is pending or accepted returns it unchanged.
    async fn send_friend_request(
        &self,
        command: FriendRequestCommand,
    ) -> Result<Friendship, FriendRequestError>;
}

#[async_trait::async_trait]
pub trait FriendResponder: Send + Sync {
    /// Accepts or rejects a pending request. Only its target may respond.
    async fn respond_to_friend_request(
        &self,
        friendship_id: FriendshipId,
        respondent: MemberId,
        accept: bool,
    ) -> Result<Friendship, FriendResponseError>;
}

#[async_trait::async_trait]
pub trait FriendshipTerminator: Send + Sync {
    /// Moves accepted rows in both directions to unfriended. Succeeds when
    /// there is nothing to dissolve.
    async fn unfriend(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<(), UnfriendError>;
}

#[async_trait::async_trait]
pub trait FriendshipReader: Send + Sync {
    async fn find_active_friendship(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<Option<Friendship>, FriendshipQueryError>;

    async fn are_friends(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<bool, FriendshipQueryError>;

    async fn find_by_members(
        &self,
        member_id: MemberId,
        friend_member_id: MemberId,
    ) -> Result<Option<Friendship>, FriendshipQueryError>;

    async fn sented_friend_request(
        &self,
        from_member_id: MemberId,
        to_member_id: MemberId,
    ) -> Result<Option<Friendship>, FriendshipQueryError> {
        self.find_by_members(from_member_id, to_member_id).await
    }

    async fn find_pending_friendship_received(
        &self,
        receiver_id: MemberId,
        sender_id: MemberId,
    ) -> Result<Option<Friendship>, FriendshipQueryError>;

    async fn find_friendship_by_id(
        &self,
        friendship_id: FriendshipId,
    ) -> Result<Friendship, FriendshipQueryError>;

    async fn find_friends_by_member_id(
        &self,
        member_id: MemberId,
        page: PageRequest,
    ) -> Result<Page<FriendSummary>, FriendshipQueryError>;

    async fn find_recent_friends(
        &self,
        member_id: MemberId,
        limit: u16,
    ) -> Result<Vec<FriendSummary>, FriendshipQueryError>;

    async fn search_friends(
        &self,
        member_id: MemberId,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<FriendSummary>, FriendshipQueryError>;

    async fn count_friends_by_member_id(
        &self,
        member_id: MemberId,
    ) -> Result<u64, FriendshipQueryError>;

    async fn find_pending_requests_received(
        &self,
        member_id: MemberId,
        page: PageRequest,
    ) -> Result<Page<Friendship>, FriendshipQueryError>;

    async fn find_pending_requests_sent(
        &self,
        member_id: MemberId,
        page: PageRequest,
    ) -> Result<Page<Friendship>, FriendshipQueryError>;

    async fn count_pending_requests(&self, member_id: MemberId)
    -> Result<u64, FriendshipQueryError>;

    async fn count_pending_requests_sent(
        &self,
        member_id: MemberId,
    ) -> Result<u64, FriendshipQueryError>;
}
