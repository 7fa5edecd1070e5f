use crate::domain_model::MemberId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct FriendshipId(pub uuid::Uuid);

impl FriendshipId {
    pub fn new() -> Self {
        FriendshipId(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for FriendshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FriendshipId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(FriendshipId)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
    Unfriended,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "PENDING",
            FriendshipStatus::Accepted => "ACCEPTED",
            FriendshipStatus::Rejected => "REJECTED",
            FriendshipStatus::Unfriended => "UNFRIENDED",
        }
    }

    /// Rejected and unfriended rows may be revived by a new request.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FriendshipStatus::Rejected | FriendshipStatus::Unfriended)
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FriendshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(FriendshipStatus::Pending),
            "ACCEPTED" => Ok(FriendshipStatus::Accepted),
            "REJECTED" => Ok(FriendshipStatus::Rejected),
            "UNFRIENDED" => Ok(FriendshipStatus::Unfriended),
            other => Err(format!("unknown friendship status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("member {0} cannot befriend themselves")]
pub struct SelfFriendshipError(pub MemberId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal friendship transition: {from} -> {to}")]
pub struct IllegalTransition {
    pub from: FriendshipStatus,
    pub to: FriendshipStatus,
}

/// Ordered `(subject, target)` pair of one directional edge.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Relationship {
    member_id: MemberId,
    friend_member_id: MemberId,
}

impl Relationship {
    pub fn new(member_id: MemberId, friend_member_id: MemberId) -> Result<Self, SelfFriendshipError> {
        if member_id == friend_member_id {
            return Err(SelfFriendshipError(member_id));
        }
        Ok(Self {
            member_id,
            friend_member_id,
        })
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn friend_member_id(&self) -> MemberId {
        self.friend_member_id
    }

    pub fn reversed(&self) -> Self {
        Self {
            member_id: self.friend_member_id,
            friend_member_id: self.member_id,
        }
    }
}

/// Current time at the precision rows are stored with (`DATETIME(6)`).
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// One directional friendship row. A mutual friendship is two of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friendship {
    id: FriendshipId,
    relationship: Relationship,
    status: FriendshipStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Friendship {
    /// A fresh pending request from the subject to the target.
    pub fn request(relationship: Relationship, now: DateTime<Utc>) -> Self {
        Self::fresh(relationship, FriendshipStatus::Pending, now)
    }

    /// A fresh accepted row, used for the reciprocal edge on acceptance.
    pub fn accepted(relationship: Relationship, now: DateTime<Utc>) -> Self {
        Self::fresh(relationship, FriendshipStatus::Accepted, now)
    }

    fn fresh(relationship: Relationship, status: FriendshipStatus, now: DateTime<Utc>) -> Self {
        let now = now.trunc_subsecs(6);
        Self {
            id: FriendshipId::new(),
            relationship,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a row read back from storage.
    pub fn restore(
        id: FriendshipId,
        relationship: Relationship,
        status: FriendshipStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            relationship,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> FriendshipId {
        self.id
    }

    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    pub fn member_id(&self) -> MemberId {
        self.relationship.member_id
    }

    pub fn friend_member_id(&self) -> MemberId {
        self.relationship.friend_member_id
    }

    pub fn status(&self) -> FriendshipStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.status, FriendshipStatus::Accepted)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, FriendshipStatus::Pending)
    }

    /// Terminal -> Pending. `id` and `created_at` are kept.
    pub fn revive(&mut self, now: DateTime<Utc>) -> Result<(), IllegalTransition> {
        if !self.status.is_terminal() {
            return Err(self.illegal(FriendshipStatus::Pending));
        }
        self.transition(FriendshipStatus::Pending, now);
        Ok(())
    }

    pub fn accept(&mut self, now: DateTime<Utc>) -> Result<(), IllegalTransition> {
        self.respond(FriendshipStatus::Accepted, now)
    }

    pub fn reject(&mut self, now: DateTime<Utc>) -> Result<(), IllegalTransition> {
        self.respond(FriendshipStatus::Rejected, now)
    }

    fn respond(&mut self, to: FriendshipStatus, now: DateTime<Utc>) -> Result<(), IllegalTransition> {
        if !self.is_pending() {
            return Err(self.illegal(to));
        }
        self.transition(to, now);
        Ok(())
    }

    /// Any status -> Accepted. Only for the reciprocal edge written on acceptance.
    pub fn reciprocate(&mut self, now: DateTime<Utc>) {
        self.transition(FriendshipStatus::Accepted, now);
    }

    pub fn unfriend(&mut self, now: DateTime<Utc>) -> Result<(), IllegalTransition> {
        if !self.is_accepted() {
            return Err(self.illegal(FriendshipStatus::Unfriended));
        }
        self.transition(FriendshipStatus::Unfriended, now);
        Ok(())
    }

    fn transition(&mut self, to: FriendshipStatus, now: DateTime<Utc>) {
        self.status = to;
        self.updated_at = now.trunc_subsecs(6);
    }

    fn illegal(&self, to: FriendshipStatus) -> IllegalTransition {
        IllegalTransition {
            from: self.status,
            to,
        }
    }
}
