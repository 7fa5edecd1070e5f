use crate::domain_model::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum FriendshipEvent {
    FriendRequestSent(FriendRequestSent),
    FriendRequestAccepted(FriendRequestAccepted),
    FriendRequestRejected(FriendRequestRejected),
    FriendshipTerminated(FriendshipTerminated),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequestSent {
    pub friendship_id: FriendshipId,
    pub from_member_id: MemberId,
    pub to_member_id: MemberId,
    pub to_display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequestAccepted {
    pub friendship_id: FriendshipId,
    pub from_member_id: MemberId,
    pub to_member_id: MemberId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequestRejected {
    pub friendship_id: FriendshipId,
    pub from_member_id: MemberId,
    pub to_member_id: MemberId,
}

/// Consumers treat this as "ensure absence": it is published even when no
/// accepted edge existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendshipTerminated {
    pub member_id: MemberId,
    pub friend_member_id: MemberId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "friend.request.sent")]
    FriendRequestSent,
    #[serde(rename = "friend.request.accepted")]
    FriendRequestAccepted,
    #[serde(rename = "friend.request.rejected")]
    FriendRequestRejected,
    #[serde(rename = "friendship.terminated")]
    FriendshipTerminated,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventType::FriendRequestSent => "friend.request.sent",
            EventType::FriendRequestAccepted => "friend.request.accepted",
            EventType::FriendRequestRejected => "friend.request.rejected",
            EventType::FriendshipTerminated => "friendship.terminated",
        };
        f.write_str(s)
    }
}

impl FriendshipEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            FriendshipEvent::FriendRequestSent(_) => EventType::FriendRequestSent,
            FriendshipEvent::FriendRequestAccepted(_) => EventType::FriendRequestAccepted,
            FriendshipEvent::FriendRequestRejected(_) => EventType::FriendRequestRejected,
            FriendshipEvent::FriendshipTerminated(_) => EventType::FriendshipTerminated,
        }
    }

    /// Member whose feed the event belongs to; keeps per-member ordering downstream.
    pub fn partition_key(&self) -> MemberId {
        match self {
            FriendshipEvent::FriendRequestSent(e) => e.to_member_id,
            FriendshipEvent::FriendRequestAccepted(e) => e.from_member_id,
            FriendshipEvent::FriendRequestRejected(e) => e.from_member_id,
            FriendshipEvent::FriendshipTerminated(e) => e.friend_member_id,
        }
    }
}
