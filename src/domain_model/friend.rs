use crate::domain_model::{FriendshipId, MemberId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of a friend listing, seen from the listing member's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendSummary {
    pub friendship_id: FriendshipId,
    pub friend_member_id: MemberId,
    /// Resolved at read time; `None` when the member record is gone.
    pub display_name: Option<String>,
    pub since: DateTime<Utc>,
}
