use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct MemberId(pub uuid::Uuid);

impl MemberId {
    /// Stable id derived from a handle. Used by fixtures and the demo binary.
    pub fn from_handle(handle: &str) -> Self {
        MemberId(uuid::Uuid::new_v5(
            &uuid::Uuid::NAMESPACE_OID,
            handle.as_bytes(),
        ))
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(MemberId)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    Withdrawn,
}

impl std::str::FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            "withdrawn" => Ok(MemberStatus::Withdrawn),
            other => Err(format!("unknown member status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub member_id: MemberId,
    pub display_name: String,
    pub status: MemberStatus,
}

impl MemberSummary {
    pub fn is_active(&self) -> bool {
        matches!(self.status, MemberStatus::Active)
    }
}
