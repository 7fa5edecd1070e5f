use crate::application_port::MemberError;
use crate::domain_model::*;

/// Lookup into the member records owned by the identity side of the system.
#[async_trait::async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Fails with `NotFound` or `Inactive` unless the member can act right now.
    async fn get_active_member(&self, member_id: MemberId) -> Result<MemberSummary, MemberError>;

    /// Best-effort lookup regardless of status, used to label listings.
    async fn find_member(&self, member_id: MemberId)
    -> Result<Option<MemberSummary>, MemberError>;
}
