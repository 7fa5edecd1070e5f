use crate::application_port::MemberError;
use crate::domain_model::*;
use crate::domain_port::MemberDirectory;
use dashmap::DashMap;

/// Member records held in process. Stands in for the identity service in
/// tests and the `memory` backend.
#[derive(Debug, Default)]
pub struct MemoryMemberDirectory {
    members: DashMap<MemberId, MemberSummary>,
}

impl MemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an active member and returns its id.
    pub fn register(&self, member_id: MemberId, display_name: &str) -> MemberId {
        self.members.insert(
            member_id,
            MemberSummary {
                member_id,
                display_name: display_name.to_string(),
                status: MemberStatus::Active,
            },
        );
        member_id
    }

    pub fn set_status(&self, member_id: MemberId, status: MemberStatus) {
        if let Some(mut member) = self.members.get_mut(&member_id) {
            member.status = status;
        }
    }

    pub fn remove(&self, member_id: MemberId) {
        self.members.remove(&member_id);
    }
}

#[async_trait::async_trait]
impl MemberDirectory for MemoryMemberDirectory {
    async fn get_active_member(&self, member_id: MemberId) -> Result<MemberSummary, MemberError> {
        let member = self
            .members
            .get(&member_id)
            .map(|m| m.value().clone())
            .ok_or(MemberError::NotFound(member_id))?;
        if !member.is_active() {
            return Err(MemberError::Inactive(member_id));
        }
        Ok(member)
    }

    async fn find_member(
        &self,
        member_id: MemberId,
    ) -> Result<Option<MemberSummary>, MemberError> {
        Ok(self.members.get(&member_id).map(|m| m.value().clone()))
    }
}
