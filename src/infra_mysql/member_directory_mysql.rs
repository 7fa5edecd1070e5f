use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::{MySqlPool, Row};

pub struct MySqlMemberDirectory {
    pool: MySqlPool,
}

impl MySqlMemberDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlMemberDirectory { pool }
    }
}

#[async_trait::async_trait]
impl MemberDirectory for MySqlMemberDirectory {
    async fn get_active_member(&self, member_id: MemberId) -> Result<MemberSummary, MemberError> {
        let member = self
            .find_member(member_id)
            .await?
            .ok_or(MemberError::NotFound(member_id))?;

        if !member.is_active() {
            return Err(MemberError::Inactive(member_id));
        }
        Ok(member)
    }

    async fn find_member(&self, member_id: MemberId) -> Result<Option<MemberSummary>, MemberError> {
        let Some(row) =
            sqlx::query("SELECT display_name, status FROM member WHERE member_id = ?")
                .bind(member_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| MemberError::Store(format!("query member: {e}")))?
        else {
            return Ok(None);
        };

        let display_name = row
            .try_get::<String, _>("display_name")
            .map_err(|e| MemberError::Store(format!("decode member: {e}")))?;
        let status = row
            .try_get::<&str, _>("status")
            .map_err(|e| MemberError::Store(format!("decode member: {e}")))?
            .parse::<MemberStatus>()
            .map_err(|e| MemberError::Store(format!("decode member status: {e}")))?;

        Ok(Some(MemberSummary {
            member_id,
            display_name,
            status,
        }))
    }
}
