use crate::domain_model::MemberId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberError {
    #[error("member not found: {0}")]
    NotFound(MemberId),
    #[error("member is not active: {0}")]
    Inactive(MemberId),
    #[error("store error: {0}")]
    Store(String),
}
