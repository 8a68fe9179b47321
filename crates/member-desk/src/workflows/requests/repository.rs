use super::domain::{MemberInfo, MemberRequest, NotificationOutcome, RequestId};

/// Storage abstraction. Implementations own identifier assignment and must never hand
/// out the same identifier twice, even under concurrent saves.
pub trait RequestStore: Send + Sync {
    fn save(&self, request: MemberRequest) -> Result<RequestId, StoreError>;
    fn find_by_id(&self, id: RequestId) -> Result<Option<MemberRequest>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("request not found")]
    NotFound,
    #[error("request already exists")]
    Conflict,
    #[error("request store unavailable: {0}")]
    Unavailable(String),
}

/// Looks up grade and contact details for the caller of the current submission.
pub trait MemberStatusProvider: Send + Sync {
    fn status(&self) -> MemberInfo;
}

/// Outbound SMS hook. Carrier failures are reported in the outcome, not raised.
pub trait SmsSender: Send + Sync {
    fn send(&self, contact_number: &str, message: &str) -> NotificationOutcome;
}
