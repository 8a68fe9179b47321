use std::fmt;

use serde::{Deserialize, Serialize};

/// Membership tier reported by the member status provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberGrade {
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl MemberGrade {
    pub fn label(&self) -> &'static str {
        match self {
            MemberGrade::Silver => "SILVER",
            MemberGrade::Gold => "GOLD",
            MemberGrade::Platinum => "PLATINUM",
            MemberGrade::Diamond => "DIAMOND",
        }
    }

    pub fn is_vip(&self) -> bool {
        matches!(self, MemberGrade::Platinum | MemberGrade::Diamond)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SILVER" => Some(MemberGrade::Silver),
            "GOLD" => Some(MemberGrade::Gold),
            "PLATINUM" => Some(MemberGrade::Platinum),
            "DIAMOND" => Some(MemberGrade::Diamond),
            _ => None,
        }
    }
}

impl fmt::Display for MemberGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of the calling member. Built per submission, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub grade: MemberGrade,
    pub contact_number: String,
}

impl MemberInfo {
    pub fn new(grade: MemberGrade, contact_number: impl Into<String>) -> Self {
        Self {
            grade,
            contact_number: contact_number.into(),
        }
    }

    pub fn is_vip(&self) -> bool {
        self.grade.is_vip()
    }
}

// Contact numbers stay out of logs and panic messages.
impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("grade", &self.grade)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberInfo{{grade={}}}", self.grade)
    }
}

/// Identifier assigned by the request store at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member's free-text request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRequest {
    id: Option<RequestId>,
    content: String,
}

impl MemberRequest {
    /// Build an unsaved request. Content must contain at least one non-whitespace character.
    pub fn new(content: impl Into<String>) -> Result<Self, ContentError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ContentError::Empty);
        }
        Ok(Self { id: None, content })
    }

    /// Return a copy carrying the store-assigned identifier.
    pub fn with_id(self, id: RequestId) -> Self {
        Self {
            id: Some(id),
            content: self.content,
        }
    }

    pub fn id(&self) -> Option<RequestId> {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Validation failure for inbound request content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("request content must not be empty")]
    Empty,
}

/// Result of a single SMS attempt. Exactly one of message id or error detail exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent { message_id: String },
    Failed { error: String },
}

impl NotificationOutcome {
    pub fn sent(message_id: impl Into<String>) -> Self {
        Self::Sent {
            message_id: message_id.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, NotificationOutcome::Sent { .. })
    }

    pub fn message_id(&self) -> Option<&str> {
        match self {
            NotificationOutcome::Sent { message_id } => Some(message_id),
            NotificationOutcome::Failed { .. } => None,
        }
    }

    pub fn error_detail(&self) -> Option<&str> {
        match self {
            NotificationOutcome::Sent { .. } => None,
            NotificationOutcome::Failed { error } => Some(error),
        }
    }

    pub fn view(&self) -> NotificationView {
        NotificationView {
            succeeded: self.succeeded(),
            message_id: self.message_id().map(str::to_string),
            error_detail: self.error_detail().map(str::to_string),
        }
    }
}

impl Serialize for NotificationOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.view().serialize(serializer)
    }
}

/// Flat wire shape of a [`NotificationOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

/// Outcome of an admitted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceResult {
    pub request_id: RequestId,
    pub notification: NotificationOutcome,
}

/// Public projection of a stored request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestView {
    pub request_id: RequestId,
    pub content: String,
}

impl RequestView {
    pub fn from_stored(request: &MemberRequest) -> Option<Self> {
        request.id().map(|request_id| Self {
            request_id,
            content: request.content().to_string(),
        })
    }
}
