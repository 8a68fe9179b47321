//! Member request intake: business-hours gating, persistence, and SMS confirmation.
//!
//! Collaborators sit behind the traits in [`clock`] and [`repository`] so the service can be
//! exercised with in-memory doubles and a pinned clock.

pub mod clock;
pub mod domain;
pub mod policy;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    ContentError, MemberGrade, MemberInfo, MemberRequest, NotificationOutcome, NotificationView,
    RequestId, RequestView, ServiceResult,
};
pub use policy::{BusinessHoursPolicy, PolicyError};
pub use repository::{MemberStatusProvider, RequestStore, SmsSender, StoreError};
pub use router::{request_router, ApiResponse, CreateRequestPayload};
pub use service::{MemberRequestService, RequestServiceError, CONFIRMATION_MESSAGE};
