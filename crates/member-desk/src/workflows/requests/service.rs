use std::sync::Arc;

use tracing::{debug, info, warn};

use super::clock::Clock;
use super::domain::{ContentError, MemberRequest, RequestId, ServiceResult};
use super::policy::BusinessHoursPolicy;
use super::repository::{MemberStatusProvider, RequestStore, SmsSender, StoreError};

/// Text sent to the member once their request is stored.
pub const CONFIRMATION_MESSAGE: &str = "Your request has been received.";

/// Service composing the business-hours gate, request store, and SMS notification.
pub struct MemberRequestService<C, M, S, N> {
    policy: BusinessHoursPolicy,
    clock: Arc<C>,
    members: Arc<M>,
    store: Arc<S>,
    sms: Arc<N>,
}

impl<C, M, S, N> MemberRequestService<C, M, S, N>
where
    C: Clock + 'static,
    M: MemberStatusProvider + 'static,
    S: RequestStore + 'static,
    N: SmsSender + 'static,
{
    pub fn new(clock: Arc<C>, members: Arc<M>, store: Arc<S>, sms: Arc<N>) -> Self {
        Self::with_policy(BusinessHoursPolicy::standard(), clock, members, store, sms)
    }

    pub fn with_policy(
        policy: BusinessHoursPolicy,
        clock: Arc<C>,
        members: Arc<M>,
        store: Arc<S>,
        sms: Arc<N>,
    ) -> Self {
        Self {
            policy,
            clock,
            members,
            store,
            sms,
        }
    }

    pub fn policy(&self) -> &BusinessHoursPolicy {
        &self.policy
    }

    /// Gate, persist, then notify.
    ///
    /// Nothing is written or sent when the gate denies the submission. Once the request is
    /// stored, an SMS failure is reported in the result and never undoes the save.
    pub fn submit(&self, content: &str) -> Result<ServiceResult, RequestServiceError> {
        let member = self.members.status();
        debug!(grade = %member.grade, "member status resolved");

        let now = self.clock.now();
        if !self.policy.is_admitted(now, &member) {
            info!(grade = %member.grade, %now, "request rejected outside business hours");
            return Err(RequestServiceError::NotWithinBusinessHours);
        }

        let request = MemberRequest::new(content)?;
        let request_id = self.store.save(request)?;
        info!(%request_id, grade = %member.grade, "member request stored");

        let notification = self.sms.send(&member.contact_number, CONFIRMATION_MESSAGE);
        if let Some(error) = notification.error_detail() {
            warn!(%request_id, %error, "confirmation sms failed");
        }

        Ok(ServiceResult {
            request_id,
            notification,
        })
    }

    /// Fetch a stored request for API responses.
    pub fn get(&self, request_id: RequestId) -> Result<MemberRequest, RequestServiceError> {
        let request = self
            .store
            .find_by_id(request_id)?
            .ok_or(StoreError::NotFound)?;
        Ok(request)
    }
}

/// Error raised by the member request service.
#[derive(Debug, thiserror::Error)]
pub enum RequestServiceError {
    #[error("requests are only accepted between business hours unless the member is VIP")]
    NotWithinBusinessHours,
    #[error(transparent)]
    InvalidContent(#[from] ContentError),
    #[error(transparent)]
    Persistence(#[from] StoreError),
}
