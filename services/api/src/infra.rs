use chrono::NaiveTime;
use member_desk::config::{MemberConfig, SmsMode};
use member_desk::workflows::requests::{
    MemberInfo, MemberRequest, MemberStatusProvider, NotificationOutcome, RequestId,
    RequestStore, SmsSender, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store. Identifiers come from an atomic sequence starting at 1.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRequestStore {
    sequence: Arc<AtomicU64>,
    records: Arc<Mutex<HashMap<RequestId, MemberRequest>>>,
}

impl RequestStore for InMemoryRequestStore {
    fn save(&self, request: MemberRequest) -> Result<RequestId, StoreError> {
        let id = RequestId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("request store mutex poisoned".to_string()))?;
        if guard.contains_key(&id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(id, request.with_id(id));
        Ok(id)
    }

    fn find_by_id(&self, id: RequestId) -> Result<Option<MemberRequest>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("request store mutex poisoned".to_string()))?;
        Ok(guard.get(&id).cloned())
    }
}

/// Reports the member profile configured through the environment.
#[derive(Debug, Clone)]
pub(crate) struct ConfiguredMemberStatus {
    info: MemberInfo,
}

impl ConfiguredMemberStatus {
    pub(crate) fn from_config(config: &MemberConfig) -> Self {
        Self {
            info: MemberInfo::new(config.grade, config.contact_number.clone()),
        }
    }
}

impl MemberStatusProvider for ConfiguredMemberStatus {
    fn status(&self) -> MemberInfo {
        self.info.clone()
    }
}

/// Stand-in for a carrier integration: logs the send and reports the configured outcome.
#[derive(Debug)]
pub(crate) struct ConsoleSmsSender {
    mode: SmsMode,
    sequence: AtomicU64,
}

impl ConsoleSmsSender {
    pub(crate) fn new(mode: SmsMode) -> Self {
        Self {
            mode,
            sequence: AtomicU64::new(1),
        }
    }
}

impl SmsSender for ConsoleSmsSender {
    fn send(&self, _contact_number: &str, message: &str) -> NotificationOutcome {
        match self.mode {
            SmsMode::Log => {
                let id = self.sequence.fetch_add(1, Ordering::Relaxed);
                let message_id = format!("sms-{id:06}");
                info!(%message_id, %message, "sms dispatched");
                NotificationOutcome::sent(message_id)
            }
            SmsMode::Fail => NotificationOutcome::failed("sms carrier unavailable"),
        }
    }
}

pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|err| format!("failed to parse '{raw}' as HH:MM[:SS] ({err})"))
}
