use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveTime;
use serde_json::Value;

use crate::workflows::requests::clock::FixedClock;
use crate::workflows::requests::domain::{
    MemberGrade, MemberInfo, MemberRequest, NotificationOutcome, RequestId,
};
use crate::workflows::requests::repository::{
    MemberStatusProvider, RequestStore, SmsSender, StoreError,
};
use crate::workflows::requests::{request_router, MemberRequestService};

pub(super) const CONTACT_NUMBER: &str = "444-1234-5678";

pub(super) type TestService<S> = MemberRequestService<FixedClock, StubMembers, S, SpySms>;

pub(super) fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).expect("valid time")
}

pub(super) fn member(grade: MemberGrade) -> MemberInfo {
    MemberInfo::new(grade, CONTACT_NUMBER)
}

pub(super) fn build_service(
    at: NaiveTime,
    grade: MemberGrade,
) -> (
    TestService<MemoryStore>,
    Arc<StubMembers>,
    Arc<MemoryStore>,
    Arc<SpySms>,
) {
    build_service_with(at, grade, MemoryStore::default(), SpySms::succeeding())
}

pub(super) fn build_service_with<S>(
    at: NaiveTime,
    grade: MemberGrade,
    store: S,
    sms: SpySms,
) -> (TestService<S>, Arc<StubMembers>, Arc<S>, Arc<SpySms>)
where
    S: RequestStore + 'static,
{
    let members = Arc::new(StubMembers::new(member(grade)));
    let store = Arc::new(store);
    let sms = Arc::new(sms);
    let service = MemberRequestService::new(
        Arc::new(FixedClock::new(at)),
        members.clone(),
        store.clone(),
        sms.clone(),
    );
    (service, members, store, sms)
}

pub(super) struct StubMembers {
    info: MemberInfo,
    calls: AtomicUsize,
}

impl StubMembers {
    pub(super) fn new(info: MemberInfo) -> Self {
        Self {
            info,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MemberStatusProvider for StubMembers {
    fn status(&self) -> MemberInfo {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.info.clone()
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    sequence: AtomicU64,
    records: Mutex<HashMap<RequestId, MemberRequest>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub(super) fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl RequestStore for MemoryStore {
    fn save(&self, request: MemberRequest) -> Result<RequestId, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let id = RequestId(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
        self.records
            .lock()
            .expect("store mutex poisoned")
            .insert(id, request.with_id(id));
        Ok(id)
    }

    fn find_by_id(&self, id: RequestId) -> Result<Option<MemberRequest>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

pub(super) struct UnavailableStore;

impl RequestStore for UnavailableStore {
    fn save(&self, _request: MemberRequest) -> Result<RequestId, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find_by_id(&self, _id: RequestId) -> Result<Option<MemberRequest>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct SpySms {
    succeed: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl SpySms {
    pub(super) fn succeeding() -> Self {
        Self {
            succeed: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing() -> Self {
        Self {
            succeed: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("sms mutex poisoned").clone()
    }

    pub(super) fn was_called(&self) -> bool {
        !self.sent().is_empty()
    }
}

impl SmsSender for SpySms {
    fn send(&self, contact_number: &str, message: &str) -> NotificationOutcome {
        self.sent
            .lock()
            .expect("sms mutex poisoned")
            .push((contact_number.to_string(), message.to_string()));
        if self.succeed {
            NotificationOutcome::sent("test-message-id")
        } else {
            NotificationOutcome::failed("simulated sms failure")
        }
    }
}

pub(super) fn router_with_service<S>(service: TestService<S>) -> axum::Router
where
    S: RequestStore + 'static,
{
    request_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
