use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::domain::{RequestId, RequestView};
use super::repository::{MemberStatusProvider, RequestStore, SmsSender, StoreError};
use super::service::{MemberRequestService, RequestServiceError};

/// Inbound body for `POST /api/v1/requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestPayload {
    pub content: String,
}

/// Success/failure envelope shared by every request endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "request processed successfully".to_string(),
            data: Some(data),
        }
    }

    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.to_string(),
            message: message.into(),
            data: None,
        }
    }
}

type Service<C, M, S, N> = Arc<MemberRequestService<C, M, S, N>>;

/// Router builder exposing the request intake and lookup endpoints.
pub fn request_router<C, M, S, N>(service: Service<C, M, S, N>) -> Router
where
    C: Clock + 'static,
    M: MemberStatusProvider + 'static,
    S: RequestStore + 'static,
    N: SmsSender + 'static,
{
    Router::new()
        .route("/api/v1/requests", post(create_handler::<C, M, S, N>))
        .route(
            "/api/v1/requests/:request_id",
            get(lookup_handler::<C, M, S, N>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<C, M, S, N>(
    State(service): State<Service<C, M, S, N>>,
    payload: Result<axum::Json<CreateRequestPayload>, JsonRejection>,
) -> Response
where
    C: Clock + 'static,
    M: MemberStatusProvider + 'static,
    S: RequestStore + 'static,
    N: SmsSender + 'static,
{
    let axum::Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let body = ApiResponse::<()>::failure("INVALID_PAYLOAD", rejection.body_text());
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }
    };

    match service.submit(&payload.content) {
        Ok(result) => (StatusCode::OK, axum::Json(ApiResponse::success(result))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn lookup_handler<C, M, S, N>(
    State(service): State<Service<C, M, S, N>>,
    Path(request_id): Path<u64>,
) -> Response
where
    C: Clock + 'static,
    M: MemberStatusProvider + 'static,
    S: RequestStore + 'static,
    N: SmsSender + 'static,
{
    let view = service
        .get(RequestId(request_id))
        .map(|request| RequestView::from_stored(&request));

    match view {
        Ok(Some(view)) => (StatusCode::OK, axum::Json(ApiResponse::success(view))).into_response(),
        Ok(None) => error_response(RequestServiceError::Persistence(StoreError::Unavailable(
            "stored request is missing its identifier".to_string(),
        ))),
        Err(RequestServiceError::Persistence(StoreError::NotFound)) => {
            let payload = ApiResponse::<()>::failure(
                "REQUEST_NOT_FOUND",
                format!("request {request_id} not found"),
            );
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: RequestServiceError) -> Response {
    let (status, code) = match &error {
        RequestServiceError::NotWithinBusinessHours => {
            (StatusCode::FORBIDDEN, "NOT_WITHIN_BUSINESS_HOURS")
        }
        RequestServiceError::InvalidContent(_) => (StatusCode::BAD_REQUEST, "INVALID_CONTENT"),
        RequestServiceError::Persistence(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_FAILURE")
        }
    };

    let payload = ApiResponse::<()>::failure(code, error.to_string());
    (status, axum::Json(payload)).into_response()
}
