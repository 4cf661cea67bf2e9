//! Response envelope and payload types for HTTP handlers.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::admin::GroupView;
use crate::error::{ApiError, ErrorCode};

/// Envelope wrapping every JSON response.
///
/// `error_code` is empty on success; the payload's fields are inlined next
/// to `success` and `error_code`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub error_code: &'static str,
    #[serde(flatten)]
    pub payload: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful envelope carrying a payload.
    pub fn success(payload: T) -> Self {
        Self { success: true, error_code: "", payload: Some(payload) }
    }
}

impl Envelope<()> {
    /// Successful envelope without a payload.
    pub fn ok() -> Self {
        Self { success: true, error_code: "", payload: None }
    }

    /// Failed envelope.
    pub fn error(code: ErrorCode) -> Self {
        Self { success: false, error_code: code.as_str(), payload: None }
    }
}

/// Payload of create operations.
#[derive(Debug, Serialize)]
pub struct IdPayload {
    pub id: u64,
}

/// Payload of group listings.
#[derive(Debug, Serialize)]
pub struct GroupsPayload {
    pub groups: Vec<GroupView>,
}

/// Payload of the activation toggle.
#[derive(Debug, Serialize)]
pub struct ActivePayload {
    pub active: bool,
}

/// Payload of group deletion.
#[derive(Debug, Serialize)]
pub struct DeletedPayload {
    pub deleted_mocks: usize,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(_) => error!(error = %self, "request failed"),
            _ => warn!(error = %self, "request rejected"),
        }

        (self.status(), Json(Envelope::error(self.code()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test success envelope with payload.
    #[test]
    fn test_envelope_success() {
        let envelope = Envelope::success(IdPayload { id: 10 });
        let json = serde_json::to_value(envelope).expect("valid structure");
        assert_eq!(json, serde_json::json!({"success": true, "error_code": "", "id": 10}));
    }

    /// Test success envelope without payload.
    #[test]
    fn test_envelope_ok() {
        let json = serde_json::to_value(Envelope::ok()).expect("valid structure");
        assert_eq!(json, serde_json::json!({"success": true, "error_code": ""}));
    }

    /// Test error envelope.
    #[test]
    fn test_envelope_error() {
        let envelope = Envelope::error(ErrorCode::GroupAlreadyExists);
        let json = serde_json::to_value(envelope).expect("valid structure");
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error_code": "group_already_exists"})
        );
    }

    /// Test that an `ApiError` renders as its status plus an error envelope.
    #[tokio::test]
    async fn test_api_error_response() {
        let response = ApiError::MockNotExists(3).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);

        let (_, body) = response.into_parts();
        let body_bytes = axum::body::to_bytes(body, usize::MAX).await.expect("read body");
        let json: serde_json::Value = serde_json::from_slice(&body_bytes).expect("parse JSON");

        assert_eq!(json["success"], false);
        assert_eq!(json["error_code"], "mock_not_exists");
    }
}
