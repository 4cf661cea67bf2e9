//! Error taxonomy shared by the admin API and the mock-serving endpoint.

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::storage::{GroupId, MockId, StoreError};
use crate::validation::ValidationError;

/// Closed vocabulary of error codes put in the `error_code` field of every
/// response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    GroupAlreadyExists,
    GroupNotExists,
    MockNameExists,
    MockNotExists,
    Internal,
}

impl ErrorCode {
    /// Wire representation of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::GroupAlreadyExists => "group_already_exists",
            Self::GroupNotExists => "group_not_exists",
            Self::MockNameExists => "mock_name_exists",
            Self::MockNotExists => "mock_not_exists",
            Self::Internal => "internal",
        }
    }

    /// HTTP status paired with the code.
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::GroupAlreadyExists
            | Self::GroupNotExists
            | Self::MockNameExists
            | Self::MockNotExists => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failed API operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("no mock matched the request")]
    NotFound,
    #[error("group with name [{0}] already exists")]
    GroupAlreadyExists(String),
    #[error("group [{0}] does not exist")]
    GroupNotExists(GroupId),
    #[error("mock with name [{name}] already exists in group [{group_id}]")]
    MockNameExists { name: String, group_id: GroupId },
    #[error("mock [{0}] does not exist")]
    MockNotExists(MockId),
    #[error("internal: {0}")]
    Internal(String),
}

impl ApiError {
    /// Error code reported to the client.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest(_) => ErrorCode::BadRequest,
            Self::NotFound => ErrorCode::NotFound,
            Self::GroupAlreadyExists(_) => ErrorCode::GroupAlreadyExists,
            Self::GroupNotExists(_) => ErrorCode::GroupNotExists,
            Self::MockNameExists { .. } => ErrorCode::MockNameExists,
            Self::MockNotExists(_) => ErrorCode::MockNotExists,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// HTTP status reported to the client.
    pub const fn status(&self) -> StatusCode {
        self.code().status()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::GroupAlreadyExists(name) => Self::GroupAlreadyExists(name),
            StoreError::GroupNotFound(id) => Self::GroupNotExists(id),
            StoreError::MockNameExists { name, group_id } => {
                Self::MockNameExists { name, group_id }
            }
            StoreError::MockNotFound(id) => Self::MockNotExists(id),
            StoreError::Unavailable(reason) => Self::Internal(reason),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
