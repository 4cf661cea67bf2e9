//! Input validation for administrative requests.
//!
//! Every check runs before the store is touched. The reason is logged by
//! the caller; clients only see a `bad_request` error code.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use thiserror::Error;

use crate::admin::{CreateGroupRequest, CreateMockRequest};
use crate::multimap::MultiMapEntry;

/// HTTP verbs a mock may be registered for.
pub const HTTP_METHODS: [&str; 9] =
    ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "CONNECT", "OPTIONS", "TRACE"];

/// Reason a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is empty")]
    Empty(&'static str),
    #[error("group_id [{0}] is not valid")]
    GroupId(i64),
    #[error("rq method [{0}] is not valid")]
    Method(String),
    #[error("cannot add rq body for GET method")]
    GetWithBody,
    #[error("rq path [{0}] must start with '/'")]
    Path(String),
    #[error("rs status [{0}] is not valid")]
    Status(i64),
    #[error("{field} [{key}] has an empty value")]
    EmptyValue { field: &'static str, key: String },
    #[error("header [{0}] is not a valid HTTP header")]
    Header(String),
}

/// Reject values that are empty or consist only of whitespace.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}

/// Validate a group creation request.
pub fn validate_group(rq: &CreateGroupRequest) -> Result<(), ValidationError> {
    require_non_empty("name", &rq.name)
}

/// Validate a mock creation request.
///
/// # Errors
///
/// Returns the first rule the request breaks.
pub fn validate_mock(rq: &CreateMockRequest) -> Result<(), ValidationError> {
    require_non_empty("name", &rq.name)?;

    if rq.group_id <= 0 {
        return Err(ValidationError::GroupId(rq.group_id));
    }

    // RQ
    require_non_empty("rq method", &rq.rq_method)?;
    if !HTTP_METHODS.contains(&rq.rq_method.as_str()) {
        return Err(ValidationError::Method(rq.rq_method.clone()));
    }
    if rq.rq_method == "GET" && !rq.rq_body.is_empty() {
        return Err(ValidationError::GetWithBody);
    }

    require_non_empty("rq path", &rq.rq_path)?;
    if !rq.rq_path.starts_with('/') {
        return Err(ValidationError::Path(rq.rq_path.clone()));
    }

    validate_entries("query param", &rq.rq_query_params)?;

    // RS
    if rq.rs_status <= 0
        || u16::try_from(rq.rs_status).map_or(true, |s| StatusCode::from_u16(s).is_err())
    {
        return Err(ValidationError::Status(rq.rs_status));
    }

    validate_entries("header", &rq.rs_headers)?;
    for header in &rq.rs_headers {
        let valid = HeaderName::from_bytes(header.key.as_bytes()).is_ok()
            && header.values.iter().all(|v| HeaderValue::from_str(v).is_ok());
        if !valid {
            return Err(ValidationError::Header(header.key.clone()));
        }
    }

    Ok(())
}

fn validate_entries(field: &'static str, entries: &[MultiMapEntry]) -> Result<(), ValidationError> {
    for entry in entries {
        require_non_empty(field, &entry.key)?;
        if entry.values.iter().any(|v| v.trim().is_empty()) {
            return Err(ValidationError::EmptyValue { field, key: entry.key.clone() });
        }
    }
    Ok(())
}
