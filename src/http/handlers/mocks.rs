//! Mock administration handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::admin::CreateMockRequest;
use crate::error::ApiError;
use crate::http::state::AppState;
use crate::http::types::{ActivePayload, Envelope, GroupsPayload, IdPayload};
use crate::storage::MockId;

/// List groups ordered by name, each with its mocks.
pub async fn list_mocks(
    State(state): State<AppState>,
) -> Result<Json<Envelope<GroupsPayload>>, ApiError> {
    info!("get mocks handler...");

    let groups = state.admin.list_groups(true)?;
    Ok(Json(Envelope::success(GroupsPayload { groups })))
}

/// Create a mock inside an existing group.
///
/// # Returns
///
/// Returns 201 with the new mock's id; the mock starts out active.
pub async fn create_mock(
    State(state): State<AppState>,
    payload: Result<Json<CreateMockRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<IdPayload>>), ApiError> {
    info!("create mock handler...");

    let Json(rq) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = state.admin.create_mock(rq)?;

    Ok((StatusCode::CREATED, Json(Envelope::success(IdPayload { id }))))
}

/// Flip a mock between active and inactive.
///
/// # Returns
///
/// Returns the mock's new activation state.
pub async fn toggle_mock(
    State(state): State<AppState>,
    mock_id: Result<Path<MockId>, PathRejection>,
) -> Result<Json<Envelope<ActivePayload>>, ApiError> {
    info!("toggle mock handler...");

    let Path(mock_id) = mock_id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let active = state.admin.toggle_mock(mock_id)?;

    Ok(Json(Envelope::success(ActivePayload { active })))
}
