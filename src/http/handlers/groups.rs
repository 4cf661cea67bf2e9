//! Group administration handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::admin::CreateGroupRequest;
use crate::error::ApiError;
use crate::http::state::AppState;
use crate::http::types::{DeletedPayload, Envelope, GroupsPayload, IdPayload};
use crate::storage::GroupId;

/// Create a group.
///
/// # Returns
///
/// Returns 201 with the new group's id.
pub async fn create_group(
    State(state): State<AppState>,
    payload: Result<Json<CreateGroupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<IdPayload>>), ApiError> {
    info!("create group handler...");

    let Json(rq) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = state.admin.create_group(rq)?;

    Ok((StatusCode::CREATED, Json(Envelope::success(IdPayload { id }))))
}

/// List groups ordered by name, without their mocks.
pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<Envelope<GroupsPayload>>, ApiError> {
    info!("get groups handler...");

    let groups = state.admin.list_groups(false)?;
    Ok(Json(Envelope::success(GroupsPayload { groups })))
}

/// Delete a group and every mock it owns.
pub async fn delete_group(
    State(state): State<AppState>,
    group_id: Result<Path<GroupId>, PathRejection>,
) -> Result<Json<Envelope<DeletedPayload>>, ApiError> {
    info!("delete group handler...");

    let Path(group_id) = group_id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let deleted_mocks = state.admin.delete_group(group_id)?;

    Ok(Json(Envelope::success(DeletedPayload { deleted_mocks })))
}
