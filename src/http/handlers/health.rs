//! Health check handler.

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::http::state::AppState;
use crate::http::types::Envelope;

/// Health check endpoint.
///
/// # Returns
///
/// Returns a success envelope if the store is reachable, otherwise `internal`.
pub async fn ping(State(state): State<AppState>) -> Result<Json<Envelope<()>>, ApiError> {
    state.admin.ping()?;
    Ok(Json(Envelope::ok()))
}
