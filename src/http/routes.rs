//! HTTP routing configuration for both servers.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::http::handlers::*;
use crate::http::request_id::request_id;
use crate::http::state::AppState;

/// Build the router of the administrative API.
///
/// # Parameters
///
/// - `state` - Application state containing the admin operations
///
/// # Returns
///
/// Returns configured Axum `Router` with group and mock management endpoints.
pub fn build_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        // Groups
        .route("/api/v1/groups", get(list_groups).post(create_group))
        .route("/api/v1/groups/{group_id}", delete(delete_group))
        // Mocks
        .route("/api/v1/mocks", get(list_mocks).post(create_mock))
        .route("/api/v1/mocks/{mock_id}/toggle", post(toggle_mock))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Build the router of the mock-serving endpoint.
///
/// Every method on every path goes to [`serve_mock`].
pub fn build_mock_router(state: AppState) -> Router {
    Router::new().fallback(serve_mock).layer(middleware::from_fn(request_id)).with_state(state)
}
