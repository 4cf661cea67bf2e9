//! HTTP servers: the admin API and the mock-serving endpoint.

pub mod handlers;
pub mod request_id;
pub mod routes;
pub mod state;
pub mod types;

pub use routes::{build_admin_router, build_mock_router};
pub use state::AppState;
