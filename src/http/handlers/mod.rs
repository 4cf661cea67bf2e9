//! HTTP handlers for the admin API and the mock-serving endpoint.

pub mod groups;
pub mod health;
pub mod mocks;
pub mod serve;

// Re-export handlers for easier access
pub use groups::{create_group, delete_group, list_groups};
pub use health::ping;
pub use mocks::{create_mock, list_mocks, toggle_mock};
pub use serve::serve_mock;
