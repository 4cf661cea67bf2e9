//! # HTTP Mock Library
//!
//! A library for running an HTTP service-virtualization server: callers
//! register canned request/response pairs ("mocks") grouped into named
//! collections, and a second endpoint replays the stored response of the
//! mock matching each inbound request.
//!
//! This library provides components for:
//! - **Canonical Multi-Map**: Order-independent form of query parameters and headers
//! - **Resolution Engine**: Matching of method, path, body and query parameters to a mock
//! - **Admin Operations**: Validated creation, listing and toggling of groups and mocks
//! - **In-Memory Storage**: Storage backend behind the `MockStore` trait
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use http_mock_rs::{MemoryStore, http::{build_admin_router, build_mock_router}};
//!
//! # async fn example() -> std::io::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//!
//! let state = http_mock_rs::http::AppState::builder()
//!     .with_store(store)
//!     .build()?;
//! let admin = build_admin_router(state.clone());
//! let mocks = build_mock_router(state);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod error;
pub mod http;
pub mod multimap;
pub mod resolver;
pub mod seed;
pub mod storage;
pub mod validation;

// Re-export commonly used types for convenience
pub use admin::{Admin, CreateGroupRequest, CreateMockRequest, GroupView, MockView};
pub use error::{ApiError, ErrorCode};
pub use multimap::{canonicalize, decanonicalize, MultiMap, MultiMapEntry};
pub use resolver::{MockResolver, RequestShape};
pub use seed::SeedBook;
pub use storage::{Group, MemoryStore, Mock, MockStore, NewMock, StoreError};
