//! Application state shared by the admin and mock-serving routers.

use std::io;
use std::sync::Arc;

use crate::admin::Admin;
use crate::resolver::MockResolver;
use crate::storage::MockStore;

/// Application state shared across all HTTP handlers.
///
/// Both services are built on top of the same injected store.
#[derive(Clone)]
pub struct AppState {
    /// Administrative operations
    pub admin: Admin,
    /// Request-to-mock resolution
    pub resolver: MockResolver,
}

impl AppState {
    /// Create new application state over a store.
    ///
    /// # Parameters
    ///
    /// - `store` - Storage collaborator shared by admin operations and resolution
    ///
    /// # Returns
    ///
    /// Returns configured `AppState` instance.
    pub fn new(store: Arc<dyn MockStore>) -> Self {
        Self { admin: Admin::new(store.clone()), resolver: MockResolver::new(store) }
    }

    /// Get a builder for configuring application state step by step.
    ///
    /// # Returns
    ///
    /// Returns an `AppStateBuilder` for fluent configuration.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }
}

/// Builder for constructing AppState with fluent interface.
#[derive(Default)]
pub struct AppStateBuilder {
    store: Option<Arc<dyn MockStore>>,
}

impl AppStateBuilder {
    /// Create a new builder with default values.
    ///
    /// # Returns
    ///
    /// Returns a new `AppStateBuilder` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage implementation.
    ///
    /// # Parameters
    ///
    /// - `store` - Storage implementation to use
    ///
    /// # Returns
    ///
    /// Returns the builder for method chaining.
    pub fn with_store(mut self, store: Arc<dyn MockStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the final AppState.
    ///
    /// # Errors
    ///
    /// Returns error if no store was provided.
    pub fn build(self) -> io::Result<AppState> {
        let store = self.store.ok_or(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Store is required for AppState",
        ))?;

        Ok(AppState::new(store))
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStore;

    use super::*;

    /// Test that building without a store fails.
    #[test]
    fn test_builder_requires_store() {
        let err = AppState::builder().build().err().expect("store is required");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    /// Test that admin and resolver share the same store.
    #[test]
    fn test_builder_shares_store() {
        let state = AppState::builder()
            .with_store(Arc::new(MemoryStore::new()))
            .build()
            .expect("valid configuration");

        let group_id = state
            .admin
            .create_group(crate::admin::CreateGroupRequest { name: "g".into() })
            .expect("created");
        assert_eq!(group_id, 1);
        assert_eq!(state.admin.list_groups(false).expect("list").len(), 1);
    }
}
