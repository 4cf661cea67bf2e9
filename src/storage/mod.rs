//! Mock and group records plus the storage abstraction that holds them.
//!
//! The store is the single source of truth for the server. Nothing above it
//! caches records between requests, so every resolution sees the latest
//! committed state.

pub mod memory;

// Re-export main implementations
pub use memory::MemoryStore;

use thiserror::Error;

use crate::multimap::MultiMapEntry;

/// Numeric identity of a group.
pub type GroupId = u64;

/// Numeric identity of a mock.
pub type MockId = u64;

/// Errors reported by a [`MockStore`].
///
/// Conflict variants are detected atomically with the write that would
/// violate them; `Unavailable` covers any backend fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("group with name [{0}] already exists")]
    GroupAlreadyExists(String),
    #[error("group [{0}] does not exist")]
    GroupNotFound(GroupId),
    #[error("mock with name [{name}] already exists in group [{group_id}]")]
    MockNameExists { name: String, group_id: GroupId },
    #[error("mock [{0}] does not exist")]
    MockNotFound(MockId),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for groups and mocks.
///
/// Implementations must make every method atomic with respect to the others:
/// uniqueness checks happen together with the insert, a group delete removes
/// its mocks in the same step, and the activation toggle is a single
/// conditional update so concurrent toggles never lose a flip.
pub trait MockStore: Send + Sync {
    /// Check that the backend is reachable.
    fn ping(&self) -> Result<(), StoreError>;

    /// Insert a group with a name not used by any other group.
    ///
    /// # Errors
    ///
    /// Returns `GroupAlreadyExists` if the name is taken.
    fn insert_group(&self, name: &str) -> Result<GroupId, StoreError>;

    /// All groups ordered by name.
    fn list_groups(&self) -> Result<Vec<Group>, StoreError>;

    /// Delete a group together with all of its mocks.
    ///
    /// # Returns
    ///
    /// Returns the number of mocks removed along with the group.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` if there is no such group.
    fn delete_group(&self, id: GroupId) -> Result<usize, StoreError>;

    /// Insert a mock into an existing group.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` if the owning group does not exist and
    /// `MockNameExists` if the group already has a mock with that name.
    fn insert_mock(&self, mock: NewMock) -> Result<MockId, StoreError>;

    /// Mocks owned by a group, ordered by id.
    fn mocks_in_group(&self, group_id: GroupId) -> Result<Vec<Mock>, StoreError>;

    /// Active mocks with exactly this method and path, ordered by id.
    fn active_mocks_for(&self, method: &str, path: &str) -> Result<Vec<Mock>, StoreError>;

    /// Flip the activation flag of a mock.
    ///
    /// # Returns
    ///
    /// Returns the flag's new value.
    ///
    /// # Errors
    ///
    /// Returns `MockNotFound` if there is no such mock.
    fn toggle_mock(&self, id: MockId) -> Result<bool, StoreError>;
}

/// A named collection of mocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// A stored request shape together with the response to replay for it.
///
/// `rq_query_params` and `rs_headers` are always kept in canonical form;
/// an empty sequence means "none".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mock {
    pub id: MockId,
    pub group_id: GroupId,
    pub name: String,
    pub active: bool,

    pub rq_method: String,
    pub rq_path: String,
    pub rq_body: String,
    pub rq_query_params: Vec<MultiMapEntry>,

    pub rs_status: u16,
    pub rs_headers: Vec<MultiMapEntry>,
    pub rs_body: String,
}

/// Everything needed to insert a mock; the store assigns the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMock {
    pub group_id: GroupId,
    pub name: String,
    pub active: bool,

    pub rq_method: String,
    pub rq_path: String,
    pub rq_body: String,
    pub rq_query_params: Vec<MultiMapEntry>,

    pub rs_status: u16,
    pub rs_headers: Vec<MultiMapEntry>,
    pub rs_body: String,
}

impl NewMock {
    /// Attach an identity, producing the stored record.
    pub(crate) fn with_id(self, id: MockId) -> Mock {
        Mock {
            id,
            group_id: self.group_id,
            name: self.name,
            active: self.active,
            rq_method: self.rq_method,
            rq_path: self.rq_path,
            rq_body: self.rq_body,
            rq_query_params: self.rq_query_params,
            rs_status: self.rs_status,
            rs_headers: self.rs_headers,
            rs_body: self.rs_body,
        }
    }
}
