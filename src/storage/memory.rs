//! In-memory mock storage implementation.
//!
//! All tables live behind one `RwLock`, so every trait method observes and
//! mutates a consistent snapshot.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fnv::FnvHashMap;

use crate::storage::{Group, GroupId, Mock, MockId, MockStore, NewMock, StoreError};

#[derive(Default)]
struct Tables {
    groups: FnvHashMap<GroupId, Group>,
    mocks: FnvHashMap<MockId, Mock>,
    last_group_id: GroupId,
    last_mock_id: MockId,
}

/// In-memory storage for groups and mocks.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    ///
    /// # Returns
    ///
    /// Returns a `MemoryStore` whose first group and first mock get id 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }
}

impl MockStore for MemoryStore {
    fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    fn insert_group(&self, name: &str) -> Result<GroupId, StoreError> {
        let mut tables = self.write()?;

        if tables.groups.values().any(|g| g.name == name) {
            return Err(StoreError::GroupAlreadyExists(name.to_string()));
        }

        tables.last_group_id += 1;
        let id = tables.last_group_id;
        tables.groups.insert(id, Group { id, name: name.to_string() });
        Ok(id)
    }

    fn list_groups(&self) -> Result<Vec<Group>, StoreError> {
        let tables = self.read()?;
        let mut groups: Vec<Group> = tables.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    fn delete_group(&self, id: GroupId) -> Result<usize, StoreError> {
        let mut tables = self.write()?;

        if tables.groups.remove(&id).is_none() {
            return Err(StoreError::GroupNotFound(id));
        }

        let before = tables.mocks.len();
        tables.mocks.retain(|_, m| m.group_id != id);
        Ok(before - tables.mocks.len())
    }

    fn insert_mock(&self, mock: NewMock) -> Result<MockId, StoreError> {
        let mut tables = self.write()?;

        if !tables.groups.contains_key(&mock.group_id) {
            return Err(StoreError::GroupNotFound(mock.group_id));
        }
        if tables.mocks.values().any(|m| m.group_id == mock.group_id && m.name == mock.name) {
            return Err(StoreError::MockNameExists { name: mock.name, group_id: mock.group_id });
        }

        tables.last_mock_id += 1;
        let id = tables.last_mock_id;
        tables.mocks.insert(id, mock.with_id(id));
        Ok(id)
    }

    fn mocks_in_group(&self, group_id: GroupId) -> Result<Vec<Mock>, StoreError> {
        let tables = self.read()?;
        let mut mocks: Vec<Mock> =
            tables.mocks.values().filter(|m| m.group_id == group_id).cloned().collect();
        mocks.sort_by_key(|m| m.id);
        Ok(mocks)
    }

    fn active_mocks_for(&self, method: &str, path: &str) -> Result<Vec<Mock>, StoreError> {
        let tables = self.read()?;
        let mut mocks: Vec<Mock> = tables
            .mocks
            .values()
            .filter(|m| m.active && m.rq_method == method && m.rq_path == path)
            .cloned()
            .collect();
        mocks.sort_by_key(|m| m.id);
        Ok(mocks)
    }

    fn toggle_mock(&self, id: MockId) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let mock = tables.mocks.get_mut(&id).ok_or(StoreError::MockNotFound(id))?;
        mock.active = !mock.active;
        Ok(mock.active)
    }
}
