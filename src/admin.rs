//! Administrative operations: creating and listing groups and mocks,
//! toggling mock activation and deleting groups.
//!
//! These operations are independent of HTTP so they can be driven both by
//! the admin API handlers and by the start-up seed loader.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::multimap::{canonical_entries, MultiMapEntry};
use crate::storage::{Group, GroupId, Mock, MockId, MockStore, NewMock};
use crate::validation::{validate_group, validate_mock, ValidationError};

/// Body of a group creation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Body of a mock creation request.
///
/// Numeric fields are signed so that out-of-range values reach validation
/// instead of failing JSON decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateMockRequest {
    pub name: String,
    pub group_id: i64,

    pub rq_method: String,
    pub rq_path: String,
    #[serde(default)]
    pub rq_body: String,
    #[serde(default)]
    pub rq_query_params: Vec<MultiMapEntry>,

    pub rs_status: i64,
    #[serde(default)]
    pub rs_headers: Vec<MultiMapEntry>,
    #[serde(default)]
    pub rs_body: String,
}

/// A group as shown by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
    /// Present only when mocks were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mocks: Option<Vec<MockView>>,
}

/// A mock as shown by the admin API, with canonical query parameters and headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockView {
    pub id: MockId,
    pub name: String,
    pub active: bool,

    pub rq_method: String,
    pub rq_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rq_body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rq_query_params: Vec<MultiMapEntry>,

    pub rs_status: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rs_headers: Vec<MultiMapEntry>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rs_body: String,
}

impl From<Mock> for MockView {
    fn from(mock: Mock) -> Self {
        Self {
            id: mock.id,
            name: mock.name,
            active: mock.active,
            rq_method: mock.rq_method,
            rq_path: mock.rq_path,
            rq_body: mock.rq_body,
            rq_query_params: canonical_entries(&mock.rq_query_params),
            rs_status: mock.rs_status,
            rs_headers: canonical_entries(&mock.rs_headers),
            rs_body: mock.rs_body,
        }
    }
}

/// Administrative operations over an injected store.
#[derive(Clone)]
pub struct Admin {
    store: Arc<dyn MockStore>,
}

impl Admin {
    /// Create the admin service on top of a store.
    pub fn new(store: Arc<dyn MockStore>) -> Self {
        Self { store }
    }

    /// Check that the store is reachable.
    pub fn ping(&self) -> Result<(), ApiError> {
        Ok(self.store.ping()?)
    }

    /// Create a new group.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a blank name and `GroupAlreadyExists` if the
    /// name is taken.
    pub fn create_group(&self, rq: CreateGroupRequest) -> Result<GroupId, ApiError> {
        validate_group(&rq)?;

        let id = self.store.insert_group(&rq.name)?;
        info!(group_id = id, group_name = %rq.name, "group created");
        Ok(id)
    }

    /// Create a new, active mock.
    ///
    /// Query parameters and headers are stored in canonical form.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for invalid input, `GroupNotExists` for an unknown
    /// group and `MockNameExists` if the group already has a mock with that name.
    pub fn create_mock(&self, rq: CreateMockRequest) -> Result<MockId, ApiError> {
        validate_mock(&rq)?;

        let group_id =
            GroupId::try_from(rq.group_id).map_err(|_| ValidationError::GroupId(rq.group_id))?;
        let rs_status =
            u16::try_from(rq.rs_status).map_err(|_| ValidationError::Status(rq.rs_status))?;

        let mock = NewMock {
            group_id,
            name: rq.name,
            active: true,
            rq_method: rq.rq_method,
            rq_path: rq.rq_path,
            rq_body: rq.rq_body,
            rq_query_params: canonical_entries(&rq.rq_query_params),
            rs_status,
            rs_headers: canonical_entries(&rq.rs_headers),
            rs_body: rq.rs_body,
        };
        let name = mock.name.clone();

        let id = self.store.insert_mock(mock)?;
        info!(mock_id = id, mock_name = %name, group_id, "mock created");
        Ok(id)
    }

    /// Flip a mock's activation flag.
    ///
    /// # Returns
    ///
    /// Returns the new value of the flag.
    pub fn toggle_mock(&self, id: MockId) -> Result<bool, ApiError> {
        let active = self.store.toggle_mock(id)?;
        info!(mock_id = id, active, "mock activation toggled");
        Ok(active)
    }

    /// List all groups ordered by name, optionally with their mocks.
    pub fn list_groups(&self, with_mocks: bool) -> Result<Vec<GroupView>, ApiError> {
        let groups = self.store.list_groups()?;

        groups
            .into_iter()
            .map(|Group { id, name }| -> Result<GroupView, ApiError> {
                let mocks = if with_mocks {
                    let mocks = self.store.mocks_in_group(id)?;
                    Some(mocks.into_iter().map(MockView::from).collect())
                } else {
                    None
                };
                Ok(GroupView { id, name, mocks })
            })
            .collect()
    }

    /// Delete a group and all of its mocks.
    ///
    /// # Returns
    ///
    /// Returns the number of mocks deleted with the group.
    pub fn delete_group(&self, id: GroupId) -> Result<usize, ApiError> {
        let removed = self.store.delete_group(id)?;
        info!(group_id = id, removed_mocks = removed, "group deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::storage::MemoryStore;

    use super::*;

    fn admin() -> Admin {
        Admin::new(Arc::new(MemoryStore::new()))
    }

    fn charge_ok(group_id: i64) -> CreateMockRequest {
        CreateMockRequest {
            name: "charge-ok".into(),
            group_id,
            rq_method: "POST".into(),
            rq_path: "/charge".into(),
            rq_body: r#"{"amt":5}"#.into(),
            rq_query_params: vec![
                MultiMapEntry::new("b", ["2", "1"]),
                MultiMapEntry::new("a", ["x"]),
            ],
            rs_status: 200,
            rs_headers: vec![MultiMapEntry::new("X-Trace", ["b", "a"])],
            rs_body: r#"{"ok":true}"#.into(),
        }
    }

    /// Test group creation and duplicate detection.
    #[test]
    fn test_create_group() {
        let admin = admin();

        let id =
            admin.create_group(CreateGroupRequest { name: "payments".into() }).expect("created");
        assert_eq!(id, 1);

        let err =
            admin.create_group(CreateGroupRequest { name: "payments".into() }).expect_err("dup");
        assert_eq!(err.code(), ErrorCode::GroupAlreadyExists);

        let err = admin.create_group(CreateGroupRequest { name: "".into() }).expect_err("blank");
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    /// Test mock creation conflicts.
    #[test]
    fn test_create_mock_conflicts() {
        let admin = admin();
        let g =
            admin.create_group(CreateGroupRequest { name: "payments".into() }).expect("created");

        admin.create_mock(charge_ok(g as i64)).expect("created");

        let err = admin.create_mock(charge_ok(g as i64)).expect_err("dup");
        assert_eq!(err.code(), ErrorCode::MockNameExists);

        let err = admin.create_mock(charge_ok(77)).expect_err("no group");
        assert_eq!(err.code(), ErrorCode::GroupNotExists);

        let mut get_with_body = charge_ok(g as i64);
        get_with_body.rq_method = "GET".into();
        let err = admin.create_mock(get_with_body).expect_err("GET body");
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    /// Test that listed mocks carry canonical query parameters and headers.
    #[test]
    fn test_list_groups_with_mocks() {
        let admin = admin();
        let p =
            admin.create_group(CreateGroupRequest { name: "payments".into() }).expect("created");
        admin.create_group(CreateGroupRequest { name: "accounts".into() }).expect("created");
        let id = admin.create_mock(charge_ok(p as i64)).expect("created");

        let groups = admin.list_groups(false).expect("list");
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["accounts", "payments"]);
        assert!(groups.iter().all(|g| g.mocks.is_none()));

        let groups = admin.list_groups(true).expect("list");
        assert_eq!(groups[0].mocks.as_deref(), Some(&[][..]));
        let mocks = groups[1].mocks.as_ref().expect("mocks requested");
        assert_eq!(mocks[0].id, id);
        assert!(mocks[0].active);
        assert_eq!(
            mocks[0].rq_query_params,
            vec![MultiMapEntry::new("a", ["x"]), MultiMapEntry::new("b", ["1", "2"])]
        );
        assert_eq!(mocks[0].rs_headers, vec![MultiMapEntry::new("X-Trace", ["a", "b"])]);
    }

    /// Test toggling twice restores the original state.
    #[test]
    fn test_toggle_twice() {
        let admin = admin();
        let g = admin.create_group(CreateGroupRequest { name: "g".into() }).expect("created");
        let id = admin.create_mock(charge_ok(g as i64)).expect("created");

        assert!(!admin.toggle_mock(id).expect("toggle"));
        assert!(admin.toggle_mock(id).expect("toggle"));

        let err = admin.toggle_mock(id + 1).expect_err("unknown");
        assert_eq!(err.code(), ErrorCode::MockNotExists);
    }

    /// Test the JSON shape of a listed mock.
    #[test]
    fn test_mock_view_serialization() {
        let admin = admin();
        let g = admin.create_group(CreateGroupRequest { name: "g".into() }).expect("created");
        let mut rq = charge_ok(g as i64);
        rq.rq_method = "GET".into();
        rq.rq_body.clear();
        rq.rq_query_params.clear();
        rq.rs_headers.clear();
        rq.rs_body.clear();
        admin.create_mock(rq).expect("created");

        let groups = admin.list_groups(true).expect("list");
        let json = serde_json::to_value(&groups[0]).expect("serializable");

        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "g",
                "mocks": [{
                    "id": 1,
                    "name": "charge-ok",
                    "active": true,
                    "rq_method": "GET",
                    "rq_path": "/charge",
                    "rs_status": 200
                }]
            })
        );
    }
}
