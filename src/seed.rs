//! Seed files: groups and mocks loaded from YAML at start-up.
//!
//! Seeded records go through the same [`Admin`] operations as records created
//! over the API, so they obey the same validation and uniqueness rules.
//!
//! ```yaml
//! groups:
//!   - name: payments
//!     mocks:
//!       - name: charge-ok
//!         rq_method: POST
//!         rq_path: /charge
//!         rq_body: '{"amt":5}'
//!         rs_status: 200
//!         rs_headers:
//!           Content-Type: [application/json]
//!         rs_body: '{"ok":true}'
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::admin::{Admin, CreateGroupRequest, CreateMockRequest};
use crate::error::ApiError;
use crate::multimap::{canonicalize, MultiMap};

/// Errors that can occur when loading or applying a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    /// I/O error while reading the seed file.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A group or mock was refused by the admin operations.
    #[error("{what}: {source}")]
    Rejected {
        what: String,
        #[source]
        source: ApiError,
    },
    /// A store-assigned group id does not fit the request's id field.
    #[error("group id [{0}] is out of range")]
    GroupIdRange(u64),
}

/// Contents of a seed file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeedBook {
    #[serde(default)]
    pub groups: Vec<SeedGroup>,
}

/// A group with the mocks to create inside it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeedGroup {
    pub name: String,
    #[serde(default)]
    pub mocks: Vec<SeedMock>,
}

/// A mock definition; query parameters and headers use plain maps.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeedMock {
    pub name: String,
    pub rq_method: String,
    pub rq_path: String,
    #[serde(default)]
    pub rq_body: String,
    #[serde(default)]
    pub rq_query_params: MultiMap,
    pub rs_status: i64,
    #[serde(default)]
    pub rs_headers: MultiMap,
    #[serde(default)]
    pub rs_body: String,
}

/// Totals of what a seed file created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub groups: usize,
    pub mocks: usize,
}

impl SeedBook {
    /// Load a seed book from a YAML file.
    ///
    /// # Parameters
    ///
    /// - `path` - Path to the YAML seed file
    ///
    /// # Returns
    ///
    /// Returns `Ok(SeedBook)` on success, or `SeedError` if the file cannot be read or parsed.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let txt = fs::read_to_string(path)?;
        Self::from_yaml(&txt)
    }

    /// Parse a seed book from YAML text.
    pub fn from_yaml(txt: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(txt)?)
    }

    /// Create every group and mock of the book, in file order.
    ///
    /// Stops at the first rejected record; records created before it stay.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Rejected` naming the record that failed.
    pub fn apply(&self, admin: &Admin) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();

        for group in &self.groups {
            let group_id = admin
                .create_group(CreateGroupRequest { name: group.name.clone() })
                .map_err(|source| SeedError::Rejected {
                    what: format!("group [{}]", group.name),
                    source,
                })?;
            summary.groups += 1;

            for mock in &group.mocks {
                admin.create_mock(mock.to_request(group_id)?).map_err(|source| {
                    SeedError::Rejected {
                        what: format!("mock [{}] in group [{}]", mock.name, group.name),
                        source,
                    }
                })?;
                summary.mocks += 1;
            }
        }

        info!(groups = summary.groups, mocks = summary.mocks, "seed applied");
        Ok(summary)
    }
}

impl SeedMock {
    fn to_request(&self, group_id: u64) -> Result<CreateMockRequest, SeedError> {
        let group_id = i64::try_from(group_id).map_err(|_| SeedError::GroupIdRange(group_id))?;

        Ok(CreateMockRequest {
            name: self.name.clone(),
            group_id,
            rq_method: self.rq_method.clone(),
            rq_path: self.rq_path.clone(),
            rq_body: self.rq_body.clone(),
            rq_query_params: canonicalize(&self.rq_query_params),
            rs_status: self.rs_status,
            rs_headers: canonicalize(&self.rs_headers),
            rs_body: self.rs_body.clone(),
        })
    }
}
