use crate::dictionary::Dictionary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel id for the currently active revision.
pub const CURRENT_REVISION: &str = "current";

/// Identifies one dictionary snapshot: either the currently active field
/// set or a historical production revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionHandle {
    Current,
    Id(String),
}

impl RevisionHandle {
    /// Parse a handle from user input (`"current"` or a revision id).
    pub fn parse(raw: &str) -> Self {
        if raw == CURRENT_REVISION {
            Self::Current
        } else {
            Self::Id(raw.to_owned())
        }
    }
}

impl fmt::Display for RevisionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str(CURRENT_REVISION),
            Self::Id(id) => f.write_str(id),
        }
    }
}

/// One raw production-approval row as the host system stores it,
/// oldest first. User references are unresolved ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionRow {
    pub id: String,
    #[serde(rename = "tsApproved")]
    pub ts_approved: String,
    #[serde(rename = "requesterId")]
    pub requester_id: String,
    #[serde(rename = "approverId")]
    pub approver_id: String,
    #[serde(default)]
    pub automatic: bool,
}

/// Raw revision history for one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectHistory {
    pub rows: Vec<RevisionRow>,
    /// When the project was first moved to production, if known.
    #[serde(rename = "productionTime", default)]
    pub production_time: Option<String>,
    /// User id of whoever moved the project to production; stored
    /// separately from the approval rows in the host system.
    #[serde(rename = "productionMoverId", default)]
    pub production_mover_id: Option<String>,
}

/// A revision as presented to callers: labelled, newest first, with
/// resolved requester/approver display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionDescriptor {
    pub id: String,
    pub label: String,
    #[serde(rename = "tsApproved")]
    pub ts_approved: String,
    pub requester: String,
    pub approver: String,
    #[serde(rename = "automaticApproval")]
    pub automatic_approval: bool,
}

/// Retrieval collaborator: hands out dictionary snapshots and the raw
/// revision history. The diff core treats implementations as black boxes
/// and never validates schema consistency beyond positional alignment.
pub trait DictionarySource {
    type Error: std::error::Error;

    /// Fetch the full dictionary at a revision.
    fn fetch_dictionary(&self, revision: &RevisionHandle) -> Result<Dictionary, Self::Error>;

    /// Raw approval rows plus production metadata, oldest row first.
    fn history(&self) -> Result<ProjectHistory, Self::Error>;
}
