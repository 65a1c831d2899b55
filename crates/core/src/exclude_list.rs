//! Exclude-list scope and collection tags.
//!
//! An exclude list is not a column. A campaign version or action version
//! points at a collection version, which in turn belongs to a collection
//! holding the member people.

use serde::{Deserialize, Serialize};

/// `version_operation_status` written on every collection version created
/// to back an exclude list.
pub const EXCLUDE_LIST_OPERATION: &str = "addToTarget";

/// Where an exclude list hangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcludeListScope {
    Campaign,
    Action,
}

impl ExcludeListScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::Action => "action",
        }
    }
}

impl std::fmt::Display for ExcludeListScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
