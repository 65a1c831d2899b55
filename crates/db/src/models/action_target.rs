//! Action target person model.

use outreach_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `action_target_people` table.
///
/// The table has no uniqueness constraint on `(action_id, person_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionTargetPerson {
    pub id: DbId,
    pub action_id: DbId,
    pub action_version_id: DbId,
    pub person_id: DbId,
    pub state: i32,
    pub li_account_id: DbId,
}

/// Values for a freshly queued target row.
#[derive(Debug, Clone)]
pub struct NewActionTarget {
    pub action_id: DbId,
    pub action_version_id: DbId,
    pub person_id: DbId,
    pub li_account_id: DbId,
}

/// Target-row counts for one action, split by processing state.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct ActionPeopleCounts {
    pub action_id: DbId,
    pub queued: i64,
    pub processed: i64,
    pub successful: i64,
    pub failed: i64,
}
