//! Collection models backing exclude lists.

use outreach_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `collections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub id: DbId,
    pub li_account_id: DbId,
    pub name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `collection_people_versions` table.
///
/// Exclude-list references on campaign and action versions point here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollectionVersion {
    pub id: DbId,
    pub collection_id: DbId,
    pub version_operation_status: String,
    pub additional_data: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The pair of rows created for one exclude list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExcludeListChain {
    pub action_id: DbId,
    pub collection_id: DbId,
    pub collection_version_id: DbId,
}
