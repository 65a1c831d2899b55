//! Campaign history model.

use outreach_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `person_in_campaigns_history`: the latest result of one person
/// in one campaign.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CampaignHistoryEntry {
    pub campaign_id: DbId,
    pub person_id: DbId,
    pub result_status: Option<i32>,
    pub result_id: Option<DbId>,
    pub result_action_version_id: Option<DbId>,
    pub result_action_iteration_id: Option<DbId>,
    pub result_data: Option<String>,
    pub result_data_message_id: Option<DbId>,
    pub add_to_target_date: Timestamp,
    pub add_to_target_or_result_saved_date: Timestamp,
}
