//! Repository for the `person_in_campaigns_history` table.

use outreach_core::campaign_history::HISTORY_RESET_STATUS;
use outreach_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::campaign_history::CampaignHistoryEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "campaign_id, person_id, result_status, result_id, \
    result_action_version_id, result_action_iteration_id, result_data, \
    result_data_message_id, add_to_target_date, add_to_target_or_result_saved_date";

pub struct CampaignHistoryRepo;

impl CampaignHistoryRepo {
    /// Find the history row of one person in one campaign.
    pub async fn find(
        pool: &SqlitePool,
        campaign_id: DbId,
        person_id: DbId,
    ) -> Result<Option<CampaignHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM person_in_campaigns_history \
             WHERE campaign_id = ?1 AND person_id = ?2"
        );
        sqlx::query_as::<_, CampaignHistoryEntry>(&query)
            .bind(campaign_id)
            .bind(person_id)
            .fetch_optional(pool)
            .await
    }

    /// Clear every result-derived column and realign the saved date with the
    /// added date. Returns rows updated.
    pub async fn reset(
        conn: &mut SqliteConnection,
        campaign_id: DbId,
        person_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE person_in_campaigns_history SET \
                 result_status = ?3, \
                 result_id = NULL, \
                 result_action_version_id = NULL, \
                 result_action_iteration_id = NULL, \
                 result_data = NULL, \
                 result_data_message_id = NULL, \
                 add_to_target_or_result_saved_date = add_to_target_date \
             WHERE campaign_id = ?1 AND person_id = ?2",
        )
        .bind(campaign_id)
        .bind(person_id)
        .bind(HISTORY_RESET_STATUS)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}
