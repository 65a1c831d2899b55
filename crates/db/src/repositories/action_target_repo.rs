//! Repository for the `action_target_people` table.
//!
//! The table has no unique key on `(action_id, person_id)`, so writers check
//! for an existing row and branch instead of relying on an upsert.

use outreach_core::processing_state::ProcessingState;
use outreach_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::action_target::{ActionPeopleCounts, ActionTargetPerson, NewActionTarget};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, action_id, action_version_id, person_id, state, li_account_id";

/// Provides state transitions for (action, person) target rows.
pub struct ActionTargetRepo;

impl ActionTargetRepo {
    /// Whether any target row exists for the pair.
    pub async fn exists(
        conn: &mut SqliteConnection,
        action_id: DbId,
        person_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM action_target_people \
             WHERE action_id = ?1 AND person_id = ?2 \
             LIMIT 1",
        )
        .bind(action_id)
        .bind(person_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(found.is_some())
    }

    /// Set the state of every target row for the pair. Returns rows updated.
    pub async fn set_state(
        conn: &mut SqliteConnection,
        action_id: DbId,
        person_id: DbId,
        state: ProcessingState,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE action_target_people SET state = ?3 \
             WHERE action_id = ?1 AND person_id = ?2",
        )
        .bind(action_id)
        .bind(person_id)
        .bind(state.as_i32())
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Insert a fresh queued row, returning its ID.
    pub async fn insert_queued(
        conn: &mut SqliteConnection,
        input: &NewActionTarget,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO action_target_people \
                (action_id, action_version_id, person_id, state, li_account_id) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING id",
        )
        .bind(input.action_id)
        .bind(input.action_version_id)
        .bind(input.person_id)
        .bind(ProcessingState::Queued.as_i32())
        .bind(input.li_account_id)
        .fetch_one(&mut *conn)
        .await
    }

    /// Re-queue the person on every action of the campaign. Returns rows updated.
    pub async fn requeue_in_campaign(
        conn: &mut SqliteConnection,
        campaign_id: DbId,
        person_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE action_target_people SET state = ?3 \
             WHERE person_id = ?2 \
               AND action_id IN (SELECT id FROM actions WHERE campaign_id = ?1)",
        )
        .bind(campaign_id)
        .bind(person_id)
        .bind(ProcessingState::Queued.as_i32())
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// List target rows of one action ordered by person.
    pub async fn list_by_action(
        pool: &SqlitePool,
        action_id: DbId,
    ) -> Result<Vec<ActionTargetPerson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM action_target_people \
             WHERE action_id = ?1 \
             ORDER BY person_id ASC, id ASC"
        );
        sqlx::query_as::<_, ActionTargetPerson>(&query)
            .bind(action_id)
            .fetch_all(pool)
            .await
    }

    /// Count target rows per processing state for each action of a campaign.
    ///
    /// Actions with no target rows are included with zero counts.
    pub async fn count_by_state(
        pool: &SqlitePool,
        campaign_id: DbId,
    ) -> Result<Vec<ActionPeopleCounts>, sqlx::Error> {
        sqlx::query_as::<_, ActionPeopleCounts>(
            "SELECT a.id AS action_id, \
                    COALESCE(SUM(CASE WHEN t.state = ?2 THEN 1 ELSE 0 END), 0) AS queued, \
                    COALESCE(SUM(CASE WHEN t.state = ?3 THEN 1 ELSE 0 END), 0) AS processed, \
                    COALESCE(SUM(CASE WHEN t.state = ?4 THEN 1 ELSE 0 END), 0) AS successful, \
                    COALESCE(SUM(CASE WHEN t.state = ?5 THEN 1 ELSE 0 END), 0) AS failed \
             FROM actions a \
             LEFT JOIN action_target_people t ON t.action_id = a.id \
             WHERE a.campaign_id = ?1 \
             GROUP BY a.id \
             ORDER BY a.id ASC",
        )
        .bind(campaign_id)
        .bind(ProcessingState::Queued.as_i32())
        .bind(ProcessingState::Processed.as_i32())
        .bind(ProcessingState::Successful.as_i32())
        .bind(ProcessingState::Failed.as_i32())
        .fetch_all(pool)
        .await
    }
}
