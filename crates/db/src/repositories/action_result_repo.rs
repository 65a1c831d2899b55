//! Repository for `action_results` and its owned `action_result_flags` and
//! `action_result_messages` rows.

use outreach_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::action_result::{ActionResult, ErrorGroupRow, ResultCodeCount, ResultWindowRow};

/// Provides result listings, statistics groupings and per-person cleanup.
pub struct ActionResultRepo;

impl ActionResultRepo {
    /// Most recent results across every action of a campaign.
    pub async fn list_by_campaign(
        pool: &SqlitePool,
        campaign_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActionResult>, sqlx::Error> {
        sqlx::query_as::<_, ActionResult>(
            "SELECT r.id, r.action_version_id, v.action_id, r.person_id, r.result, \
                    r.platform, r.created_at \
             FROM action_results r \
             JOIN action_versions v ON v.id = r.action_version_id \
             JOIN actions a ON a.id = v.action_id \
             WHERE a.campaign_id = ?1 \
             ORDER BY r.created_at DESC, r.id DESC \
             LIMIT ?2",
        )
        .bind(campaign_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Result counts per result code over all versions of an action.
    pub async fn count_by_code(
        pool: &SqlitePool,
        action_id: DbId,
    ) -> Result<Vec<ResultCodeCount>, sqlx::Error> {
        sqlx::query_as::<_, ResultCodeCount>(
            "SELECT r.result, COUNT(*) AS count \
             FROM action_results r \
             JOIN action_versions v ON v.id = r.action_version_id \
             WHERE v.action_id = ?1 \
             GROUP BY r.result",
        )
        .bind(action_id)
        .fetch_all(pool)
        .await
    }

    /// Earliest and latest result timestamps of an action.
    pub async fn result_window(
        pool: &SqlitePool,
        action_id: DbId,
    ) -> Result<ResultWindowRow, sqlx::Error> {
        sqlx::query_as::<_, ResultWindowRow>(
            "SELECT MIN(r.created_at) AS first_result_at, MAX(r.created_at) AS last_result_at \
             FROM action_results r \
             JOIN action_versions v ON v.id = r.action_version_id \
             WHERE v.action_id = ?1",
        )
        .bind(action_id)
        .fetch_one(pool)
        .await
    }

    /// Flagged results of an action grouped by code, exception flag and
    /// blame. Flags without a code are ignored. Unordered.
    pub async fn error_groups(
        pool: &SqlitePool,
        action_id: DbId,
    ) -> Result<Vec<ErrorGroupRow>, sqlx::Error> {
        sqlx::query_as::<_, ErrorGroupRow>(
            "SELECT f.code, f.is_exception, f.who_to_blame, \
                    COUNT(DISTINCT r.id) AS count \
             FROM action_result_flags f \
             JOIN action_results r ON r.id = f.action_result_id \
             JOIN action_versions v ON v.id = r.action_version_id \
             WHERE v.action_id = ?1 AND f.code IS NOT NULL \
             GROUP BY f.code, f.is_exception, f.who_to_blame",
        )
        .bind(action_id)
        .fetch_all(pool)
        .await
    }

    /// Delete a person's result for one action version together with its
    /// flags and messages. Returns the number of result rows removed.
    pub async fn delete_for_person(
        conn: &mut SqliteConnection,
        action_version_id: DbId,
        person_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        sqlx::query(
            "DELETE FROM action_result_flags WHERE action_result_id IN \
                (SELECT id FROM action_results WHERE action_version_id = ?1 AND person_id = ?2)",
        )
        .bind(action_version_id)
        .bind(person_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "DELETE FROM action_result_messages WHERE action_result_id IN \
                (SELECT id FROM action_results WHERE action_version_id = ?1 AND person_id = ?2)",
        )
        .bind(action_version_id)
        .bind(person_id)
        .execute(&mut *conn)
        .await?;

        let result = sqlx::query(
            "DELETE FROM action_results WHERE action_version_id = ?1 AND person_id = ?2",
        )
        .bind(action_version_id)
        .bind(person_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}
