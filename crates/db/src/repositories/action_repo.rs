//! Repository for the `actions`, `action_versions` and `action_configs` tables.
//!
//! Chain order is ascending action `id`; the schema has no sequence column.
//! Each action may own several version rows and only the one with the
//! greatest `id` is authoritative.

use outreach_core::action_settings;
use outreach_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::action::{ActionRow, ActionVersion, CampaignAction, NewActionConfig};

/// Select list for an action joined to its latest version and config.
const JOINED_COLUMNS: &str = "a.id, a.campaign_id, a.name, a.description, \
    v.id AS version_id, v.exclude_list_id, c.id AS config_id, \
    c.actionType AS action_type, c.actionSettings AS action_settings, \
    c.coolDown AS cool_down, \
    c.maxActionResultsPerIteration AS max_action_results_per_iteration, \
    c.isDraft AS is_draft";

/// Join from `actions a` to the latest version `v` and its config `c`.
const LATEST_VERSION_JOIN: &str = "FROM actions a \
    JOIN action_versions v \
      ON v.id = (SELECT MAX(id) FROM action_versions WHERE action_id = a.id) \
    JOIN action_configs c ON c.id = v.config_id";

/// Column list for `action_versions`.
const VERSION_COLUMNS: &str = "id, action_id, config_id, exclude_list_id";

/// Provides chain reads and the inserts used when appending an action.
pub struct ActionRepo;

impl ActionRepo {
    // ── Reads ────────────────────────────────────────────────────────

    /// List a campaign's action chain in ascending `id` order.
    ///
    /// Actions without any version row are not part of the chain.
    pub async fn list_by_campaign(
        pool: &SqlitePool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignAction>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {LATEST_VERSION_JOIN} \
             WHERE a.campaign_id = ?1 \
             ORDER BY a.id ASC"
        );
        let rows = sqlx::query_as::<_, ActionRow>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CampaignAction::from).collect())
    }

    /// Find one action of a campaign with its latest version and config.
    pub async fn find_in_campaign(
        pool: &SqlitePool,
        campaign_id: DbId,
        action_id: DbId,
    ) -> Result<Option<CampaignAction>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {LATEST_VERSION_JOIN} \
             WHERE a.campaign_id = ?1 AND a.id = ?2"
        );
        let row = sqlx::query_as::<_, ActionRow>(&query)
            .bind(campaign_id)
            .bind(action_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(CampaignAction::from))
    }

    /// Whether `action_id` belongs to `campaign_id`.
    pub async fn belongs_to_campaign(
        pool: &SqlitePool,
        campaign_id: DbId,
        action_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM actions WHERE id = ?1 AND campaign_id = ?2")
                .bind(action_id)
                .bind(campaign_id)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }

    /// Every version row of every action in the campaign, ordered by `id`.
    pub async fn list_versions_by_campaign(
        pool: &SqlitePool,
        campaign_id: DbId,
    ) -> Result<Vec<ActionVersion>, sqlx::Error> {
        sqlx::query_as::<_, ActionVersion>(
            "SELECT v.id, v.action_id, v.config_id, v.exclude_list_id \
             FROM action_versions v \
             JOIN actions a ON a.id = v.action_id \
             WHERE a.campaign_id = ?1 \
             ORDER BY v.id ASC",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    /// The latest version row of each action in the campaign, in chain order.
    pub async fn list_latest_versions(
        pool: &SqlitePool,
        campaign_id: DbId,
    ) -> Result<Vec<ActionVersion>, sqlx::Error> {
        sqlx::query_as::<_, ActionVersion>(
            "SELECT v.id, v.action_id, v.config_id, v.exclude_list_id \
             FROM actions a \
             JOIN action_versions v \
               ON v.id = (SELECT MAX(id) FROM action_versions WHERE action_id = a.id) \
             WHERE a.campaign_id = ?1 \
             ORDER BY a.id ASC",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    /// Exclude-list reference of the action's latest version row.
    ///
    /// The outer `Option` is `None` when the action has no version row.
    pub async fn latest_exclude_list_id(
        pool: &SqlitePool,
        action_id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<DbId>>(
            "SELECT exclude_list_id FROM action_versions \
             WHERE action_id = ?1 \
             ORDER BY id DESC LIMIT 1",
        )
        .bind(action_id)
        .fetch_optional(pool)
        .await
    }

    // ── Writes (run on the caller's transaction) ─────────────────────

    /// Insert an `action_configs` row, returning its ID.
    pub async fn create_config(
        conn: &mut SqliteConnection,
        input: &NewActionConfig,
    ) -> Result<DbId, sqlx::Error> {
        let settings = action_settings::serialize_action_settings(Some(&input.action_settings));
        sqlx::query_scalar(
            "INSERT INTO action_configs \
                (actionType, actionSettings, coolDown, maxActionResultsPerIteration, isDraft) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING id",
        )
        .bind(&input.action_type)
        .bind(settings)
        .bind(input.cool_down)
        .bind(input.max_action_results_per_iteration)
        .bind(input.is_draft)
        .fetch_one(&mut *conn)
        .await
    }

    /// Insert an `actions` row, returning its ID.
    pub async fn create(
        conn: &mut SqliteConnection,
        campaign_id: DbId,
        name: &str,
        description: Option<&str>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO actions (campaign_id, name, description) \
             VALUES (?1, ?2, ?3) \
             RETURNING id",
        )
        .bind(campaign_id)
        .bind(name)
        .bind(description)
        .fetch_one(&mut *conn)
        .await
    }

    /// Insert an `action_versions` row without an exclude list.
    pub async fn create_version(
        conn: &mut SqliteConnection,
        action_id: DbId,
        config_id: DbId,
    ) -> Result<ActionVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_versions (action_id, config_id) \
             VALUES (?1, ?2) \
             RETURNING {VERSION_COLUMNS}"
        );
        sqlx::query_as::<_, ActionVersion>(&query)
            .bind(action_id)
            .bind(config_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Point a version row at a collection version. Returns `true` if updated.
    pub async fn set_exclude_list(
        conn: &mut SqliteConnection,
        version_id: DbId,
        exclude_list_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE action_versions SET exclude_list_id = ?2 WHERE id = ?1")
            .bind(version_id)
            .bind(exclude_list_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
