//! Repository for the `campaigns` and `campaign_versions` tables.

use outreach_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::campaign::{Campaign, CampaignSummary, UpdateCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, is_paused, is_archived, is_valid, \
    li_account_id, created_at";

/// Provides reads and flag updates for campaigns.
///
/// Campaign rows are created by the automation application; this repository
/// never inserts or deletes them.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Find a campaign by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = ?1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a campaign with this ID exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM campaigns WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// List campaigns newest first, each with its number of actions.
    ///
    /// Archived campaigns are skipped unless `include_archived` is set. A NULL
    /// archived flag counts as not archived.
    pub async fn list(
        pool: &SqlitePool,
        include_archived: bool,
    ) -> Result<Vec<CampaignSummary>, sqlx::Error> {
        sqlx::query_as::<_, CampaignSummary>(
            "SELECT c.id, c.name, c.description, c.is_paused, c.is_archived, c.is_valid, \
                    c.li_account_id, c.created_at, \
                    (SELECT COUNT(*) FROM actions a WHERE a.campaign_id = c.id) AS action_count \
             FROM campaigns c \
             WHERE ?1 OR COALESCE(c.is_archived, 0) = 0 \
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(include_archived)
        .fetch_all(pool)
        .await
    }

    /// Partially update a campaign's name and description.
    ///
    /// Uses `COALESCE` for the name. `description` uses `Option<Option<String>>`
    /// so it can be cleared. Returns `None` if the campaign does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE campaigns SET \
                 name        = COALESCE(?2, name), \
                 description = CASE WHEN ?3 THEN ?4 ELSE description END \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(description_provided)
            .bind(description_value)
            .fetch_optional(pool)
            .await
    }

    /// Unconditionally mark a campaign valid. Returns `true` if a row matched.
    pub async fn mark_valid(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE campaigns SET is_valid = 1 WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set or clear the archived flag. Returns the updated row.
    pub async fn set_archived(
        pool: &SqlitePool,
        id: DbId,
        archived: bool,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET is_archived = ?2 WHERE id = ?1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(archived)
            .fetch_optional(pool)
            .await
    }

    /// Exclude-list reference of the campaign's latest version row.
    ///
    /// The outer `Option` is `None` when the campaign has no version row; the
    /// inner one is `None` when that row carries no reference.
    pub async fn latest_exclude_list_id(
        pool: &SqlitePool,
        campaign_id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<DbId>>(
            "SELECT exclude_list_id FROM campaign_versions \
             WHERE campaign_id = ?1 \
             ORDER BY id DESC LIMIT 1",
        )
        .bind(campaign_id)
        .fetch_optional(pool)
        .await
    }
}
