//! Repository for `collections`, `collection_people_versions` and
//! `collection_people`, the generic person sets behind exclude lists.

use outreach_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::collection::{Collection, CollectionVersion};

/// Column list for `collection_people_versions`.
const VERSION_COLUMNS: &str = "id, collection_id, version_operation_status, additional_data, \
    created_at, updated_at";

/// Provides collection creation and idempotent membership edits.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert a `collections` row scoped to an account, returning its ID.
    pub async fn create(
        conn: &mut SqliteConnection,
        li_account_id: DbId,
        name: Option<&str>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO collections (li_account_id, name) \
             VALUES (?1, ?2) \
             RETURNING id",
        )
        .bind(li_account_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await
    }

    /// Insert a collection version recording `operation`, returning its ID.
    pub async fn create_version(
        conn: &mut SqliteConnection,
        collection_id: DbId,
        operation: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO collection_people_versions \
                (collection_id, version_operation_status, additional_data) \
             VALUES (?1, ?2, NULL) \
             RETURNING id",
        )
        .bind(collection_id)
        .bind(operation)
        .fetch_one(&mut *conn)
        .await
    }

    /// Find a collection by ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Collection>, sqlx::Error> {
        sqlx::query_as::<_, Collection>(
            "SELECT id, li_account_id, name, created_at, updated_at \
             FROM collections WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a collection version by ID.
    pub async fn find_version(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<CollectionVersion>, sqlx::Error> {
        let query = format!("SELECT {VERSION_COLUMNS} FROM collection_people_versions WHERE id = ?1");
        sqlx::query_as::<_, CollectionVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Member person IDs of a collection, ascending.
    pub async fn list_people(
        pool: &SqlitePool,
        collection_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT person_id FROM collection_people \
             WHERE collection_id = ?1 \
             ORDER BY person_id ASC",
        )
        .bind(collection_id)
        .fetch_all(pool)
        .await
    }

    /// Add a member. Returns `true` if a row was inserted, `false` if the
    /// person was already a member.
    pub async fn add_person(
        conn: &mut SqliteConnection,
        collection_id: DbId,
        person_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO collection_people (collection_id, person_id) \
             VALUES (?1, ?2)",
        )
        .bind(collection_id)
        .bind(person_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a member. Returns `true` if a row was deleted.
    pub async fn remove_person(
        conn: &mut SqliteConnection,
        collection_id: DbId,
        person_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM collection_people WHERE collection_id = ?1 AND person_id = ?2",
        )
        .bind(collection_id)
        .bind(person_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
