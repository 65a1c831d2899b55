//! Row seeding helpers shared by the engine integration tests.
//!
//! Campaigns, actions and results are normally written by the automation
//! application, so tests insert them with raw SQL.

#![allow(dead_code)]

use outreach_engine::CampaignEngine;
use sqlx::SqlitePool;

pub const ACCOUNT_ID: i64 = 77;

pub fn engine(pool: &SqlitePool) -> CampaignEngine {
    CampaignEngine::new(pool.clone())
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

pub async fn insert_campaign(pool: &SqlitePool, name: &str) -> i64 {
    insert_campaign_with_flags(pool, name, None, None, None).await
}

pub async fn insert_campaign_with_flags(
    pool: &SqlitePool,
    name: &str,
    is_paused: Option<bool>,
    is_archived: Option<bool>,
    is_valid: Option<bool>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO campaigns (name, is_paused, is_archived, is_valid, li_account_id) \
         VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(name)
    .bind(is_paused)
    .bind(is_archived)
    .bind(is_valid)
    .bind(ACCOUNT_ID)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_campaign_at(pool: &SqlitePool, name: &str, created_at: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO campaigns (name, li_account_id, created_at) \
         VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(name)
    .bind(ACCOUNT_ID)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Insert a config, an action and one version without an exclude list.
/// Returns `(action_id, version_id)`.
pub async fn insert_action(pool: &SqlitePool, campaign_id: i64, name: &str) -> (i64, i64) {
    insert_action_with_settings(pool, campaign_id, name, "VisitAndExtract", Some("{}")).await
}

pub async fn insert_action_with_settings(
    pool: &SqlitePool,
    campaign_id: i64,
    name: &str,
    action_type: &str,
    settings: Option<&str>,
) -> (i64, i64) {
    let config_id: i64 = sqlx::query_scalar(
        "INSERT INTO action_configs (actionType, actionSettings) VALUES (?1, ?2) RETURNING id",
    )
    .bind(action_type)
    .bind(settings)
    .fetch_one(pool)
    .await
    .unwrap();

    let action_id: i64 = sqlx::query_scalar(
        "INSERT INTO actions (campaign_id, name) VALUES (?1, ?2) RETURNING id",
    )
    .bind(campaign_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    let version_id = insert_version(pool, action_id, config_id).await;
    (action_id, version_id)
}

pub async fn insert_version(pool: &SqlitePool, action_id: i64, config_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO action_versions (action_id, config_id) VALUES (?1, ?2) RETURNING id",
    )
    .bind(action_id)
    .bind(config_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn config_id_of_version(pool: &SqlitePool, version_id: i64) -> i64 {
    sqlx::query_scalar("SELECT config_id FROM action_versions WHERE id = ?1")
        .bind(version_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Exclude lists
// ---------------------------------------------------------------------------

/// Insert a collection and an `addToTarget` version. Returns
/// `(collection_id, collection_version_id)`.
pub async fn insert_exclude_list(pool: &SqlitePool) -> (i64, i64) {
    let collection_id: i64 = sqlx::query_scalar(
        "INSERT INTO collections (li_account_id) VALUES (?1) RETURNING id",
    )
    .bind(ACCOUNT_ID)
    .fetch_one(pool)
    .await
    .unwrap();

    let version_id: i64 = sqlx::query_scalar(
        "INSERT INTO collection_people_versions (collection_id, version_operation_status) \
         VALUES (?1, 'addToTarget') RETURNING id",
    )
    .bind(collection_id)
    .fetch_one(pool)
    .await
    .unwrap();

    (collection_id, version_id)
}

pub async fn attach_campaign_exclude_list(
    pool: &SqlitePool,
    campaign_id: i64,
    exclude_list_id: Option<i64>,
) {
    sqlx::query("INSERT INTO campaign_versions (campaign_id, exclude_list_id) VALUES (?1, ?2)")
        .bind(campaign_id)
        .bind(exclude_list_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn attach_action_exclude_list(pool: &SqlitePool, version_id: i64, exclude_list_id: i64) {
    sqlx::query("UPDATE action_versions SET exclude_list_id = ?2 WHERE id = ?1")
        .bind(version_id)
        .bind(exclude_list_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_member(pool: &SqlitePool, collection_id: i64, person_id: i64) {
    sqlx::query("INSERT INTO collection_people (collection_id, person_id) VALUES (?1, ?2)")
        .bind(collection_id)
        .bind(person_id)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Target people
// ---------------------------------------------------------------------------

pub async fn insert_target(
    pool: &SqlitePool,
    action_id: i64,
    version_id: i64,
    person_id: i64,
    state: i32,
) {
    sqlx::query(
        "INSERT INTO action_target_people \
            (action_id, action_version_id, person_id, state, li_account_id) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(action_id)
    .bind(version_id)
    .bind(person_id)
    .bind(state)
    .bind(ACCOUNT_ID)
    .execute(pool)
    .await
    .unwrap();
}

/// `(person_id, state)` for every target row of an action, by person.
pub async fn target_states(pool: &SqlitePool, action_id: i64) -> Vec<(i64, i32)> {
    sqlx::query_as(
        "SELECT person_id, state FROM action_target_people \
         WHERE action_id = ?1 ORDER BY person_id, id",
    )
    .bind(action_id)
    .fetch_all(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Results and history
// ---------------------------------------------------------------------------

pub async fn insert_result(
    pool: &SqlitePool,
    version_id: i64,
    person_id: i64,
    result: i32,
    created_at: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO action_results (action_version_id, person_id, result, platform, created_at) \
         VALUES (?1, ?2, ?3, 'linkedin', ?4) RETURNING id",
    )
    .bind(version_id)
    .bind(person_id)
    .bind(result)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_flag(
    pool: &SqlitePool,
    result_id: i64,
    code: Option<i32>,
    is_exception: bool,
    who_to_blame: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO action_result_flags (action_result_id, code, is_exception, who_to_blame) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(result_id)
    .bind(code)
    .bind(is_exception)
    .bind(who_to_blame)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_message(pool: &SqlitePool, result_id: i64, message_id: i64) {
    sqlx::query(
        "INSERT INTO action_result_messages (action_result_id, type, message_id) \
         VALUES (?1, 'sent', ?2)",
    )
    .bind(result_id)
    .bind(message_id)
    .execute(pool)
    .await
    .unwrap();
}

/// Insert a history row holding a processed result.
pub async fn insert_history(
    pool: &SqlitePool,
    campaign_id: i64,
    person_id: i64,
    result_id: i64,
    version_id: i64,
) {
    sqlx::query(
        "INSERT INTO person_in_campaigns_history \
            (campaign_id, person_id, result_status, result_id, result_action_version_id, \
             result_action_iteration_id, result_data, result_data_message_id, \
             add_to_target_date, add_to_target_or_result_saved_date) \
         VALUES (?1, ?2, 1, ?3, ?4, 9, '{\"ok\":true}', 5, \
                 '2026-01-01 09:00:00', '2026-01-03 17:30:00')",
    )
    .bind(campaign_id)
    .bind(person_id)
    .bind(result_id)
    .bind(version_id)
    .execute(pool)
    .await
    .unwrap();
}

/// Make writes matching `event` and `condition` abort, e.g.
/// `fail_writes(pool, "BEFORE INSERT ON collection_people", "NEW.person_id = 9")`.
pub async fn fail_writes(pool: &SqlitePool, event: &str, condition: &str) {
    let name = format!("fail_{}", count_rows(pool, "sqlite_master").await);
    sqlx::query(&format!(
        "CREATE TRIGGER {name} {event} WHEN {condition} \
         BEGIN SELECT RAISE(ABORT, 'injected failure'); END"
    ))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
