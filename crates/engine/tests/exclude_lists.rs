//! Integration tests for exclude-list resolution and membership:
//! - resolution at campaign and action scope, including broken chains
//! - idempotent add/remove with counts of rows actually changed
//! - ascending member order
//! - `create_exclude_list_chain` creating one independent chain per action
//! - a failed write rolls back every row of the call
//! - chain creation waiting out a concurrent writer

mod common;

use assert_matches::assert_matches;
use outreach_core::error::CoreError;
use outreach_core::exclude_list::EXCLUDE_LIST_OPERATION;
use outreach_db::repositories::CollectionRepo;
use outreach_engine::{EngineError, ExcludeListScope};
use sqlx::SqlitePool;

use common::*;

/// Campaign with a campaign-scope exclude list. Returns `(campaign_id, collection_id)`.
async fn campaign_with_exclude_list(pool: &SqlitePool) -> (i64, i64) {
    let campaign = insert_campaign(pool, "Excludes").await;
    let (collection, version) = insert_exclude_list(pool).await;
    attach_campaign_exclude_list(pool, campaign, Some(version)).await;
    (campaign, collection)
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_resolve_uses_latest_campaign_version(pool: SqlitePool) {
    let campaign = insert_campaign(&pool, "Versions").await;
    let (_, stale) = insert_exclude_list(&pool).await;
    let (current_collection, current) = insert_exclude_list(&pool).await;
    attach_campaign_exclude_list(&pool, campaign, Some(stale)).await;
    attach_campaign_exclude_list(&pool, campaign, Some(current)).await;

    let resolved = engine(&pool)
        .resolve_exclude_list(ExcludeListScope::Campaign, campaign)
        .await
        .unwrap();
    assert_eq!(resolved, current_collection);
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_resolve_missing_reference(pool: SqlitePool) {
    let campaign = insert_campaign(&pool, "No list").await;
    let engine = engine(&pool);

    // No campaign version row at all.
    let result = engine
        .resolve_exclude_list(ExcludeListScope::Campaign, campaign)
        .await;
    assert_matches!(
        result,
        Err(EngineError::Core(CoreError::ExcludeListNotFound {
            scope: ExcludeListScope::Campaign,
            ..
        }))
    );

    // A version row with a NULL reference.
    attach_campaign_exclude_list(&pool, campaign, None).await;
    let result = engine
        .resolve_exclude_list(ExcludeListScope::Campaign, campaign)
        .await;
    assert_matches!(result, Err(e) if e.is_not_found());
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_resolve_dangling_reference(pool: SqlitePool) {
    let campaign = insert_campaign(&pool, "Dangling").await;
    let (action, version) = insert_action(&pool, campaign, "Visit").await;

    // Reference a collection version that does not exist.
    attach_action_exclude_list(&pool, version, 9999).await;

    let result = engine(&pool)
        .resolve_exclude_list(ExcludeListScope::Action, action)
        .await;
    assert_matches!(
        result,
        Err(EngineError::Core(CoreError::ExcludeListNotFound {
            scope: ExcludeListScope::Action,
            id
        })) if id == action
    );
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_add_is_idempotent(pool: SqlitePool) {
    let (campaign, _) = campaign_with_exclude_list(&pool).await;
    let engine = engine(&pool);

    assert_eq!(engine.add_to_exclude_list(campaign, &[5], None).await.unwrap(), 1);
    assert_eq!(engine.add_to_exclude_list(campaign, &[5], None).await.unwrap(), 0);
    assert_eq!(engine.get_exclude_list(campaign, None).await.unwrap(), vec![5]);
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_add_counts_only_new_members(pool: SqlitePool) {
    let (campaign, collection) = campaign_with_exclude_list(&pool).await;
    add_member(&pool, collection, 2).await;

    let added = engine(&pool)
        .add_to_exclude_list(campaign, &[2, 3], None)
        .await
        .unwrap();

    assert_eq!(added, 1);
    assert_eq!(
        engine(&pool).get_exclude_list(campaign, None).await.unwrap(),
        vec![2, 3]
    );
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_remove_absent_person(pool: SqlitePool) {
    let (campaign, collection) = campaign_with_exclude_list(&pool).await;
    add_member(&pool, collection, 8).await;
    let engine = engine(&pool);

    assert_eq!(
        engine.remove_from_exclude_list(campaign, &[1], None).await.unwrap(),
        0
    );
    assert_eq!(
        engine.remove_from_exclude_list(campaign, &[8, 1], None).await.unwrap(),
        1
    );
    assert!(engine.get_exclude_list(campaign, None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_members_listed_ascending(pool: SqlitePool) {
    let (campaign, _) = campaign_with_exclude_list(&pool).await;
    let engine = engine(&pool);

    engine
        .add_to_exclude_list(campaign, &[40, 7, 19, 3], None)
        .await
        .unwrap();

    assert_eq!(
        engine.get_exclude_list(campaign, None).await.unwrap(),
        vec![3, 7, 19, 40]
    );
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_empty_batch_skips_checks(pool: SqlitePool) {
    // The campaign does not exist, yet an empty batch is a plain zero.
    let engine = engine(&pool);
    assert_eq!(engine.add_to_exclude_list(404, &[], None).await.unwrap(), 0);
    assert_eq!(engine.remove_from_exclude_list(404, &[], Some(1)).await.unwrap(), 0);
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_unknown_campaign_rejected(pool: SqlitePool) {
    let result = engine(&pool).add_to_exclude_list(404, &[1], None).await;
    assert_matches!(
        result,
        Err(EngineError::Core(CoreError::NotFound {
            entity: "Campaign",
            ..
        }))
    );
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_action_scope_is_separate_from_campaign_scope(pool: SqlitePool) {
    let (campaign, _) = campaign_with_exclude_list(&pool).await;
    let (action, version) = insert_action(&pool, campaign, "Visit").await;
    let (_, action_list) = insert_exclude_list(&pool).await;
    attach_action_exclude_list(&pool, version, action_list).await;
    let engine = engine(&pool);

    engine
        .add_to_exclude_list(campaign, &[11, 12], Some(action))
        .await
        .unwrap();

    assert_eq!(
        engine.get_exclude_list(campaign, Some(action)).await.unwrap(),
        vec![11, 12]
    );
    assert!(engine.get_exclude_list(campaign, None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_action_scope_requires_action_in_campaign(pool: SqlitePool) {
    let (campaign, _) = campaign_with_exclude_list(&pool).await;
    let other = insert_campaign(&pool, "Other").await;
    let (foreign, _) = insert_action(&pool, other, "Visit").await;

    let result = engine(&pool).get_exclude_list(campaign, Some(foreign)).await;
    assert_matches!(
        result,
        Err(EngineError::Core(CoreError::ActionNotFound { .. }))
    );
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_add_failure_rolls_back_batch(pool: SqlitePool) {
    let (campaign, collection) = campaign_with_exclude_list(&pool).await;
    add_member(&pool, collection, 1).await;
    fail_writes(&pool, "BEFORE INSERT ON collection_people", "NEW.person_id = 9").await;

    let result = engine(&pool).add_to_exclude_list(campaign, &[3, 9], None).await;

    assert_matches!(result, Err(EngineError::Database(_)));
    assert_eq!(engine(&pool).get_exclude_list(campaign, None).await.unwrap(), vec![1]);
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_remove_failure_rolls_back_batch(pool: SqlitePool) {
    let (campaign, collection) = campaign_with_exclude_list(&pool).await;
    add_member(&pool, collection, 4).await;
    add_member(&pool, collection, 8).await;
    fail_writes(&pool, "BEFORE DELETE ON collection_people", "OLD.person_id = 8").await;

    let result = engine(&pool)
        .remove_from_exclude_list(campaign, &[4, 8], None)
        .await;

    assert_matches!(result, Err(EngineError::Database(_)));
    assert_eq!(
        engine(&pool).get_exclude_list(campaign, None).await.unwrap(),
        vec![4, 8]
    );
}

// ---------------------------------------------------------------------------
// create_exclude_list_chain
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_chain_per_action(pool: SqlitePool) {
    let campaign = insert_campaign(&pool, "Two actions").await;
    let (first, _) = insert_action(&pool, campaign, "Visit").await;
    let (second, _) = insert_action(&pool, campaign, "Message").await;
    let engine = engine(&pool);

    let chains = engine
        .create_exclude_list_chain(campaign, ACCOUNT_ID)
        .await
        .unwrap();

    assert_eq!(chains.len(), 2);
    assert_ne!(chains[0].collection_version_id, chains[1].collection_version_id);
    assert_ne!(chains[0].collection_id, chains[1].collection_id);

    let first_collection = engine
        .resolve_exclude_list(ExcludeListScope::Action, first)
        .await
        .unwrap();
    let second_collection = engine
        .resolve_exclude_list(ExcludeListScope::Action, second)
        .await
        .unwrap();
    assert_ne!(first_collection, second_collection);
    assert_eq!(first_collection, chains[0].collection_id);
    assert_eq!(second_collection, chains[1].collection_id);

    for chain in &chains {
        let version = CollectionRepo::find_version(&pool, chain.collection_version_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(version.version_operation_status, EXCLUDE_LIST_OPERATION);
        assert_eq!(version.version_operation_status, "addToTarget");

        let collection = CollectionRepo::find_by_id(&pool, chain.collection_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(collection.li_account_id, ACCOUNT_ID);
    }
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_chain_on_campaign_without_actions(pool: SqlitePool) {
    let campaign = insert_campaign(&pool, "Empty").await;

    let chains = engine(&pool)
        .create_exclude_list_chain(campaign, ACCOUNT_ID)
        .await
        .unwrap();

    assert!(chains.is_empty());
    assert_eq!(count_rows(&pool, "collections").await, 0);
    assert_eq!(count_rows(&pool, "collection_people_versions").await, 0);
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_chain_failure_rolls_back_every_action(pool: SqlitePool) {
    let campaign = insert_campaign(&pool, "Rollback").await;
    let (first, _) = insert_action(&pool, campaign, "Visit").await;
    insert_action(&pool, campaign, "Message").await;
    // The first action's chain is written before the second one fails.
    fail_writes(
        &pool,
        "BEFORE INSERT ON collection_people_versions",
        "(SELECT COUNT(*) FROM collection_people_versions) >= 1",
    )
    .await;
    let engine = engine(&pool);

    let result = engine.create_exclude_list_chain(campaign, ACCOUNT_ID).await;

    assert_matches!(result, Err(EngineError::Database(_)));
    assert_eq!(count_rows(&pool, "collections").await, 0);
    assert_eq!(count_rows(&pool, "collection_people_versions").await, 0);
    assert_matches!(
        engine.resolve_exclude_list(ExcludeListScope::Action, first).await,
        Err(EngineError::Core(CoreError::ExcludeListNotFound { .. }))
    );
}

#[sqlx::test(migrations = "tests/fixtures")]
async fn test_chain_waits_for_concurrent_writer(pool: SqlitePool) {
    let campaign = insert_campaign(&pool, "Busy").await;
    insert_action(&pool, campaign, "Visit").await;
    insert_action(&pool, campaign, "Message").await;

    // Another writer holds the store's write lock while the chain starts.
    let mut writer = pool.begin().await.unwrap();
    sqlx::query("INSERT INTO collections (li_account_id) VALUES (?1)")
        .bind(ACCOUNT_ID)
        .execute(&mut *writer)
        .await
        .unwrap();

    let engine = engine(&pool);
    let chain = tokio::spawn(async move {
        engine.create_exclude_list_chain(campaign, ACCOUNT_ID).await
    });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    writer.commit().await.unwrap();

    let chains = chain.await.unwrap().unwrap();
    assert_eq!(chains.len(), 2);
    assert_eq!(count_rows(&pool, "collections").await, 3);
}
