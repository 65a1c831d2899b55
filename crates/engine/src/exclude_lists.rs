//! Exclude-list resolution and membership edits.
//!
//! The reference chain is: campaign or action version -> collection version
//! -> collection -> member people.

use outreach_core::error::CoreError;
use outreach_core::exclude_list::{ExcludeListScope, EXCLUDE_LIST_OPERATION};
use outreach_core::types::DbId;
use outreach_db::models::collection::ExcludeListChain;
use outreach_db::repositories::{ActionRepo, CampaignRepo, CollectionRepo};
use sqlx::SqliteConnection;

use crate::error::EngineResult;
use crate::CampaignEngine;

impl CampaignEngine {
    /// Resolve the collection behind a campaign-scope or action-scope exclude
    /// list.
    ///
    /// Fails with `ExcludeListNotFound` when the latest version row carries no
    /// reference or the referenced collection version is gone.
    pub async fn resolve_exclude_list(
        &self,
        scope: ExcludeListScope,
        id: DbId,
    ) -> EngineResult<DbId> {
        let reference = match scope {
            ExcludeListScope::Campaign => CampaignRepo::latest_exclude_list_id(&self.pool, id).await?,
            ExcludeListScope::Action => ActionRepo::latest_exclude_list_id(&self.pool, id).await?,
        };
        let not_found = || CoreError::ExcludeListNotFound { scope, id };

        let version_id = reference.flatten().ok_or_else(not_found)?;
        let version = CollectionRepo::find_version(&self.pool, version_id)
            .await?
            .ok_or_else(not_found)?;
        Ok(version.collection_id)
    }

    /// Member person IDs of the campaign's (or one action's) exclude list,
    /// ascending.
    pub async fn get_exclude_list(
        &self,
        campaign_id: DbId,
        action_id: Option<DbId>,
    ) -> EngineResult<Vec<DbId>> {
        let collection_id = self.resolve_scoped_exclude_list(campaign_id, action_id).await?;
        let people = CollectionRepo::list_people(&self.pool, collection_id).await?;
        tracing::debug!(
            campaign_id,
            action_id,
            collection_id,
            count = people.len(),
            "Listed exclude list"
        );
        Ok(people)
    }

    /// Add people to an exclude list. Returns how many were not members yet.
    ///
    /// An empty `person_ids` returns 0 without touching the store.
    pub async fn add_to_exclude_list(
        &self,
        campaign_id: DbId,
        person_ids: &[DbId],
        action_id: Option<DbId>,
    ) -> EngineResult<u64> {
        if person_ids.is_empty() {
            return Ok(0);
        }
        let collection_id = self.resolve_scoped_exclude_list(campaign_id, action_id).await?;

        let mut tx = self.pool.begin().await?;
        let mut added = 0u64;
        for &person_id in person_ids {
            if CollectionRepo::add_person(&mut *tx, collection_id, person_id).await? {
                added += 1;
            }
        }
        tx.commit().await?;

        tracing::info!(
            campaign_id,
            action_id,
            collection_id,
            requested = person_ids.len(),
            added,
            "Added people to exclude list"
        );
        Ok(added)
    }

    /// Remove people from an exclude list. Returns how many were members.
    ///
    /// An empty `person_ids` returns 0 without touching the store.
    pub async fn remove_from_exclude_list(
        &self,
        campaign_id: DbId,
        person_ids: &[DbId],
        action_id: Option<DbId>,
    ) -> EngineResult<u64> {
        if person_ids.is_empty() {
            return Ok(0);
        }
        let collection_id = self.resolve_scoped_exclude_list(campaign_id, action_id).await?;

        let mut tx = self.pool.begin().await?;
        let mut removed = 0u64;
        for &person_id in person_ids {
            if CollectionRepo::remove_person(&mut *tx, collection_id, person_id).await? {
                removed += 1;
            }
        }
        tx.commit().await?;

        tracing::info!(
            campaign_id,
            action_id,
            collection_id,
            requested = person_ids.len(),
            removed,
            "Removed people from exclude list"
        );
        Ok(removed)
    }

    /// Give every action of the campaign its own fresh exclude list.
    ///
    /// Each action's latest version is pointed at a new collection version of
    /// a new collection owned by `li_account_id`. No-op for a campaign without
    /// actions.
    pub async fn create_exclude_list_chain(
        &self,
        campaign_id: DbId,
        li_account_id: DbId,
    ) -> EngineResult<Vec<ExcludeListChain>> {
        // Read before BEGIN: the transaction's first statement must be a write.
        let versions = ActionRepo::list_latest_versions(&self.pool, campaign_id).await?;
        if versions.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut chains = Vec::with_capacity(versions.len());
        for version in &versions {
            let chain =
                attach_exclude_list(&mut *tx, version.action_id, version.id, li_account_id).await?;
            chains.push(chain);
        }
        tx.commit().await?;

        tracing::info!(
            campaign_id,
            li_account_id,
            count = chains.len(),
            "Created exclude list chains"
        );
        Ok(chains)
    }

    /// Existence checks, then resolve the campaign or action scope.
    async fn resolve_scoped_exclude_list(
        &self,
        campaign_id: DbId,
        action_id: Option<DbId>,
    ) -> EngineResult<DbId> {
        self.ensure_campaign_exists(campaign_id).await?;
        match action_id {
            Some(action_id) => {
                self.ensure_action_in_campaign(campaign_id, action_id).await?;
                self.resolve_exclude_list(ExcludeListScope::Action, action_id)
                    .await
            }
            None => {
                self.resolve_exclude_list(ExcludeListScope::Campaign, campaign_id)
                    .await
            }
        }
    }
}

/// Create a collection and an `addToTarget` collection version, and point
/// the action version at it. Runs on the caller's transaction.
pub(crate) async fn attach_exclude_list(
    conn: &mut SqliteConnection,
    action_id: DbId,
    action_version_id: DbId,
    li_account_id: DbId,
) -> EngineResult<ExcludeListChain> {
    let collection_id = CollectionRepo::create(conn, li_account_id, None).await?;
    let collection_version_id =
        CollectionRepo::create_version(conn, collection_id, EXCLUDE_LIST_OPERATION).await?;
    ActionRepo::set_exclude_list(conn, action_version_id, collection_version_id).await?;

    Ok(ExcludeListChain {
        action_id,
        collection_id,
        collection_version_id,
    })
}
