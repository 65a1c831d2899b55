//! Resetting people so a campaign processes them again from scratch.

use outreach_core::types::DbId;
use outreach_db::repositories::{
    ActionRepo, ActionResultRepo, ActionTargetRepo, CampaignHistoryRepo,
};

use crate::error::EngineResult;
use crate::CampaignEngine;

impl CampaignEngine {
    /// Reset people for a rerun of the whole campaign.
    ///
    /// For every person, in a single transaction covering the whole batch:
    /// every target row in the campaign goes back to queued, the history row
    /// loses its result, and results with their flags and messages are
    /// deleted for every action version. Any failure rolls back all people.
    /// No-op for a campaign without actions, including one that does not
    /// exist.
    pub async fn reset_for_rerun(&self, campaign_id: DbId, person_ids: &[DbId]) -> EngineResult<()> {
        let actions = ActionRepo::list_by_campaign(&self.pool, campaign_id).await?;
        if actions.is_empty() {
            tracing::debug!(campaign_id, "Rerun reset skipped, campaign has no actions");
            return Ok(());
        }
        let versions = ActionRepo::list_versions_by_campaign(&self.pool, campaign_id).await?;

        let mut tx = self.pool.begin().await?;
        let mut requeued = 0u64;
        let mut results_deleted = 0u64;
        for &person_id in person_ids {
            requeued += ActionTargetRepo::requeue_in_campaign(&mut *tx, campaign_id, person_id).await?;
            CampaignHistoryRepo::reset(&mut *tx, campaign_id, person_id).await?;
            for version in &versions {
                results_deleted +=
                    ActionResultRepo::delete_for_person(&mut *tx, version.id, person_id).await?;
            }
        }
        tx.commit().await?;

        tracing::info!(
            campaign_id,
            people = person_ids.len(),
            requeued,
            results_deleted,
            "People reset for rerun"
        );
        Ok(())
    }
}
