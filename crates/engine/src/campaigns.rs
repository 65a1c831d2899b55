//! Campaign query surface and single-row campaign updates.

use outreach_core::campaign_state::CampaignState;
use outreach_core::error::CoreError;
use outreach_core::types::DbId;
use outreach_db::models::action::CampaignAction;
use outreach_db::models::action_result::ActionResult;
use outreach_db::models::action_target::ActionPeopleCounts;
use outreach_db::models::campaign::{Campaign, CampaignSummary, UpdateCampaign};
use outreach_db::repositories::{ActionRepo, ActionResultRepo, ActionTargetRepo, CampaignRepo};

use crate::error::EngineResult;
use crate::{CampaignEngine, DEFAULT_RESULTS_LIMIT};

impl CampaignEngine {
    // ---------------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------------

    /// List campaigns newest first. Archived campaigns are skipped unless
    /// `include_archived` is set.
    pub async fn list_campaigns(
        &self,
        include_archived: bool,
    ) -> EngineResult<Vec<CampaignSummary>> {
        let campaigns = CampaignRepo::list(&self.pool, include_archived).await?;
        tracing::debug!(count = campaigns.len(), include_archived, "Listed campaigns");
        Ok(campaigns)
    }

    /// Get a single campaign.
    pub async fn get_campaign(&self, campaign_id: DbId) -> EngineResult<Campaign> {
        self.ensure_campaign(campaign_id).await
    }

    /// Derived visibility state of a campaign.
    pub async fn get_campaign_state(&self, campaign_id: DbId) -> EngineResult<CampaignState> {
        Ok(self.get_campaign(campaign_id).await?.state())
    }

    /// The campaign's action chain in ascending `id` order.
    pub async fn get_actions(&self, campaign_id: DbId) -> EngineResult<Vec<CampaignAction>> {
        self.ensure_campaign_exists(campaign_id).await?;
        let actions = ActionRepo::list_by_campaign(&self.pool, campaign_id).await?;
        tracing::debug!(count = actions.len(), campaign_id, "Listed campaign actions");
        Ok(actions)
    }

    /// One action of the campaign.
    pub async fn get_action(
        &self,
        campaign_id: DbId,
        action_id: DbId,
    ) -> EngineResult<CampaignAction> {
        self.ensure_campaign_exists(campaign_id).await?;
        ActionRepo::find_in_campaign(&self.pool, campaign_id, action_id)
            .await?
            .ok_or_else(|| {
                CoreError::ActionNotFound {
                    action_id,
                    campaign_id,
                }
                .into()
            })
    }

    /// Most recent results of the campaign, newest first.
    ///
    /// `limit` defaults to [`DEFAULT_RESULTS_LIMIT`].
    pub async fn get_results(
        &self,
        campaign_id: DbId,
        limit: Option<i64>,
    ) -> EngineResult<Vec<ActionResult>> {
        self.ensure_campaign_exists(campaign_id).await?;
        let limit = limit.unwrap_or(DEFAULT_RESULTS_LIMIT).max(0);
        let results = ActionResultRepo::list_by_campaign(&self.pool, campaign_id, limit).await?;
        tracing::debug!(count = results.len(), campaign_id, limit, "Listed campaign results");
        Ok(results)
    }

    /// Stored target-row counts per processing state for every action.
    pub async fn get_action_people_counts(
        &self,
        campaign_id: DbId,
    ) -> EngineResult<Vec<ActionPeopleCounts>> {
        self.ensure_campaign_exists(campaign_id).await?;
        Ok(ActionTargetRepo::count_by_state(&self.pool, campaign_id).await?)
    }

    // ---------------------------------------------------------------------------
    // Single-row updates
    // ---------------------------------------------------------------------------

    /// Mark a campaign valid. Unconditional and idempotent.
    pub async fn fix_validity(&self, campaign_id: DbId) -> EngineResult<()> {
        let updated = CampaignRepo::mark_valid(&self.pool, campaign_id).await?;
        tracing::info!(campaign_id, updated, "Campaign marked valid");
        Ok(())
    }

    /// Rename a campaign and/or change its description.
    ///
    /// Only supplied fields are touched. Returns the re-read row.
    pub async fn update_campaign(
        &self,
        campaign_id: DbId,
        input: &UpdateCampaign,
    ) -> EngineResult<Campaign> {
        self.ensure_campaign_exists(campaign_id).await?;
        let campaign = CampaignRepo::update(&self.pool, campaign_id, input)
            .await?
            .ok_or_else(|| CoreError::campaign_not_found(campaign_id))?;

        tracing::info!(
            campaign_id,
            name_changed = input.name.is_some(),
            description_changed = input.description.is_some(),
            "Campaign updated"
        );
        Ok(campaign)
    }

    /// Archive a campaign. Campaigns are never hard-deleted.
    pub async fn archive_campaign(&self, campaign_id: DbId) -> EngineResult<Campaign> {
        self.set_archived(campaign_id, true).await
    }

    /// Bring an archived campaign back.
    pub async fn unarchive_campaign(&self, campaign_id: DbId) -> EngineResult<Campaign> {
        self.set_archived(campaign_id, false).await
    }

    async fn set_archived(&self, campaign_id: DbId, archived: bool) -> EngineResult<Campaign> {
        self.ensure_campaign_exists(campaign_id).await?;
        let campaign = CampaignRepo::set_archived(&self.pool, campaign_id, archived)
            .await?
            .ok_or_else(|| CoreError::campaign_not_found(campaign_id))?;
        tracing::info!(campaign_id, archived, "Campaign archive flag set");
        Ok(campaign)
    }
}
