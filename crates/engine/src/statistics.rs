//! Per-action and campaign-wide result statistics.

use outreach_core::statistics::{
    rank_top_errors, summarize_campaign, ActionStatistics, CampaignStatistics, ErrorSummary,
    ResultCounts, ResultWindow, DEFAULT_MAX_ERRORS,
};
use outreach_core::types::DbId;
use outreach_db::models::action::CampaignAction;
use outreach_db::repositories::ActionResultRepo;

use crate::error::EngineResult;
use crate::CampaignEngine;

impl CampaignEngine {
    /// Result statistics for a campaign, or for one of its actions.
    ///
    /// Each selected action gets bucket counts, a success rate, its result
    /// time window and up to `max_errors` (default 5) top error groups.
    /// Campaign totals sum the selected actions.
    pub async fn get_statistics(
        &self,
        campaign_id: DbId,
        action_id: Option<DbId>,
        max_errors: Option<usize>,
    ) -> EngineResult<CampaignStatistics> {
        let max_errors = max_errors.unwrap_or(DEFAULT_MAX_ERRORS);

        let actions = match action_id {
            Some(action_id) => vec![self.get_action(campaign_id, action_id).await?],
            None => self.get_actions(campaign_id).await?,
        };

        let mut per_action = Vec::with_capacity(actions.len());
        for action in actions {
            per_action.push(self.action_statistics(action, max_errors).await?);
        }

        let stats = summarize_campaign(campaign_id, per_action);
        tracing::debug!(
            campaign_id,
            action_id,
            actions = stats.actions.len(),
            total = stats.totals.counts.total,
            "Computed campaign statistics"
        );
        Ok(stats)
    }

    async fn action_statistics(
        &self,
        action: CampaignAction,
        max_errors: usize,
    ) -> EngineResult<ActionStatistics> {
        let code_counts = ActionResultRepo::count_by_code(&self.pool, action.id).await?;
        let counts = ResultCounts::from_code_counts(code_counts.iter().map(|c| (c.result, c.count)));

        let window: ResultWindow = ActionResultRepo::result_window(&self.pool, action.id)
            .await?
            .into();

        let groups = ActionResultRepo::error_groups(&self.pool, action.id).await?;
        let top_errors = rank_top_errors(
            groups.into_iter().map(ErrorSummary::from).collect(),
            max_errors,
        );

        Ok(ActionStatistics::new(
            action.id,
            action.name,
            action.config.action_type,
            counts,
            window,
            top_errors,
        ))
    }
}
