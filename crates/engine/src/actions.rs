//! Appending actions to a chain and advancing people along it.

use outreach_core::error::CoreError;
use outreach_core::processing_state::ProcessingState;
use outreach_core::types::DbId;
use outreach_db::models::action::{ActionConfig, CampaignAction, CreateAction, NewActionConfig};
use outreach_db::models::action_target::NewActionTarget;
use outreach_db::repositories::{ActionRepo, ActionTargetRepo};

use crate::error::EngineResult;
use crate::exclude_lists::attach_exclude_list;
use crate::CampaignEngine;

impl CampaignEngine {
    /// Append an action to the end of a campaign's chain.
    ///
    /// Writes the config, the action, two version rows and a fresh exclude
    /// list in one transaction. The automation application expects two
    /// version rows per action; the later one is authoritative and carries
    /// the exclude list. The returned projection is built from the inserted
    /// values rather than re-read.
    pub async fn add_action(
        &self,
        campaign_id: DbId,
        input: &CreateAction,
        li_account_id: DbId,
    ) -> EngineResult<CampaignAction> {
        self.ensure_campaign_exists(campaign_id).await?;
        let config = NewActionConfig::from(input);

        let mut tx = self.pool.begin().await?;
        let config_id = ActionRepo::create_config(&mut *tx, &config).await?;
        let action_id =
            ActionRepo::create(&mut *tx, campaign_id, &input.name, input.description.as_deref())
                .await?;
        ActionRepo::create_version(&mut *tx, action_id, config_id).await?;
        let version = ActionRepo::create_version(&mut *tx, action_id, config_id).await?;
        let chain = attach_exclude_list(&mut *tx, action_id, version.id, li_account_id).await?;
        tx.commit().await?;

        tracing::info!(
            campaign_id,
            action_id,
            version_id = version.id,
            exclude_list_id = chain.collection_version_id,
            action_type = %config.action_type,
            "Action added"
        );

        Ok(CampaignAction {
            id: action_id,
            campaign_id,
            name: input.name.clone(),
            description: input.description.clone(),
            version_id: version.id,
            exclude_list_id: Some(chain.collection_version_id),
            config: ActionConfig {
                id: config_id,
                action_type: config.action_type,
                action_settings: config.action_settings,
                cool_down: config.cool_down,
                max_action_results_per_iteration: config.max_action_results_per_iteration,
                is_draft: config.is_draft,
            },
        })
    }

    /// Move people from `current_action_id` to the next action of the chain.
    ///
    /// Each person is marked successful on the current action and queued on
    /// the next one: an existing target row is re-queued whatever its state,
    /// otherwise a new row is inserted. Returns the next action's ID.
    ///
    /// An empty `person_ids` returns the sentinel 0 without reading or
    /// writing anything; 0 is never a real action ID.
    pub async fn move_to_next_action(
        &self,
        campaign_id: DbId,
        current_action_id: DbId,
        person_ids: &[DbId],
    ) -> EngineResult<DbId> {
        if person_ids.is_empty() {
            return Ok(0);
        }

        let campaign = self.ensure_campaign(campaign_id).await?;
        let actions = ActionRepo::list_by_campaign(&self.pool, campaign_id).await?;

        let position = actions
            .iter()
            .position(|a| a.id == current_action_id)
            .ok_or(CoreError::ActionNotFound {
                action_id: current_action_id,
                campaign_id,
            })?;
        let next = actions.get(position + 1).ok_or(CoreError::NoNextAction {
            action_id: current_action_id,
            campaign_id,
        })?;

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0usize;
        for &person_id in person_ids {
            ActionTargetRepo::set_state(
                &mut *tx,
                current_action_id,
                person_id,
                ProcessingState::Successful,
            )
            .await?;

            if ActionTargetRepo::exists(&mut *tx, next.id, person_id).await? {
                ActionTargetRepo::set_state(&mut *tx, next.id, person_id, ProcessingState::Queued)
                    .await?;
            } else {
                let target = NewActionTarget {
                    action_id: next.id,
                    action_version_id: next.version_id,
                    person_id,
                    li_account_id: campaign.li_account_id,
                };
                ActionTargetRepo::insert_queued(&mut *tx, &target).await?;
                inserted += 1;
            }
        }
        tx.commit().await?;

        tracing::info!(
            campaign_id,
            from_action_id = current_action_id,
            to_action_id = next.id,
            people = person_ids.len(),
            inserted,
            "Moved people to next action"
        );
        Ok(next.id)
    }
}
