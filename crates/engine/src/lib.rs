//! Campaign domain engine.
//!
//! Reads, derives and mutates campaign rows in the automation application's
//! store. The store is shared with the application's own engine, which moves
//! target rows forward on its own schedule; every multi-row write here runs
//! in a single transaction so that engine never sees half of a batch.

pub mod error;

mod actions;
mod campaigns;
mod exclude_lists;
mod rerun;
mod statistics;

pub use error::{EngineError, EngineResult};
pub use outreach_core::exclude_list::ExcludeListScope;

use outreach_core::error::CoreError;
use outreach_core::types::DbId;
use outreach_db::models::campaign::Campaign;
use outreach_db::repositories::{ActionRepo, CampaignRepo};
use outreach_db::DbPool;

/// Number of results returned by `get_results` when no limit is given.
pub const DEFAULT_RESULTS_LIMIT: i64 = 100;

/// Entry point for every campaign operation.
#[derive(Debug, Clone)]
pub struct CampaignEngine {
    pool: DbPool,
}

impl CampaignEngine {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // ---------------------------------------------------------------------------
    // Existence checks
    // ---------------------------------------------------------------------------

    /// Load a campaign or fail with `NotFound`.
    async fn ensure_campaign(&self, campaign_id: DbId) -> EngineResult<Campaign> {
        CampaignRepo::find_by_id(&self.pool, campaign_id)
            .await?
            .ok_or_else(|| CoreError::campaign_not_found(campaign_id).into())
    }

    /// Fail with `NotFound` unless the campaign exists.
    async fn ensure_campaign_exists(&self, campaign_id: DbId) -> EngineResult<()> {
        if CampaignRepo::exists(&self.pool, campaign_id).await? {
            Ok(())
        } else {
            Err(CoreError::campaign_not_found(campaign_id).into())
        }
    }

    /// Fail with `ActionNotFound` unless the action belongs to the campaign.
    async fn ensure_action_in_campaign(
        &self,
        campaign_id: DbId,
        action_id: DbId,
    ) -> EngineResult<()> {
        if ActionRepo::belongs_to_campaign(&self.pool, campaign_id, action_id).await? {
            Ok(())
        } else {
            Err(CoreError::ActionNotFound {
                action_id,
                campaign_id,
            }
            .into())
        }
    }
}
