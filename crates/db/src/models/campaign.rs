//! Campaign entity model and DTOs.

use outreach_core::campaign_state::{derive_campaign_state, CampaignState};
use outreach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `campaigns` table.
///
/// Campaign rows are created by the automation application. The visibility
/// state is derived from the three flags, see [`Campaign::state`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_paused: Option<bool>,
    pub is_archived: Option<bool>,
    pub is_valid: Option<bool>,
    pub li_account_id: DbId,
    pub created_at: Timestamp,
}

impl Campaign {
    pub fn state(&self) -> CampaignState {
        derive_campaign_state(self.is_paused, self.is_archived, self.is_valid)
    }
}

/// A campaign list entry with its action count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_paused: Option<bool>,
    pub is_archived: Option<bool>,
    pub is_valid: Option<bool>,
    pub li_account_id: DbId,
    pub created_at: Timestamp,
    pub action_count: i64,
}

impl CampaignSummary {
    pub fn state(&self) -> CampaignState {
        derive_campaign_state(self.is_paused, self.is_archived, self.is_valid)
    }
}

/// DTO for partially updating a campaign.
///
/// `description` uses `Option<Option<String>>`: an omitted field (outer
/// `None`) leaves the column alone, an explicit `null` (`Some(None)`) clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
}

/// Wrap any present value, `null` included, so it is told apart from a
/// missing field (which falls back to `default`).
fn deserialize_present<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}
