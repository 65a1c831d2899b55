//! Campaign visibility state.
//!
//! The state is never stored. It is derived from three independent nullable
//! flags on the `campaigns` row with a fixed precedence.

use serde::{Deserialize, Serialize};

pub const STATE_ACTIVE: &str = "active";
pub const STATE_PAUSED: &str = "paused";
pub const STATE_ARCHIVED: &str = "archived";
pub const STATE_INVALID: &str = "invalid";

/// All valid campaign state strings.
pub const VALID_CAMPAIGN_STATES: &[&str] =
    &[STATE_ACTIVE, STATE_PAUSED, STATE_ARCHIVED, STATE_INVALID];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignState {
    Active,
    Paused,
    Archived,
    Invalid,
}

impl CampaignState {
    /// Convert from the string form used by adapters.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATE_ACTIVE => Ok(Self::Active),
            STATE_PAUSED => Ok(Self::Paused),
            STATE_ARCHIVED => Ok(Self::Archived),
            STATE_INVALID => Ok(Self::Invalid),
            _ => Err(format!(
                "Invalid campaign state '{s}'. Must be one of: {}",
                VALID_CAMPAIGN_STATES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => STATE_ACTIVE,
            Self::Paused => STATE_PAUSED,
            Self::Archived => STATE_ARCHIVED,
            Self::Invalid => STATE_INVALID,
        }
    }
}

impl std::fmt::Display for CampaignState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the campaign state from its stored flags.
///
/// First match wins: archived, then invalid, then paused, else active.
/// An unknown validity (`None`) counts as valid.
pub fn derive_campaign_state(
    is_paused: Option<bool>,
    is_archived: Option<bool>,
    is_valid: Option<bool>,
) -> CampaignState {
    if is_archived == Some(true) {
        CampaignState::Archived
    } else if is_valid == Some(false) {
        CampaignState::Invalid
    } else if is_paused == Some(true) {
        CampaignState::Paused
    } else {
        CampaignState::Active
    }
}
