//! Action, action version and action config models and DTOs.

use outreach_core::action_settings;
use outreach_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An action joined to its latest version and that version's config.
///
/// Column names of `action_configs` are camelCase in the store and are
/// aliased to snake_case in the query.
#[derive(Debug, Clone, FromRow)]
pub struct ActionRow {
    pub id: DbId,
    pub campaign_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub version_id: DbId,
    pub exclude_list_id: Option<DbId>,
    pub config_id: DbId,
    pub action_type: String,
    pub action_settings: Option<String>,
    pub cool_down: i64,
    pub max_action_results_per_iteration: i64,
    pub is_draft: bool,
}

/// Resolved action configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ActionConfig {
    pub id: DbId,
    pub action_type: String,
    pub action_settings: serde_json::Value,
    pub cool_down: i64,
    pub max_action_results_per_iteration: i64,
    pub is_draft: bool,
}

/// One step of a campaign's action chain.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignAction {
    pub id: DbId,
    pub campaign_id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// The authoritative (latest) version of this action.
    pub version_id: DbId,
    /// Collection version backing this action's exclude list, if any.
    pub exclude_list_id: Option<DbId>,
    pub config: ActionConfig,
}

impl From<ActionRow> for CampaignAction {
    fn from(row: ActionRow) -> Self {
        let action_settings =
            match action_settings::parse_action_settings(row.action_settings.as_deref()) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(
                        action_id = row.id,
                        config_id = row.config_id,
                        error = %e,
                        "Malformed action settings, using empty object"
                    );
                    action_settings::empty_settings()
                }
            };

        Self {
            id: row.id,
            campaign_id: row.campaign_id,
            name: row.name,
            description: row.description,
            version_id: row.version_id,
            exclude_list_id: row.exclude_list_id,
            config: ActionConfig {
                id: row.config_id,
                action_type: row.action_type,
                action_settings,
                cool_down: row.cool_down,
                max_action_results_per_iteration: row.max_action_results_per_iteration,
                is_draft: row.is_draft,
            },
        }
    }
}

/// A row from the `action_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionVersion {
    pub id: DbId,
    pub action_id: DbId,
    pub config_id: DbId,
    pub exclude_list_id: Option<DbId>,
}

/// DTO for appending an action to a campaign's chain.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAction {
    pub name: String,
    pub description: Option<String>,
    pub action_type: String,
    pub action_settings: Option<serde_json::Value>,
    pub cool_down: Option<i64>,
    pub max_action_results_per_iteration: Option<i64>,
    pub is_draft: Option<bool>,
}

/// Fully defaulted config values ready to insert.
#[derive(Debug, Clone)]
pub struct NewActionConfig {
    pub action_type: String,
    pub action_settings: serde_json::Value,
    pub cool_down: i64,
    pub max_action_results_per_iteration: i64,
    pub is_draft: bool,
}

impl From<&CreateAction> for NewActionConfig {
    fn from(input: &CreateAction) -> Self {
        Self {
            action_type: input.action_type.clone(),
            action_settings: input
                .action_settings
                .clone()
                .unwrap_or_else(action_settings::empty_settings),
            cool_down: input
                .cool_down
                .unwrap_or(action_settings::DEFAULT_COOL_DOWN_MS),
            max_action_results_per_iteration: input
                .max_action_results_per_iteration
                .unwrap_or(action_settings::DEFAULT_MAX_RESULTS_PER_ITERATION),
            is_draft: input.is_draft.unwrap_or(false),
        }
    }
}
