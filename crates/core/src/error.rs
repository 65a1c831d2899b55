use crate::exclude_list::ExcludeListScope;
use crate::types::DbId;

/// Domain errors raised by existence checks and chain navigation.
///
/// All variants are recoverable for the caller. They are raised before any
/// mutation starts, so none of them ever leaves partial state behind.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Action {action_id} not found in campaign {campaign_id}")]
    ActionNotFound { action_id: DbId, campaign_id: DbId },

    #[error("Exclude list not found for {scope} {id}")]
    ExcludeListNotFound { scope: ExcludeListScope, id: DbId },

    #[error("Action {action_id} is the last action of campaign {campaign_id}")]
    NoNextAction { action_id: DbId, campaign_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the campaign flavour of [`CoreError::NotFound`].
    pub fn campaign_not_found(id: DbId) -> Self {
        Self::NotFound {
            entity: "Campaign",
            id,
        }
    }

    /// True for every "does not exist" variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::ActionNotFound { .. } | Self::ExcludeListNotFound { .. }
        )
    }
}
