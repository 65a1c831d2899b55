//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async associated
//! functions. Reads take `&SqlitePool`; writes that belong to a larger atomic
//! operation take `&mut SqliteConnection` so the caller can pass its open
//! transaction.

pub mod action_repo;
pub mod action_result_repo;
pub mod action_target_repo;
pub mod campaign_history_repo;
pub mod campaign_repo;
pub mod collection_repo;

pub use action_repo::ActionRepo;
pub use action_result_repo::ActionResultRepo;
pub use action_target_repo::ActionTargetRepo;
pub use campaign_history_repo::CampaignHistoryRepo;
pub use campaign_repo::CampaignRepo;
pub use collection_repo::CollectionRepo;
