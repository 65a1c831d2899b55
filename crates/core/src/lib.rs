//! Pure campaign domain logic.
//!
//! Nothing in this crate touches the store. Repositories in `outreach-db`
//! load rows, and the functions here turn them into derived state,
//! rollups and typed errors.

pub mod action_settings;
pub mod campaign_history;
pub mod campaign_state;
pub mod error;
pub mod exclude_list;
pub mod processing_state;
pub mod result_codes;
pub mod statistics;
pub mod types;
