//! Row models and DTOs.
//!
//! Each model mirrors one table (or one fixed join) of the automation
//! application's schema.

pub mod action;
pub mod action_result;
pub mod action_target;
pub mod campaign;
pub mod campaign_history;
pub mod collection;
