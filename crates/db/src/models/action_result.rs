//! Action result models.

use outreach_core::statistics::{ErrorSummary, ResultWindow};
use outreach_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `action_results`, tagged with the owning action.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionResult {
    pub id: DbId,
    pub action_version_id: DbId,
    pub action_id: DbId,
    pub person_id: DbId,
    pub result: i32,
    pub platform: Option<String>,
    pub created_at: Timestamp,
}

/// Number of results sharing one result code.
#[derive(Debug, Clone, FromRow)]
pub struct ResultCodeCount {
    pub result: i32,
    pub count: i64,
}

/// First and last result timestamps of an action.
#[derive(Debug, Clone, FromRow)]
pub struct ResultWindowRow {
    pub first_result_at: Option<Timestamp>,
    pub last_result_at: Option<Timestamp>,
}

impl From<ResultWindowRow> for ResultWindow {
    fn from(row: ResultWindowRow) -> Self {
        ResultWindow {
            first_result_at: row.first_result_at,
            last_result_at: row.last_result_at,
        }
    }
}

/// Flagged results grouped by code, exception flag and blame.
#[derive(Debug, Clone, FromRow)]
pub struct ErrorGroupRow {
    pub code: i32,
    pub is_exception: bool,
    pub who_to_blame: Option<String>,
    pub count: i64,
}

impl From<ErrorGroupRow> for ErrorSummary {
    fn from(row: ErrorGroupRow) -> Self {
        ErrorSummary {
            code: row.code,
            is_exception: row.is_exception,
            who_to_blame: row.who_to_blame,
            count: row.count,
        }
    }
}
