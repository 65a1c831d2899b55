//! Constants for the `person_in_campaigns_history` table.

/// Status written to `result_status` when a person is reset for a rerun.
///
/// The external engine treats this value as "never processed".
pub const HISTORY_RESET_STATUS: i32 = -999;
