//! Well-known values of `action_results.result`.
//!
//! These are written by the external engine. Any other value is legal in the
//! store and only contributes to totals.

/// The action completed for the person.
pub const RESULT_SUCCESSFUL: i32 = 1;

/// The person replied (counts as a success for the success rate).
pub const RESULT_REPLIED: i32 = 2;

/// The action failed for the person.
pub const RESULT_FAILED: i32 = -1;

/// The person was skipped.
pub const RESULT_SKIPPED: i32 = -2;
