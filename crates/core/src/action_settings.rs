//! Action configuration settings and defaults.
//!
//! `action_configs.actionSettings` is a JSON blob owned by the automation
//! application. Readers must never fail on it: a malformed blob is read as
//! an empty object.

use serde_json::{Map, Value};

/// Default `coolDown` (milliseconds) for configs created without one.
pub const DEFAULT_COOL_DOWN_MS: i64 = 60_000;

/// Default `maxActionResultsPerIteration` for configs created without one.
pub const DEFAULT_MAX_RESULTS_PER_ITERATION: i64 = 10;

/// An empty settings object.
pub fn empty_settings() -> Value {
    Value::Object(Map::new())
}

/// Strict parse of a stored settings blob.
///
/// A missing or blank blob is an empty object. Readers that must not fail
/// fall back to [`empty_settings`] on error and log the failure.
pub fn parse_action_settings(raw: Option<&str>) -> Result<Value, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(empty_settings()),
        Some(text) => serde_json::from_str(text),
    }
}

/// Serialize settings for storage. `None` stores an empty object.
pub fn serialize_action_settings(settings: Option<&Value>) -> String {
    match settings {
        Some(value) => value.to_string(),
        None => "{}".to_string(),
    }
}
