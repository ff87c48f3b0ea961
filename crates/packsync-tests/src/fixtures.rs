//! Plan fixtures for end-to-end tests

use anyhow::Result;
use packsync_lib::plan::{OverrideEntry, UpdatePlan};
use serde_json::Value;

/// Parse a plan from a `serde_json::json!` value
pub fn plan_from_json(value: Value) -> Result<UpdatePlan> {
    Ok(UpdatePlan::from_json_str(&serde_json::to_string(&value)?)?)
}

/// Override file entry under the `overrides/` prefix
pub fn override_file(relative_path: &str, content: &str) -> OverrideEntry {
    OverrideEntry::file(format!("overrides/{relative_path}"), content)
}
