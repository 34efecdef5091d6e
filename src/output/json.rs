//! JSON rendering of a plan for the provisioning engine.

use crate::error::StackError;
use crate::processing::StackPlan;

/// Render the plan as pretty JSON.
///
/// Field and map orders are fixed, so identical plans render identically.
pub fn plan_json(plan: &StackPlan) -> Result<String, StackError> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Write the plan JSON to `path`.
pub fn write_plan(plan: &StackPlan, path: &str) -> Result<(), StackError> {
    let json = plan_json(plan)?;
    log::info!("Writing plan to file: {path}");
    std::fs::write(path, json)?;
    Ok(())
}
