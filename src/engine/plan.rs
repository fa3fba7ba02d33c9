use super::EngineError;
use crate::registry::Registry;
use crate::unit::{inspect, UnitState};
use crate::workspace::Workspace;
use serde::Serialize;

/// One unit's classification in a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub path: String,
    pub state: UnitState,
}

/// The read-only answer to "what would `ensure` change?".
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub entries: Vec<PlanEntry>,
    pub generated_at: String,
}

impl PlanReport {
    /// True when every managed file is already in shape.
    pub fn is_clean(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| matches!(entry.state, UnitState::UpToDate | UnitState::Unwanted))
    }
}

/// Classify every discovered unit without writing anything.
///
/// Walks tiers in the same order `ensure_all` would, so the report reads the
/// way the run would execute.
pub async fn plan_all(
    workspace: &Workspace,
    registry: &Registry,
) -> Result<PlanReport, EngineError> {
    let mut report = PlanReport::default();

    for tier in registry.discover()? {
        for unit in tier.units {
            let path = unit.identity();
            let state = inspect(&unit, workspace)
                .await
                .map_err(|source| EngineError::Unit {
                    unit: path.clone(),
                    source,
                })?;
            report.entries.push(PlanEntry { path, state });
        }
    }

    report.generated_at = chrono::Utc::now().to_rfc3339();
    Ok(report)
}
