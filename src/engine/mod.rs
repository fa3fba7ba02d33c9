mod plan;

pub use plan::{plan_all, PlanEntry, PlanReport};

use crate::registry::{Registry, RegistryError, Tier};
use crate::unit::{reconcile, Outcome, ReconcileError};
use crate::workspace::Workspace;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Registry error: {0}")]
    RegistryError(#[from] RegistryError),

    #[error("Reconciliation of {unit} failed: {source}")]
    Unit {
        unit: String,
        #[source]
        source: ReconcileError,
    },

    #[error("Join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

/// What one reconciliation run did, by unit path.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureReport {
    pub created: Vec<String>,
    pub merged: Vec<String>,
    pub unchanged: Vec<String>,
    pub skipped: Vec<String>,
    pub finished_at: String,
}

impl EnsureReport {
    /// True when the run found nothing to write.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.merged.is_empty()
    }
}

/// Reconcile every discovered unit, one priority tier at a time.
pub async fn ensure_all(
    workspace: &Workspace,
    registry: &Registry,
) -> Result<EnsureReport, EngineError> {
    let tiers = registry.discover()?;
    run_tiers(workspace, tiers).await
}

/// Restricted bootstrap pass: only tiers with priority above zero.
///
/// Used when high-priority files must exist before anything else runs, for
/// example a license file a build manifest inspects.
pub async fn ensure_priority_only(
    workspace: &Workspace,
    registry: &Registry,
) -> Result<EnsureReport, EngineError> {
    let tiers = registry
        .discover()?
        .into_iter()
        .filter(|tier| tier.priority > 0.0)
        .collect();
    run_tiers(workspace, tiers).await
}

/// Drive the tiers in order. Units inside a tier fan out concurrently; the
/// next tier never starts before the whole tier has joined. The first unit
/// failure is surfaced once its tier has drained, so in-flight siblings
/// finish and their writes stay in place; the run is idempotent and safe to
/// repeat.
async fn run_tiers(workspace: &Workspace, tiers: Vec<Tier>) -> Result<EnsureReport, EngineError> {
    let mut report = EnsureReport::default();

    for tier in tiers {
        debug!(
            priority = tier.priority,
            units = tier.units.len(),
            "Starting tier"
        );

        let mut tasks = JoinSet::new();
        for unit in tier.units {
            let workspace = workspace.clone();
            tasks.spawn(async move {
                let identity = unit.identity();
                let result = reconcile(&unit, &workspace).await;
                (identity, result)
            });
        }

        let mut first_error: Option<EngineError> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((identity, Ok(outcome))) => match outcome {
                    Outcome::Created => report.created.push(identity),
                    Outcome::Merged => report.merged.push(identity),
                    Outcome::Unchanged => report.unchanged.push(identity),
                    Outcome::Skipped => report.skipped.push(identity),
                },
                Ok((identity, Err(source))) => {
                    error!(unit = %identity, error = %source, "Reconciliation failed");
                    if first_error.is_none() {
                        first_error = Some(EngineError::Unit {
                            unit: identity,
                            source,
                        });
                    }
                }
                Err(join_error) => {
                    if first_error.is_none() {
                        first_error = Some(join_error.into());
                    }
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
    }

    // Join order inside a tier is nondeterministic; sort for stable output.
    report.created.sort();
    report.merged.sort();
    report.unchanged.sort();
    report.skipped.sort();
    report.finished_at = chrono::Utc::now().to_rfc3339();
    Ok(report)
}
