use super::types::ManagedFile;
use crate::format::FormatError;
use crate::value::{merge_values, value_is_empty};
use crate::workspace::Workspace;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Format error: {0}")]
    FormatError(#[from] FormatError),

    #[error("Failed to compute expected config: {0}")]
    Expected(String),
}

/// What `reconcile` did to a unit's file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Created,
    Merged,
    Unchanged,
    Skipped,
}

/// What `inspect` found, without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitState {
    Missing,
    Stale,
    UpToDate,
    Unwanted,
}

/// Bring one managed file up to its expected configuration.
///
/// Missing files are written outright. Existing files are loaded, checked,
/// and rewritten only when required content is absent; the write carries the
/// structural union of current and expected content, so user additions
/// survive. Correct files are not touched at all, which keeps repeat runs
/// from producing spurious diffs. Errors propagate to the caller untouched;
/// nothing here retries or rolls back.
pub async fn reconcile(unit: &ManagedFile, workspace: &Workspace) -> Result<Outcome, ReconcileError> {
    let identity = unit.identity();
    let path = workspace.path_for(unit.spec());

    if unit.is_unwanted() {
        debug!(unit = %identity, "Opted out, leaving filesystem alone");
        return Ok(Outcome::Skipped);
    }

    if !path.exists() {
        let expected = unit.expected_value(workspace)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        if value_is_empty(&expected) {
            // Presence-only unit: the file existing is all that is required.
            fs::write(&path, "").await?;
        } else {
            unit.format().dump(&path, &expected).await?;
        }
        info!(unit = %identity, "Created");
        return Ok(Outcome::Created);
    }

    let expected = unit.expected_value(workspace)?;
    if unit.presence_only(&expected) {
        debug!(unit = %identity, "Present, nothing required");
        return Ok(Outcome::Unchanged);
    }

    let current = unit.format().load(&path).await?;
    if unit.is_correct(&expected, &current) {
        debug!(unit = %identity, "Up to date");
        return Ok(Outcome::Unchanged);
    }

    let merged = merge_values(current, &expected);
    unit.format().dump(&path, &merged).await?;
    info!(unit = %identity, "Merged missing configuration");
    Ok(Outcome::Merged)
}

/// Classify a unit's file without writing. The read-only twin of
/// [`reconcile`], used by the dry-run plan.
pub async fn inspect(unit: &ManagedFile, workspace: &Workspace) -> Result<UnitState, ReconcileError> {
    if unit.is_unwanted() {
        return Ok(UnitState::Unwanted);
    }

    let path = workspace.path_for(unit.spec());
    if !path.exists() {
        return Ok(UnitState::Missing);
    }

    let expected = unit.expected_value(workspace)?;
    if unit.presence_only(&expected) {
        return Ok(UnitState::UpToDate);
    }

    let current = unit.format().load(&path).await?;
    if unit.is_correct(&expected, &current) {
        Ok(UnitState::UpToDate)
    } else {
        Ok(UnitState::Stale)
    }
}
