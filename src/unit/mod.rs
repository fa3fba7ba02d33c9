mod reconcile;
mod types;

pub use reconcile::{inspect, reconcile, Outcome, ReconcileError, UnitState};
pub use types::{Expected, FileSpec, ManagedFile, Validity};
