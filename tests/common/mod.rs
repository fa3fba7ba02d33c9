use rigging::Workspace;
use tempfile::TempDir;

/// Fresh workspace rooted in a temporary directory.
///
/// Keep the `TempDir` alive for the duration of the test; dropping it
/// deletes the directory.
pub fn test_workspace() -> (TempDir, Workspace) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let workspace = Workspace::new(dir.path());
    (dir, workspace)
}
