use crate::unit::FileSpec;
use std::path::{Path, PathBuf};

/// The project directory reconciliation runs against.
///
/// All unit paths resolve beneath `root`. Passing a different root (for
/// example a temporary directory) redirects every managed file, which is the
/// seam tests use to exercise concrete units without side effects.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a managed file inside this workspace.
    pub fn path_for(&self, spec: &FileSpec) -> PathBuf {
        self.root.join(spec.relative_path())
    }

    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.root.join(relative).exists()
    }

    /// Read a file relative to the workspace root.
    ///
    /// Synchronous on purpose: derived expected-config closures call this
    /// while computing their value and are not async themselves.
    pub fn read_to_string(&self, relative: impl AsRef<Path>) -> std::io::Result<String> {
        std::fs::read_to_string(self.root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::unit::ManagedFile;

    #[test]
    fn test_path_for_joins_root_and_spec() {
        let ws = Workspace::new("/project");
        let unit = ManagedFile::new("app", Format::Toml).in_dir("config");
        assert_eq!(ws.path_for(unit.spec()), PathBuf::from("/project/config/app.toml"));
    }
}
