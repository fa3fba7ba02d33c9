use super::reconcile::ReconcileError;
use crate::format::Format;
use crate::value::{is_subset, value_is_empty, Value};
use crate::workspace::Workspace;
use std::path::PathBuf;
use std::sync::Arc;

/// File identity: the four fields a managed path is derived from.
#[derive(Debug, Clone)]
pub struct FileSpec {
    pub name: String,
    pub extension: String,
    pub separator: String,
    pub parent: PathBuf,
}

impl FileSpec {
    /// Final file name, `name + separator + extension`.
    ///
    /// Degenerates to a pure dotfile when `name` is empty (`"" + "." +
    /// "gitignore"` gives `.gitignore`) and to a bare name when `extension`
    /// is empty. Both empty is a unit definition bug; tests catch it.
    pub fn file_name(&self) -> String {
        debug_assert!(
            !(self.name.is_empty() && self.extension.is_empty()),
            "managed file needs a name or an extension"
        );
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}{}{}", self.name, self.separator, self.extension)
        }
    }

    /// Path relative to the workspace root.
    pub fn relative_path(&self) -> PathBuf {
        self.parent.join(self.file_name())
    }
}

/// Where a unit's expected configuration comes from.
///
/// `Fixed` holds a literal value; `Derived` computes one at reconcile time
/// and may read other files through the workspace (for example a build
/// manifest that inspects the license file written one tier earlier).
#[derive(Clone)]
pub enum Expected {
    Fixed(Value),
    Derived(Arc<dyn Fn(&Workspace) -> Result<Value, ReconcileError> + Send + Sync>),
}

/// Correctness policy for an existing file.
///
/// `Subset` is the default structural-containment check. `Custom` receives
/// `(expected, current)` and decides itself; plain-text units use it for
/// marker-line checks the structural rules cannot express.
#[derive(Clone)]
pub enum Validity {
    Subset,
    Custom(Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>),
}

/// One managed configuration file: identity, encoding and expected content.
///
/// Building a `ManagedFile` never touches the filesystem; all I/O happens in
/// [`reconcile`](super::reconcile) and [`inspect`](super::inspect). Units are
/// stateless descriptors, re-created by their registry factory on every run;
/// the file on disk is the only durable state.
#[derive(Clone)]
pub struct ManagedFile {
    spec: FileSpec,
    format: Format,
    priority: f64,
    unwanted: bool,
    expected: Expected,
    validity: Validity,
}

impl ManagedFile {
    /// New unit named `name`, with the format's default extension, a `.`
    /// separator, the workspace root as parent, priority 0 and an empty
    /// expected config (a presence-only marker file until told otherwise).
    pub fn new(name: impl Into<String>, format: Format) -> Self {
        Self {
            spec: FileSpec {
                name: name.into(),
                extension: format.file_extension().to_string(),
                separator: ".".to_string(),
                parent: PathBuf::new(),
            },
            format,
            priority: 0.0,
            unwanted: false,
            expected: Expected::Fixed(Value::Null),
            validity: Validity::Subset,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.spec.extension = extension.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.spec.separator = separator.into();
        self
    }

    pub fn in_dir(mut self, parent: impl Into<PathBuf>) -> Self {
        self.spec.parent = parent.into();
        self
    }

    /// Higher priorities reconcile in earlier tiers. Orders tiers only;
    /// units sharing a priority run concurrently.
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Mark the file opted out: reconciliation leaves the filesystem alone.
    pub fn unwanted(mut self) -> Self {
        self.unwanted = true;
        self
    }

    pub fn expecting(mut self, value: Value) -> Self {
        self.expected = Expected::Fixed(value);
        self
    }

    pub fn expecting_with<F>(mut self, compute: F) -> Self
    where
        F: Fn(&Workspace) -> Result<Value, ReconcileError> + Send + Sync + 'static,
    {
        self.expected = Expected::Derived(Arc::new(compute));
        self
    }

    pub fn validated_by<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.validity = Validity::Custom(Arc::new(check));
        self
    }

    pub fn spec(&self) -> &FileSpec {
        &self.spec
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    pub fn is_unwanted(&self) -> bool {
        self.unwanted
    }

    /// Unit identity used in logs, reports and error messages.
    pub fn identity(&self) -> String {
        self.spec.relative_path().display().to_string()
    }

    /// Resolve the expected configuration for this run.
    pub fn expected_value(&self, workspace: &Workspace) -> Result<Value, ReconcileError> {
        match &self.expected {
            Expected::Fixed(value) => Ok(value.clone()),
            Expected::Derived(compute) => compute(workspace),
        }
    }

    /// Whether this unit only requires its file to exist.
    ///
    /// True for the default validity with an empty expected config; such a
    /// file never needs to be parsed, so even content the codec would reject
    /// counts as correct.
    pub fn presence_only(&self, expected: &Value) -> bool {
        matches!(self.validity, Validity::Subset) && value_is_empty(expected)
    }

    /// Whether the current on-disk content already satisfies this unit.
    pub fn is_correct(&self, expected: &Value, current: &Value) -> bool {
        match &self.validity {
            Validity::Subset => value_is_empty(expected) || is_subset(expected, current),
            Validity::Custom(check) => check(expected, current),
        }
    }
}
