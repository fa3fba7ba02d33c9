use crate::unit::ManagedFile;
use std::sync::Arc;

/// Builds a fresh unit descriptor for one reconciliation run.
///
/// Units carry no durable state, so each run re-derives them from scratch.
pub type UnitFactory = Arc<dyn Fn() -> ManagedFile + Send + Sync>;

/// A named contributor of managed files, the analog of one package in the
/// project's dependency chain. Registration replaces runtime reflection: a
/// provider states its dependencies and hands over explicit unit factories.
#[derive(Clone)]
pub struct Provider {
    name: String,
    depends_on: Vec<String>,
    factories: Vec<UnitFactory>,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
            factories: Vec::new(),
        }
    }

    /// Declare a dependency on another provider by name.
    pub fn depends_on(mut self, dependency: impl Into<String>) -> Self {
        self.depends_on.push(dependency.into());
        self
    }

    /// Contribute one managed file.
    pub fn unit<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> ManagedFile + Send + Sync + 'static,
    {
        self.factories.push(Arc::new(factory));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn dependencies(&self) -> &[String] {
        &self.depends_on
    }

    pub(crate) fn factories(&self) -> &[UnitFactory] {
        &self.factories
    }
}

/// All units sharing one priority value; a tier reconciles as one
/// concurrent batch.
#[derive(Clone)]
pub struct Tier {
    pub priority: f64,
    pub units: Vec<ManagedFile>,
}
