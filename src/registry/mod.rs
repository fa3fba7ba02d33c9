mod types;

pub use types::{Provider, Tier, UnitFactory};

use crate::graph::{DiGraph, GraphError};
use crate::unit::ManagedFile;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Provider already registered: {0}")]
    DuplicateProvider(String),

    #[error("Graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("Providers {first} and {second} both manage {path}")]
    PathCollision {
        path: String,
        first: String,
        second: String,
    },
}

/// Central table of providers and the dependency graph between them.
///
/// The base provider is registered implicitly at construction; every other
/// provider joins with [`register`](Registry::register). Discovery walks the
/// graph instead of scanning modules, so the set of managed files is always
/// explicit and inspectable.
pub struct Registry {
    base: String,
    graph: DiGraph,
    providers: HashMap<String, Provider>,
}

impl Registry {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let mut graph = DiGraph::new();
        graph.add_node(&base);

        let mut providers = HashMap::new();
        providers.insert(base.clone(), Provider::new(&base));

        Self {
            base,
            graph,
            providers,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn register(&mut self, provider: Provider) -> Result<(), RegistryError> {
        let name = provider.name().to_string();
        if self.providers.contains_key(&name) {
            return Err(RegistryError::DuplicateProvider(name));
        }

        self.graph.add_node(&name);
        for dependency in provider.dependencies() {
            self.graph.add_edge(&name, dependency);
        }
        self.providers.insert(name, provider);
        Ok(())
    }

    /// Providers relevant to a run (the base plus everything transitively
    /// depending on it), ordered dependencies-first.
    pub fn provider_order(&self) -> Result<Vec<String>, RegistryError> {
        let mut relevant = self.graph.ancestors(&self.base);
        relevant.insert(self.base.clone());
        Ok(self.graph.topological_sort_subgraph(&relevant)?)
    }

    /// Providers between the base and `target`, dependencies first and
    /// `target` excluded. This is the chain sibling surfaces (shared CLI
    /// commands, fixture discovery) traverse.
    pub fn provider_chain(&self, target: &str) -> Result<Vec<String>, RegistryError> {
        if !self.graph.contains(target) {
            return Err(GraphError::MissingNode(target.to_string()).into());
        }

        let dependencies = self.graph.descendants(target);
        let mut relevant: HashSet<String> = self
            .graph
            .ancestors(&self.base)
            .into_iter()
            .filter(|name| dependencies.contains(name))
            .collect();
        if dependencies.contains(&self.base) {
            relevant.insert(self.base.clone());
        }
        Ok(self.graph.topological_sort_subgraph(&relevant)?)
    }

    /// Instantiate every discovered unit and group them into priority tiers,
    /// highest priority first.
    ///
    /// Two units resolving to the same path are rejected outright: silently
    /// letting one win would make reconciliation order-dependent.
    pub fn discover(&self) -> Result<Vec<Tier>, RegistryError> {
        let order = self.provider_order()?;

        let mut owners: HashMap<PathBuf, String> = HashMap::new();
        let mut units: Vec<ManagedFile> = Vec::new();
        for name in &order {
            let provider = &self.providers[name];
            for factory in provider.factories() {
                let unit = factory();
                let path = unit.spec().relative_path();
                if let Some(first) = owners.insert(path.clone(), name.clone()) {
                    return Err(RegistryError::PathCollision {
                        path: path.display().to_string(),
                        first,
                        second: name.clone(),
                    });
                }
                units.push(unit);
            }
        }

        // Stable sort keeps provider order inside each tier.
        units.sort_by(|a, b| b.priority().total_cmp(&a.priority()));

        let mut tiers: Vec<Tier> = Vec::new();
        for unit in units {
            match tiers.last_mut() {
                Some(tier) if tier.priority == unit.priority() => tier.units.push(unit),
                _ => tiers.push(Tier {
                    priority: unit.priority(),
                    units: vec![unit],
                }),
            }
        }
        Ok(tiers)
    }
}
