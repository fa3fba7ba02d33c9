use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Node not in graph: {0}")]
    MissingNode(String),

    #[error("No path from {0} to {1}")]
    NoPath(String, String),

    #[error("Cycle detected in dependency subgraph, cannot topologically sort")]
    Cycle,
}

/// Directed graph over package names with bidirectional adjacency.
///
/// An edge `source -> target` reads "source depends on target". Forward and
/// reverse edges are both maintained so dependents and dependencies are
/// equally cheap to walk.
#[derive(Debug, Clone, Default)]
pub struct DiGraph {
    nodes: HashSet<String>,
    edges: HashMap<String, HashSet<String>>,
    reverse_edges: HashMap<String, HashSet<String>>,
}

impl DiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: &str) {
        if self.nodes.insert(node.to_string()) {
            self.edges.entry(node.to_string()).or_default();
            self.reverse_edges.entry(node.to_string()).or_default();
        }
    }

    /// Add a directed edge meaning `source` depends on `target`.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        self.add_node(source);
        self.add_node(target);
        self.edges
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string());
        self.reverse_edges
            .entry(target.to_string())
            .or_default()
            .insert(source.to_string());
    }

    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .get(source)
            .is_some_and(|targets| targets.contains(target))
    }

    pub fn nodes(&self) -> &HashSet<String> {
        &self.nodes
    }

    /// All nodes that can reach `target`, i.e. its transitive dependents.
    ///
    /// Walks reverse edges breadth-first; `target` itself is excluded.
    pub fn ancestors(&self, target: &str) -> HashSet<String> {
        let mut visited = HashSet::new();
        if !self.contains(target) {
            return visited;
        }

        let mut queue: VecDeque<String> = self
            .reverse_edges
            .get(target)
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        while let Some(node) = queue.pop_front() {
            if visited.insert(node.clone()) {
                for dependent in self.reverse_edges.get(&node).into_iter().flatten() {
                    if !visited.contains(dependent) {
                        queue.push_back(dependent.clone());
                    }
                }
            }
        }

        visited
    }

    /// All nodes reachable from `source` along forward edges, i.e. its
    /// transitive dependencies. `source` itself is excluded.
    pub fn descendants(&self, source: &str) -> HashSet<String> {
        let mut visited = HashSet::new();
        if !self.contains(source) {
            return visited;
        }

        let mut queue: VecDeque<String> = self
            .edges
            .get(source)
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        while let Some(node) = queue.pop_front() {
            if visited.insert(node.clone()) {
                for dependency in self.edges.get(&node).into_iter().flatten() {
                    if !visited.contains(dependency) {
                        queue.push_back(dependency.clone());
                    }
                }
            }
        }

        visited
    }

    /// Number of edges on the shortest path from `source` to `target` (BFS).
    pub fn shortest_path_length(&self, source: &str, target: &str) -> Result<usize, GraphError> {
        for node in [source, target] {
            if !self.contains(node) {
                return Err(GraphError::MissingNode(node.to_string()));
            }
        }
        if source == target {
            return Ok(0);
        }

        let mut visited: HashSet<&str> = HashSet::from([source]);
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(source, 0)]);

        while let Some((node, distance)) = queue.pop_front() {
            for neighbor in self.edges.get(node).into_iter().flatten() {
                if neighbor.as_str() == target {
                    return Ok(distance + 1);
                }
                if visited.insert(neighbor.as_str()) {
                    queue.push_back((neighbor.as_str(), distance + 1));
                }
            }
        }

        Err(GraphError::NoPath(source.to_string(), target.to_string()))
    }

    /// Topologically sort a subset of nodes, dependencies before dependents.
    ///
    /// Kahn's algorithm with a min-heap, so ties resolve in lexicographic
    /// order and the result is deterministic. Only edges with both endpoints
    /// inside `subset` count. A cycle inside the subset fails outright rather
    /// than returning a partial order.
    pub fn topological_sort_subgraph(
        &self,
        subset: &HashSet<String>,
    ) -> Result<Vec<String>, GraphError> {
        let mut pending_deps: HashMap<&str, usize> = subset
            .iter()
            .map(|node| {
                let count = self
                    .edges
                    .get(node.as_str())
                    .map_or(0, |deps| deps.iter().filter(|d| subset.contains(*d)).count());
                (node.as_str(), count)
            })
            .collect();

        let mut heap: BinaryHeap<Reverse<&str>> = pending_deps
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(node, _)| Reverse(*node))
            .collect();

        let mut result = Vec::with_capacity(subset.len());
        while let Some(Reverse(node)) = heap.pop() {
            result.push(node.to_string());
            for dependent in self.reverse_edges.get(node).into_iter().flatten() {
                if let Some(count) = pending_deps.get_mut(dependent.as_str()) {
                    *count -= 1;
                    if *count == 0 {
                        heap.push(Reverse(dependent.as_str()));
                    }
                }
            }
        }

        if result.len() != subset.len() {
            return Err(GraphError::Cycle);
        }
        Ok(result)
    }
}
