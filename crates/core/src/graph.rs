//! Dependency graph projection and traversal.
//!
//! The registry projects into a petgraph `DiGraph` whose nodes are target
//! names (declared targets plus any dangling dependency names) and whose
//! edges point from a target to each of its dependencies in declared order.
//! The structure is fixed once projected; every query runs with a fresh
//! [`Traversal`] so visited and exploring marks never leak between calls.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};

use crate::registry::TargetRegistry;

/// Per-query traversal state: three-color marks plus the explicit path.
///
/// A node in `exploring` is on the current recursion path; a node in
/// `visited` but not `exploring` is fully explored.
#[derive(Debug, Default)]
struct Traversal {
    visited: HashSet<NodeIndex>,
    exploring: HashSet<NodeIndex>,
    stack: Vec<NodeIndex>,
}

/// Read-only adjacency view over a target registry.
#[derive(Debug)]
pub struct DepGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl DepGraph {
    /// Project a registry into its dependency graph.
    ///
    /// Dangling dependency names become leaf nodes so traversal can walk
    /// through them; whether a rule exists for them is checked at run time,
    /// not here.
    pub fn from_registry(registry: &TargetRegistry) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        for target in registry.targets() {
            let from = Self::ensure_node(&mut graph, &mut nodes, &target.name);
            for dependency in &target.dependencies {
                let to = Self::ensure_node(&mut graph, &mut nodes, dependency);
                graph.add_edge(from, to, ());
            }
        }

        Self { graph, nodes }
    }

    fn ensure_node(
        graph: &mut DiGraph<String, ()>,
        nodes: &mut HashMap<String, NodeIndex>,
        name: &str,
    ) -> NodeIndex {
        if let Some(&index) = nodes.get(name) {
            return index;
        }
        let index = graph.add_node(name.to_string());
        nodes.insert(name.to_string(), index);
        index
    }

    /// Direct dependencies of a node in declared order.
    ///
    /// `neighbors` yields edges most-recently-added first, so the collected
    /// list is reversed to recover declaration order.
    fn dependencies_of(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut dependencies: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        dependencies.reverse();
        dependencies
    }

    /// Search the whole graph for a cycle.
    ///
    /// Returns an empty vector when the graph is acyclic. Otherwise returns
    /// the traversal stack as it stood when a back edge was found: the
    /// cycle's nodes in path order, possibly preceded by an acyclic lead-in
    /// when the search entered the cycle from outside it.
    pub fn find_cycle(&self) -> Vec<String> {
        let mut traversal = Traversal::default();
        for node in self.graph.node_indices() {
            if traversal.visited.contains(&node) {
                continue;
            }
            if self.is_cyclic(node, &mut traversal) {
                return traversal
                    .stack
                    .iter()
                    .map(|&index| self.graph[index].clone())
                    .collect();
            }
        }
        Vec::new()
    }

    fn is_cyclic(&self, current: NodeIndex, traversal: &mut Traversal) -> bool {
        traversal.visited.insert(current);
        traversal.exploring.insert(current);
        traversal.stack.push(current);

        for next in self.dependencies_of(current) {
            if traversal.exploring.contains(&next) {
                // Back edge. The stack is deliberately left unpopped so the
                // caller can read the offending path out of it.
                return true;
            }
            if !traversal.visited.contains(&next) && self.is_cyclic(next, traversal) {
                return true;
            }
        }

        traversal.stack.pop();
        traversal.exploring.remove(&current);
        false
    }

    /// Dependency-first order of `target`'s transitive closure.
    ///
    /// Post-order traversal: every dependency lands before its dependent,
    /// sibling dependencies keep their declared left-to-right order, and
    /// each name appears exactly once however many paths reach it. Dangling
    /// names are included like any other node. A name absent from the graph
    /// produces an empty order. Callers must have established that the
    /// graph is acyclic; the walk itself does not re-check.
    pub fn dependency_order(&self, target: &str) -> Vec<String> {
        let mut traversal = Traversal::default();
        let mut order = Vec::new();
        if let Some(&start) = self.nodes.get(target) {
            self.visit_dependencies_first(start, &mut traversal, &mut order);
        }
        order
    }

    fn visit_dependencies_first(
        &self,
        current: NodeIndex,
        traversal: &mut Traversal,
        order: &mut Vec<String>,
    ) {
        traversal.visited.insert(current);
        for next in self.dependencies_of(current) {
            if !traversal.visited.contains(&next) {
                self.visit_dependencies_first(next, traversal, order);
            }
        }
        order.push(self.graph[current].clone());
    }

    /// True when `name` is a node in the projection, declared or dangling.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Number of nodes in the projection, dangling names included.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
