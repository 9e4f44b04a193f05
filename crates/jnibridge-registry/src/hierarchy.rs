//! Type Hierarchy - subtype graph of every declared managed type.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: `JavaPath` of each declared (or referenced) type
//! - Edges: `Extends` to the superclass, `Implements` to each interface
//!
//! Edges point from subtype to supertype, so "A is a subtype of B" is a path
//! query from A to B.

use jnibridge_core::{ConfigurationError, JavaPath};
use petgraph::Direction;
use petgraph::algo::{has_path_connecting, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

/// Edge types in the hierarchy graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyEdge {
    Extends,
    Implements,
}

/// Subtype relation over managed types.
#[derive(Debug, Default, Clone)]
pub struct TypeHierarchy {
    graph: DiGraph<JavaPath, HierarchyEdge>,
    nodes: FxHashMap<JavaPath, NodeIndex>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type node, returning the existing node if already present.
    pub fn add_type(&mut self, path: &JavaPath) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.clone());
        self.nodes.insert(path.clone(), idx);
        idx
    }

    pub fn add_extends(&mut self, sub: &JavaPath, superclass: &JavaPath) {
        let from = self.add_type(sub);
        let to = self.add_type(superclass);
        self.graph.update_edge(from, to, HierarchyEdge::Extends);
    }

    pub fn add_implements(&mut self, sub: &JavaPath, interface: &JavaPath) {
        let from = self.add_type(sub);
        let to = self.add_type(interface);
        self.graph.update_edge(from, to, HierarchyEdge::Implements);
    }

    pub fn contains(&self, path: &JavaPath) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Fail if the declared supertypes form a cycle.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !is_cyclic_directed(&self.graph) {
            return Ok(());
        }
        // Report the smallest name among nodes that can reach themselves.
        let culprit = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .any(|next| has_path_connecting(&self.graph, next, idx, None))
            })
            .map(|idx| &self.graph[idx])
            .min()
            .map(JavaPath::to_string)
            .unwrap_or_default();
        Err(ConfigurationError::CyclicInheritance(culprit))
    }

    /// Whether `sub` is a subtype of `sup` and not the same type.
    pub fn is_strict_subtype(&self, sub: &JavaPath, sup: &JavaPath) -> bool {
        if sub == sup {
            return false;
        }
        match (self.nodes.get(sub), self.nodes.get(sup)) {
            (Some(&from), Some(&to)) => has_path_connecting(&self.graph, from, to, None),
            _ => false,
        }
    }

    /// Direct superclass, if declared.
    pub fn superclass(&self, path: &JavaPath) -> Option<&JavaPath> {
        let idx = *self.nodes.get(path)?;
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .find(|e| *e.weight() == HierarchyEdge::Extends)
            .map(|e| &self.graph[e.target()])
    }

    /// Length of the superclass chain, counting the type itself.
    ///
    /// `java.lang.Object` has depth 1; interfaces do not contribute.
    pub fn depth(&self, path: &JavaPath) -> Option<usize> {
        if !self.contains(path) {
            return None;
        }
        let mut depth = 1;
        let mut current = path;
        while let Some(parent) = self.superclass(current) {
            depth += 1;
            current = parent;
            // A validated hierarchy has no cycles; guard anyway.
            if depth > self.len() {
                break;
            }
        }
        Some(depth)
    }

}
