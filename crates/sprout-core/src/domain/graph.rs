//! Inheritance graph over named config entities.
//!
//! Each node lists the parents it inherits from, in declared order. A
//! depth-first search from one start node records discovery and finish
//! times; an edge into a node that is discovered but not yet finished is a
//! back edge, which means the graph has a cycle reachable from the start.
//! The order in which nodes finish is the merge order: every ancestor
//! finishes before its descendants, and the start node finishes last.

use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexMap;

/// Result of one depth-first traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal<K> {
    /// Nodes in the order they finished (post-order).
    pub finished: Vec<K>,
    /// Edges `(from, to)` that closed a cycle.
    pub back_edges: Vec<(K, K)>,
}

impl<K> Traversal<K> {
    pub fn has_cycle(&self) -> bool {
        !self.back_edges.is_empty()
    }
}

/// Directed graph of `node -> parents`, iterated in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceGraph<K: Eq + Hash> {
    edges: IndexMap<K, Vec<K>>,
}

impl<K: Eq + Hash> Default for InheritanceGraph<K> {
    fn default() -> Self {
        Self {
            edges: IndexMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> InheritanceGraph<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `node` with its parents, replacing any previous entry.
    pub fn add_node(&mut self, node: K, parents: impl IntoIterator<Item = K>) {
        self.edges.insert(node, parents.into_iter().collect());
    }

    pub fn contains(&self, node: &K) -> bool {
        self.edges.contains_key(node)
    }

    /// Declared parents of `node`. Nodes that were never added have none.
    pub fn parents(&self, node: &K) -> &[K] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.edges.keys()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Depth-first traversal from `start`, following parents in declared order.
    pub fn traverse(&self, start: &K) -> Traversal<K> {
        let mut dfs = Dfs {
            graph: self,
            visits: HashMap::new(),
            finished: Vec::new(),
            back_edges: Vec::new(),
        };
        dfs.visit(start);

        Traversal {
            finished: dfs.finished,
            back_edges: dfs.back_edges,
        }
    }

    /// Whether a cycle is reachable from `start`, plus the merge order.
    ///
    /// The merge order is only meaningful when there is no cycle.
    pub fn has_cycle(&self, start: &K) -> (bool, Vec<K>) {
        let traversal = self.traverse(start);
        (traversal.has_cycle(), traversal.finished)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    Tree,
    Back,
    Cross,
}

/// A node is `Open` while its ancestors are being explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Open,
    Done,
}

struct Dfs<'g, K: Eq + Hash> {
    graph: &'g InheritanceGraph<K>,
    visits: HashMap<K, Visit>,
    finished: Vec<K>,
    back_edges: Vec<(K, K)>,
}

impl<K: Clone + Eq + Hash> Dfs<'_, K> {
    fn visit(&mut self, node: &K) {
        self.visits.insert(node.clone(), Visit::Open);

        let graph = self.graph;
        for parent in graph.parents(node) {
            match self.classify(parent) {
                EdgeKind::Tree => self.visit(parent),
                EdgeKind::Back => self.back_edges.push((node.clone(), parent.clone())),
                EdgeKind::Cross => {}
            }
        }

        self.visits.insert(node.clone(), Visit::Done);
        self.finished.push(node.clone());
    }

    fn classify(&self, target: &K) -> EdgeKind {
        match self.visits.get(target) {
            None => EdgeKind::Tree,
            Some(Visit::Open) => EdgeKind::Back,
            Some(Visit::Done) => EdgeKind::Cross,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&'static str, &[&'static str])]) -> InheritanceGraph<&'static str> {
        let mut g = InheritanceGraph::new();
        for (node, parents) in edges {
            g.add_node(*node, parents.iter().copied());
        }
        g
    }

    #[test]
    fn single_node_merges_alone() {
        let g = graph(&[("a", &[])]);
        assert_eq!(g.has_cycle(&"a"), (false, vec!["a"]));
    }

    #[test]
    fn chain_finishes_ancestors_first() {
        let g = graph(&[("c", &["b"]), ("b", &["a"]), ("a", &[])]);
        assert_eq!(g.has_cycle(&"c"), (false, vec!["a", "b", "c"]));
    }

    #[test]
    fn diamond_visits_shared_ancestor_once() {
        let g = graph(&[("d", &["b", "c"]), ("b", &["a"]), ("c", &["a"]), ("a", &[])]);
        let (cycle, order) = g.has_cycle(&"d");
        assert!(!cycle);
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn declared_parent_order_is_respected() {
        let g = graph(&[("x", &["b", "a"]), ("a", &[]), ("b", &[])]);
        assert_eq!(g.has_cycle(&"x").1, vec!["b", "a", "x"]);
    }

    #[test]
    fn two_node_cycle_is_detected() {
        let g = graph(&[("a", &["b"]), ("b", &["a"])]);
        let traversal = g.traverse(&"a");
        assert!(traversal.has_cycle());
        assert_eq!(traversal.back_edges, vec![("b", "a")]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let g = graph(&[("a", &["a"])]);
        assert!(g.has_cycle(&"a").0);
    }

    #[test]
    fn cycle_outside_reach_is_ignored() {
        let g = graph(&[("a", &[]), ("b", &["c"]), ("c", &["b"])]);
        assert_eq!(g.has_cycle(&"a"), (false, vec!["a"]));
        assert!(g.has_cycle(&"b").0);
    }

    #[test]
    fn unknown_nodes_are_leaves() {
        let g = graph(&[("a", &["ghost"])]);
        assert_eq!(g.has_cycle(&"a"), (false, vec!["ghost", "a"]));
        assert!(g.parents(&"ghost").is_empty());
    }
}
