//! Directed weighted graph model built once from flat node/edge records.
//!
//! The model wraps a petgraph `DiGraph` together with an identifier index,
//! the same way the rest of the workspace keys petgraph nodes by domain id.
//!
//! ## Edge collapse
//!
//! Edge *records* may repeat a (source, target) pair. The model keeps a
//! simple weighted adjacency: the last record applied for a pair sets its
//! cost, and the pair keeps the position of its first insertion.
//!
//! ## Successor order
//!
//! Successors are reported in the order their (source, target) pair was
//! first inserted. petgraph walks a node's edges newest-first, so the order
//! is frozen into per-node lists when the graph is built. Every traversal
//! order in this crate is defined relative to these lists.

use crate::error::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// A graph node. Only `id` is significant to the algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique identifier within the graph.
    pub id: String,
    /// Informational display name.
    pub name: String,
}

impl Node {
    /// Create a node with an explicit display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&str> for Node {
    fn from(id: &str) -> Self {
        Self::new(id, id)
    }
}

impl From<String> for Node {
    fn from(id: String) -> Self {
        Self {
            name: id.clone(),
            id,
        }
    }
}

/// A directed edge between two node identifiers with a non-negative cost.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEdge {
    /// Source node identifier.
    pub from: String,
    /// Target node identifier.
    pub to: String,
    /// Traversal cost. Assumed finite and non-negative.
    pub cost: f64,
}

impl WeightedEdge {
    /// Create an edge from `from` to `to` costing `cost`.
    pub fn new(from: impl Into<String>, to: impl Into<String>, cost: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cost,
        }
    }
}

impl From<(&str, &str, f64)> for WeightedEdge {
    fn from((from, to, cost): (&str, &str, f64)) -> Self {
        Self::new(from, to, cost)
    }
}

impl From<(String, String, f64)> for WeightedEdge {
    fn from((from, to, cost): (String, String, f64)) -> Self {
        Self { from, to, cost }
    }
}

/// Collects node and edge records and produces an immutable [`Graph`].
///
/// Nodes may be added in any order relative to edges; references are only
/// resolved in [`GraphBuilder::build`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    positions: HashMap<String, usize>,
    edges: Vec<WeightedEdge>,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. A repeated identifier replaces the display name and keeps
    /// the original position.
    pub fn add_node(&mut self, node: impl Into<Node>) -> &mut Self {
        let node = node.into();
        if let Some(&pos) = self.positions.get(&node.id) {
            self.nodes[pos].name = node.name;
        } else {
            self.positions.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
        }
        self
    }

    /// Add an edge record. Records are applied in the order they are added.
    pub fn add_edge(&mut self, edge: impl Into<WeightedEdge>) -> &mut Self {
        self.edges.push(edge.into());
        self
    }

    /// Resolve all edges and freeze the graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReference`] for the first edge whose source
    /// or target was never added as a node.
    pub fn build(self) -> Result<Graph> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut node_map = HashMap::with_capacity(self.nodes.len());

        for node in self.nodes {
            let id = node.id.clone();
            let index = graph.add_node(node);
            node_map.insert(id, index);
        }

        for edge in self.edges {
            let resolve = |id: &str| {
                node_map.get(id).copied().ok_or_else(|| Error::InvalidReference {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: id.to_string(),
                })
            };
            let source = resolve(&edge.from)?;
            let target = resolve(&edge.to)?;

            // update_edge keeps the existing EdgeIndex and overwrites the weight.
            graph.update_edge(source, target, edge.cost);
        }

        let successors = graph
            .node_indices()
            .map(|node| {
                let mut outgoing: Vec<_> = graph.edges(node).map(|e| (e.id(), e.target())).collect();
                outgoing.sort_unstable_by_key(|&(id, _)| id);
                outgoing.into_iter().map(|(_, target)| target).collect()
            })
            .collect();

        Ok(Graph {
            graph,
            node_map,
            successors,
        })
    }
}

/// Immutable directed weighted graph.
///
/// Built once per query session and shared read-only by every algorithm.
#[derive(Debug, Clone)]
pub struct Graph {
    graph: DiGraph<Node, f64>,
    node_map: HashMap<String, NodeIndex>,
    /// Successor lists in first-insertion order, indexed by `NodeIndex`.
    successors: Vec<Vec<NodeIndex>>,
}

impl Graph {
    /// Build a graph from node records and edge records, applied in order.
    ///
    /// ```
    /// use waygraph_core::Graph;
    ///
    /// let graph = Graph::build(["a", "b"], [("a", "b", 1.5)]).unwrap();
    /// assert_eq!(graph.weight("a", "b"), Some(1.5));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReference`] if an edge names an unknown node.
    pub fn build<N, E>(nodes: N, edges: E) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<Node>,
        E: IntoIterator,
        E::Item: Into<WeightedEdge>,
    {
        let mut builder = GraphBuilder::new();
        for node in nodes {
            builder.add_node(node);
        }
        for edge in edges {
            builder.add_edge(edge);
        }
        builder.build()
    }

    /// Returns `true` if a node with this identifier exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Look up a node by identifier.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.graph[index])
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(|index| &self.graph[index])
    }

    /// Effective edges as `(from, to, cost)` in first-insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.graph.edge_references().map(|e| {
            (
                self.id_of(e.source()),
                self.id_of(e.target()),
                *e.weight(),
            )
        })
    }

    /// Outgoing neighbours of `id`. Empty if the node is unknown.
    pub fn successors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.index_of(id)
            .into_iter()
            .flat_map(move |index| self.successors[index.index()].iter())
            .map(move |&next| self.id_of(next))
    }

    /// Effective cost of the edge `from -> to`, if there is one.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        let source = self.index_of(from)?;
        let target = self.index_of(to)?;
        self.weight_between(source, target)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of effective (collapsed) edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    pub(crate) fn id_of(&self, index: NodeIndex) -> &str {
        &self.graph[index].id
    }

    pub(crate) fn successor_indices(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.successors[index.index()]
    }

    pub(crate) fn weight_between(&self, source: NodeIndex, target: NodeIndex) -> Option<f64> {
        self.graph
            .find_edge(source, target)
            .map(|edge| self.graph[edge])
    }

    pub(crate) fn ids_of(&self, path: &[NodeIndex]) -> Vec<String> {
        path.iter().map(|&index| self.id_of(index).to_string()).collect()
    }

    pub(crate) fn inner(&self) -> &DiGraph<Node, f64> {
        &self.graph
    }
}
