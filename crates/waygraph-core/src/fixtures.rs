//! Shared graphs for unit tests.

use crate::graph::Graph;

/// Nodes of the sample graph, in insertion order.
pub(crate) const SAMPLE_NODES: [&str; 13] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "j", "k", "l", "m", "n",
];

/// Edges of the sample graph, in insertion order.
pub(crate) const SAMPLE_EDGES: [(&str, &str, f64); 15] = [
    ("a", "b", 0.5),
    ("b", "c", 10.0),
    ("b", "e", 42.0),
    ("c", "d", 5.0),
    ("d", "e", 0.8),
    ("e", "a", 0.42),
    ("e", "f", 1.0),
    ("e", "h", 0.53),
    ("g", "g", 0.5),
    ("h", "j", 0.5),
    ("j", "h", 0.5),
    ("a", "k", 6.0),
    ("k", "l", 7.0),
    ("l", "m", 8.0),
    ("m", "n", 9.0),
];

/// The a–n graph: a main loop through `a..e`, a self-loop on `g`, an
/// isolated 2-cycle `h <-> j` and a tail `a -> k -> l -> m -> n`.
pub(crate) fn sample_graph() -> Graph {
    Graph::build(SAMPLE_NODES, SAMPLE_EDGES).expect("sample graph is well formed")
}

/// Turn a literal path into owned identifiers.
pub(crate) fn path(ids: &[&str]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

/// A single directed ring `v0 -> v1 -> ... -> v{n-1} -> v0` with unit costs.
pub(crate) fn ring_graph(len: usize) -> Graph {
    let ids: Vec<String> = (0..len).map(|i| format!("v{i}")).collect();
    let edges = (0..len).map(|i| (ids[i].clone(), ids[(i + 1) % len].clone(), 1.0));
    Graph::build(ids.clone(), edges).expect("ring graph is well formed")
}

/// Ring length that a frame-per-node traversal cannot survive on a test
/// thread's stack.
pub(crate) const LONG_RING: usize = 200_000;
