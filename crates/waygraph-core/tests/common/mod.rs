//! Shared fixtures for waygraph-core integration tests.

#![allow(dead_code)]

use waygraph_core::{Graph, NodePath};

/// Edges of the a–n reference graph, in record order.
pub const EDGES: [(&str, &str, f64); 15] = [
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

/// Nodes of the a–n reference graph.
pub const NODES: [&str; 13] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "j", "k", "l", "m", "n",
];

/// Build the reference graph.
pub fn reference_graph() -> Graph {
    Graph::build(NODES, EDGES).expect("reference graph should build")
}

/// Owned path from string literals.
pub fn path(ids: &[&str]) -> NodePath {
    ids.iter().map(ToString::to_string).collect()
}

/// Total cost of `path` in `graph`; panics if an edge is missing.
pub fn path_cost(graph: &Graph, path: &[String]) -> f64 {
    path.windows(2)
        .map(|pair| {
            graph
                .weight(&pair[0], &pair[1])
                .unwrap_or_else(|| panic!("no edge {} -> {}", pair[0], pair[1]))
        })
        .sum()
}
