//! Least-cost path search (Dijkstra).
//!
//! Costs are assumed finite and non-negative; ingestion rejects anything
//! else, so no negative-weight detection happens here.
//!
//! ## Tie-break
//!
//! The frontier is a binary heap ordered by `(cost, node insertion order)`,
//! and a node's predecessor is only replaced by a strictly cheaper route.
//! When several paths share the minimum cost, the one whose predecessor was
//! settled first wins. For a fixed record order the answer is therefore
//! always the same.

use crate::graph::Graph;
use crate::paths::NodePath;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A least-cost path and its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct CheapestPath {
    /// Node identifiers from start to end, both included.
    pub nodes: NodePath,
    /// Sum of the edge costs along `nodes`.
    pub cost: f64,
}

/// Node identifiers of the least-cost path from `start` to `end`.
///
/// Returns `None` when either endpoint is unknown or `end` is unreachable.
#[must_use]
pub fn find_cheapest_path(graph: &Graph, start: &str, end: &str) -> Option<NodePath> {
    cheapest_path(graph, start, end).map(|found| found.nodes)
}

/// Least-cost path from `start` to `end` together with its cost.
///
/// `start == end` yields `[start]` at cost 0.
#[must_use]
pub fn cheapest_path(graph: &Graph, start: &str, end: &str) -> Option<CheapestPath> {
    let source = graph.index_of(start)?;
    let target = graph.index_of(end)?;

    let node_count = graph.node_count();
    let mut best: Vec<Option<f64>> = vec![None; node_count];
    let mut previous: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut settled = vec![false; node_count];
    let mut frontier = BinaryHeap::new();

    best[source.index()] = Some(0.0);
    frontier.push(Frontier {
        cost: 0.0,
        node: source,
    });

    while let Some(Frontier { cost, node }) = frontier.pop() {
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;
        if node == target {
            break;
        }

        for edge in graph.inner().edges(node) {
            let next = edge.target();
            if settled[next.index()] {
                continue;
            }
            let candidate = cost + *edge.weight();
            if best[next.index()].is_none_or(|known| candidate < known) {
                best[next.index()] = Some(candidate);
                previous[next.index()] = Some(node);
                frontier.push(Frontier {
                    cost: candidate,
                    node: next,
                });
            }
        }
    }

    let cost = best[target.index()]?;
    let mut route = vec![target];
    let mut current = target;
    while let Some(parent) = previous[current.index()] {
        route.push(parent);
        current = parent;
    }
    route.reverse();

    Some(CheapestPath {
        nodes: graph.ids_of(&route),
        cost,
    })
}

/// Heap entry. Ordered so that `BinaryHeap` pops the cheapest entry first,
/// and among equal costs the earliest-inserted node.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: NodeIndex,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{path, sample_graph};
    use rstest::rstest;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn prefers_longer_but_cheaper_route() {
        let graph = sample_graph();

        let found = cheapest_path(&graph, "a", "e").unwrap();
        assert_eq!(found.nodes, path(&["a", "b", "c", "d", "e"]));
        assert!((found.cost - 16.3).abs() < EPSILON);
    }

    #[test]
    fn back_to_the_loop_head() {
        let graph = sample_graph();

        assert_eq!(
            find_cheapest_path(&graph, "b", "a"),
            Some(path(&["b", "c", "d", "e", "a"]))
        );
    }

    #[rstest]
    #[case::disconnected("f", "g")]
    #[case::isolated_cycle("h", "a")]
    #[case::dead_end("f", "j")]
    #[case::unknown_start("zz", "a")]
    #[case::unknown_end("a", "zz")]
    fn no_route_is_none(#[case] start: &str, #[case] end: &str) {
        let graph = sample_graph();
        assert_eq!(find_cheapest_path(&graph, start, end), None);
    }

    #[test]
    fn start_equals_end_costs_nothing() {
        let graph = sample_graph();

        let found = cheapest_path(&graph, "k", "k").unwrap();
        assert_eq!(found.nodes, path(&["k"]));
        assert!(found.cost.abs() < EPSILON);
    }

    #[test]
    fn zero_cost_edges_are_traversed() {
        let graph = Graph::build(["a", "b", "c"], [("a", "b", 0.0), ("b", "c", 0.0)]).unwrap();

        let found = cheapest_path(&graph, "a", "c").unwrap();
        assert_eq!(found.nodes, path(&["a", "b", "c"]));
        assert!(found.cost.abs() < EPSILON);
    }

    #[rstest]
    #[case::x_first(["s", "x", "y", "t"], &["s", "x", "t"])]
    #[case::y_first(["s", "y", "x", "t"], &["s", "y", "t"])]
    fn ties_follow_node_insertion_order(#[case] nodes: [&str; 4], #[case] expected: &[&str]) {
        let edges = [("s", "x", 1.0), ("s", "y", 1.0), ("x", "t", 1.0), ("y", "t", 1.0)];
        let graph = Graph::build(nodes, edges).unwrap();

        assert_eq!(find_cheapest_path(&graph, "s", "t"), Some(path(expected)));
    }

    #[test]
    fn collapsed_edge_uses_last_cost() {
        let graph = Graph::build(
            ["a", "b", "c"],
            [("a", "c", 1.0), ("a", "b", 1.0), ("b", "c", 1.0), ("a", "c", 5.0)],
        )
        .unwrap();

        assert_eq!(
            find_cheapest_path(&graph, "a", "c"),
            Some(path(&["a", "b", "c"]))
        );
    }
}
