//! Property tests over small random digraphs.

mod common;

use common::path_cost;
use proptest::prelude::*;
use std::collections::HashSet;
use waygraph_core::{
    Graph, bfs_paths, cheapest_path, cycle_membership, dfs_paths, dfs_paths_iterative,
    simple_cycles,
};

/// A random graph on up to 7 nodes with up to 16 edge records (self-loops
/// and repeated pairs included), plus a start/end pair.
fn graph_and_endpoints() -> impl Strategy<Value = (Graph, String, String)> {
    (1usize..=7).prop_flat_map(|nodes| {
        (
            prop::collection::vec((0..nodes, 0..nodes, 0u8..20), 0..16),
            0..nodes,
            0..nodes,
        )
            .prop_map(move |(edges, start, end)| {
                let ids: Vec<String> = (0..nodes).map(|i| format!("n{i}")).collect();
                let records: Vec<(String, String, f64)> = edges
                    .into_iter()
                    .map(|(from, to, cost)| (ids[from].clone(), ids[to].clone(), f64::from(cost)))
                    .collect();
                let graph = Graph::build(ids.clone(), records).expect("ids are in range");
                (graph, ids[start].clone(), ids[end].clone())
            })
    })
}

proptest! {
    #[test]
    fn strategies_find_the_same_set((graph, start, end) in graph_and_endpoints()) {
        let dfs: HashSet<_> = dfs_paths(&graph, &start, &end).into_iter().collect();
        let bfs: HashSet<_> = bfs_paths(&graph, &start, &end).into_iter().collect();
        prop_assert_eq!(dfs, bfs);
    }

    #[test]
    fn iterative_dfs_matches_recursive((graph, start, end) in graph_and_endpoints()) {
        prop_assert_eq!(
            dfs_paths_iterative(&graph, &start, &end),
            dfs_paths(&graph, &start, &end)
        );
    }

    #[test]
    fn paths_are_simple_and_connected((graph, start, end) in graph_and_endpoints()) {
        for found in dfs_paths(&graph, &start, &end) {
            let unique: HashSet<_> = found.iter().collect();
            prop_assert_eq!(unique.len(), found.len());
            prop_assert_eq!(found.first(), Some(&start));
            prop_assert_eq!(found.last(), Some(&end));
            for pair in found.windows(2) {
                prop_assert!(graph.weight(&pair[0], &pair[1]).is_some());
            }
        }
    }

    #[test]
    fn cheapest_is_no_worse_than_any_path((graph, start, end) in graph_and_endpoints()) {
        let all = dfs_paths(&graph, &start, &end);
        match cheapest_path(&graph, &start, &end) {
            None => prop_assert!(all.is_empty()),
            Some(best) => {
                prop_assert!(!all.is_empty());
                prop_assert!((path_cost(&graph, &best.nodes) - best.cost).abs() < 1e-9);
                for candidate in &all {
                    prop_assert!(best.cost <= path_cost(&graph, candidate) + 1e-9);
                }
            }
        }
    }

    #[test]
    fn cycles_are_elementary_and_unique((graph, _start, _end) in graph_and_endpoints()) {
        let cycles = simple_cycles(&graph);
        let mut seen = HashSet::new();

        for cycle in &cycles {
            let unique: HashSet<_> = cycle.iter().collect();
            prop_assert_eq!(unique.len(), cycle.len());
            for pair in cycle.windows(2) {
                prop_assert!(graph.weight(&pair[0], &pair[1]).is_some());
            }
            let (first, last) = (&cycle[0], &cycle[cycle.len() - 1]);
            prop_assert!(graph.weight(last, first).is_some());

            // Canonical rotation: start at the smallest identifier.
            let pivot = cycle
                .iter()
                .enumerate()
                .min_by_key(|(_, id)| *id)
                .map(|(i, _)| i)
                .unwrap_or(0);
            let mut rotated = cycle[pivot..].to_vec();
            rotated.extend_from_slice(&cycle[..pivot]);
            prop_assert!(seen.insert(rotated), "duplicate rotation of {:?}", cycle);
        }
    }

    #[test]
    fn every_self_loop_is_a_cycle((graph, _start, _end) in graph_and_endpoints()) {
        let membership = cycle_membership(&graph);
        for node in graph.nodes() {
            if graph.weight(&node.id, &node.id).is_some() {
                prop_assert!(membership.cycles.contains(&vec![node.id.clone()]));
                prop_assert!(membership.contains_edge(&node.id, &node.id));
            }
        }
    }
}
