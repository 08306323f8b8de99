//! Elementary cycle enumeration.
//!
//! The graph is first split into strongly connected components with
//! petgraph's Kosaraju implementation; a cycle never leaves its component.
//! Inside a component every cycle is rooted at its earliest-inserted node.
//! The search from a root emits a cycle whenever an edge returns to it; the
//! root is then removed and the rest of the component is split again, so
//! later roots only see nodes that can still close a cycle. Each cycle is
//! produced exactly once, with no rotation to deduplicate.
//!
//! Both the component split and the rooted search run on explicit stacks,
//! so a single very long cycle costs heap, not call stack.
//!
//! Output order: components by their earliest node, then cycles by root,
//! then depth-first in successor order.

use crate::graph::Graph;
use crate::paths::NodePath;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Every elementary cycle in `graph`.
///
/// A self-loop yields a single-node cycle `[node]`. The closing edge back to
/// the first node is implicit.
#[must_use]
pub fn simple_cycles(graph: &Graph) -> Vec<NodePath> {
    let mut search = CycleSearch::new(graph);
    let all: Vec<NodeIndex> = graph.inner().node_indices().collect();
    let mut components = search.cyclic_components(&all);
    components.sort_unstable_by_key(|component| component.first().copied());

    let mut found = Vec::new();
    for component in components {
        let mut by_root = Vec::new();
        let mut pending = vec![component];
        while let Some(scope) = pending.pop() {
            let Some((&root, rest)) = scope.split_first() else {
                continue;
            };
            by_root.push((root, search.cycles_through(root, &scope)));
            pending.extend(search.cyclic_components(rest));
        }
        by_root.sort_unstable_by_key(|(root, _)| *root);
        found.extend(by_root.into_iter().flat_map(|(_, cycles)| cycles));
    }

    found.iter().map(|cycle| graph.ids_of(cycle)).collect()
}

/// Scratch state reused across every root of one enumeration.
struct CycleSearch<'g> {
    graph: &'g Graph,
    in_scope: Vec<bool>,
    on_path: Vec<bool>,
}

impl<'g> CycleSearch<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            in_scope: vec![false; graph.node_count()],
            on_path: vec![false; graph.node_count()],
        }
    }

    /// Strongly connected components of the subgraph induced by `nodes`
    /// that contain a cycle, each sorted by insertion order.
    fn cyclic_components(&self, nodes: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
        let mut induced = DiGraph::<NodeIndex, ()>::with_capacity(nodes.len(), nodes.len());
        let local: HashMap<NodeIndex, NodeIndex> = nodes
            .iter()
            .map(|&node| (node, induced.add_node(node)))
            .collect();
        for &node in nodes {
            let Some(&from) = local.get(&node) else {
                continue;
            };
            for next in self.graph.successor_indices(node) {
                if let Some(&to) = local.get(next) {
                    induced.add_edge(from, to, ());
                }
            }
        }

        kosaraju_scc(&induced)
            .into_iter()
            .map(|scc| {
                let mut component: Vec<NodeIndex> = scc.into_iter().map(|i| induced[i]).collect();
                component.sort_unstable();
                component
            })
            .filter(|component| match component.as_slice() {
                [single] => self.graph.successor_indices(*single).contains(single),
                other => !other.is_empty(),
            })
            .collect()
    }

    /// Cycles through `root` whose other nodes all lie in `scope`.
    ///
    /// Successor cursors are kept per path position, so cycles come out in
    /// the same order a recursive search would find them.
    fn cycles_through(&mut self, root: NodeIndex, scope: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
        for node in scope {
            self.in_scope[node.index()] = true;
        }

        let mut found = Vec::new();
        let mut path = vec![root];
        self.on_path[root.index()] = true;
        let mut cursors = vec![self.graph.successor_indices(root).iter()];

        while let Some(cursor) = cursors.last_mut() {
            let Some(&next) = cursor.next() else {
                cursors.pop();
                if let Some(left) = path.pop() {
                    self.on_path[left.index()] = false;
                }
                continue;
            };
            if next == root {
                found.push(path.clone());
                continue;
            }
            if !self.in_scope[next.index()] || self.on_path[next.index()] {
                continue;
            }
            self.on_path[next.index()] = true;
            path.push(next);
            cursors.push(self.graph.successor_indices(next).iter());
        }

        for node in scope {
            self.in_scope[node.index()] = false;
        }
        found
    }
}

/// Which nodes and edges take part in at least one cycle.
///
/// Built for consumers that highlight cyclic structure, such as a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleMembership {
    /// Every elementary cycle, as returned by [`simple_cycles`].
    pub cycles: Vec<NodePath>,
    /// Nodes on at least one cycle.
    pub nodes: BTreeSet<String>,
    /// `(from, to)` edges on at least one cycle, closing edges included.
    pub edges: BTreeSet<(String, String)>,
    /// For each cycle (same order as `cycles`), the edge that returns to its
    /// first node.
    pub closing_edges: Vec<(String, String)>,
}

impl CycleMembership {
    /// Returns `true` if the graph has no cycle at all.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Returns `true` if `id` lies on some cycle.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    /// Returns `true` if the edge `from -> to` lies on some cycle.
    #[must_use]
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edges.contains(&(from.to_string(), to.to_string()))
    }
}

/// Enumerate cycles and summarise the nodes and edges they touch.
#[must_use]
pub fn cycle_membership(graph: &Graph) -> CycleMembership {
    let cycles = simple_cycles(graph);
    let mut membership = CycleMembership::default();

    for cycle in &cycles {
        let (Some(first), Some(last)) = (cycle.first(), cycle.last()) else {
            continue;
        };
        membership.nodes.extend(cycle.iter().cloned());
        for pair in cycle.windows(2) {
            membership.edges.insert((pair[0].clone(), pair[1].clone()));
        }
        let closing = (last.clone(), first.clone());
        membership.edges.insert(closing.clone());
        membership.closing_edges.push(closing);
    }

    membership.cycles = cycles;
    membership
}
