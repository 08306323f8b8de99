//! Simple-path enumeration between two nodes.
//!
//! Three traversal strategies produce the same *set* of simple paths:
//!
//! | Strategy | Frontier | Emission order |
//! |----------|----------|----------------|
//! | [`TraversalStrategy::DepthFirst`] | call stack | successor order, branch by branch |
//! | [`TraversalStrategy::DepthFirstIterative`] | explicit stack of successor cursors | identical to `DepthFirst` |
//! | [`TraversalStrategy::BreadthFirst`] | FIFO queue of partial paths | non-decreasing edge count |
//!
//! The iterative depth-first variant keeps one cursor per path position and
//! advances the top cursor, so siblings are expanded in successor order just
//! like the recursive variant. Breadth-first order differs from both; that is
//! expected and not a bug.
//!
//! The recursive variant uses one stack frame per path node, so a long chain
//! can exhaust the thread stack. The default strategy is therefore the
//! iterative one; [`dfs_paths`] remains for callers on small graphs.
//!
//! A path is emitted as soon as the frontier reaches `end` and is never
//! extended past it. A node already on the current path is never revisited,
//! which keeps every path simple and guarantees termination on cyclic graphs.
//! The worst case is exponential; [`PathLimits`] lets callers bound it.

use crate::graph::Graph;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A path as a sequence of node identifiers.
pub type NodePath = Vec<String>;

/// Traversal used to enumerate simple paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalStrategy {
    /// Recursive depth-first search.
    #[serde(alias = "dfs")]
    DepthFirst,
    /// Depth-first search driven by an explicit stack.
    #[default]
    #[serde(alias = "dfs-iterative")]
    DepthFirstIterative,
    /// Breadth-first search over partial paths.
    #[serde(alias = "bfs")]
    BreadthFirst,
}

/// Optional bounds on path enumeration. The default is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLimits {
    /// Maximum number of edges in an emitted path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Stop after this many paths have been emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,
}

impl PathLimits {
    /// No bounds.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether a path with `nodes` nodes may grow by one more edge.
    fn allows_extension(&self, nodes: usize) -> bool {
        self.max_depth.is_none_or(|depth| nodes <= depth)
    }
}

/// Paths found by [`enumerate_paths`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    /// Emitted paths, in the strategy's emission order.
    pub paths: Vec<NodePath>,
    /// `true` if `max_paths` stopped the enumeration while more paths
    /// remained.
    pub truncated: bool,
}

impl PathSet {
    /// Number of paths found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no path was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// All simple paths from `start` to `end` in depth-first order.
///
/// Same paths and order as [`dfs_paths`], without recursion.
#[must_use]
pub fn all_simple_paths(graph: &Graph, start: &str, end: &str) -> Vec<NodePath> {
    dfs_paths_iterative(graph, start, end)
}

/// All simple paths using recursive depth-first search.
///
/// Recursion depth equals the longest explored path.
#[must_use]
pub fn dfs_paths(graph: &Graph, start: &str, end: &str) -> Vec<NodePath> {
    enumerate_paths(graph, start, end, TraversalStrategy::DepthFirst, PathLimits::unbounded()).paths
}

/// All simple paths using iterative depth-first search.
///
/// Emits paths in the same order as [`dfs_paths`].
#[must_use]
pub fn dfs_paths_iterative(graph: &Graph, start: &str, end: &str) -> Vec<NodePath> {
    enumerate_paths(
        graph,
        start,
        end,
        TraversalStrategy::DepthFirstIterative,
        PathLimits::unbounded(),
    )
    .paths
}

/// All simple paths using breadth-first search, shortest (by edge count)
/// first.
#[must_use]
pub fn bfs_paths(graph: &Graph, start: &str, end: &str) -> Vec<NodePath> {
    enumerate_paths(graph, start, end, TraversalStrategy::BreadthFirst, PathLimits::unbounded())
        .paths
}

/// Enumerate simple paths from `start` to `end` with the given strategy and
/// bounds.
///
/// Unknown endpoints yield an empty set. `start == end` yields the single
/// zero-edge path `[start]`.
#[must_use]
pub fn enumerate_paths(
    graph: &Graph,
    start: &str,
    end: &str,
    strategy: TraversalStrategy,
    limits: PathLimits,
) -> PathSet {
    let (Some(source), Some(target)) = (graph.index_of(start), graph.index_of(end)) else {
        return PathSet::default();
    };

    let mut search = Search::new(graph, target, limits);
    match strategy {
        TraversalStrategy::DepthFirst => {
            let mut path = vec![source];
            let mut on_path = vec![false; graph.node_count()];
            on_path[source.index()] = true;
            search.depth_first(source, &mut path, &mut on_path);
        }
        TraversalStrategy::DepthFirstIterative => search.depth_first_iterative(source),
        TraversalStrategy::BreadthFirst => search.breadth_first(source),
    }

    PathSet {
        paths: search.found.iter().map(|p| graph.ids_of(p)).collect(),
        truncated: search.truncated,
    }
}

/// Enumeration state shared by all strategies.
struct Search<'g> {
    graph: &'g Graph,
    target: NodeIndex,
    limits: PathLimits,
    found: Vec<Vec<NodeIndex>>,
    truncated: bool,
}

impl<'g> Search<'g> {
    fn new(graph: &'g Graph, target: NodeIndex, limits: PathLimits) -> Self {
        Self {
            graph,
            target,
            limits,
            found: Vec::new(),
            truncated: false,
        }
    }

    /// Record a complete path, or mark truncation if the budget is spent.
    fn record(&mut self, path: &[NodeIndex]) {
        if self
            .limits
            .max_paths
            .is_some_and(|max| self.found.len() >= max)
        {
            self.truncated = true;
        } else {
            self.found.push(path.to_vec());
        }
    }

    fn children(&self, node: NodeIndex, path_len: usize) -> &'g [NodeIndex] {
        if self.limits.allows_extension(path_len) {
            self.graph.successor_indices(node)
        } else {
            &[]
        }
    }

    fn depth_first(&mut self, current: NodeIndex, path: &mut Vec<NodeIndex>, on_path: &mut [bool]) {
        if current == self.target {
            self.record(path);
            return;
        }

        for &next in self.children(current, path.len()) {
            if self.truncated {
                return;
            }
            if on_path[next.index()] {
                continue;
            }
            path.push(next);
            on_path[next.index()] = true;
            self.depth_first(next, path, on_path);
            on_path[next.index()] = false;
            path.pop();
        }
    }

    fn depth_first_iterative(&mut self, source: NodeIndex) {
        let mut path = vec![source];
        if source == self.target {
            self.record(&path);
            return;
        }

        let mut on_path = vec![false; self.graph.node_count()];
        on_path[source.index()] = true;
        let mut cursors = vec![self.children(source, path.len()).iter()];

        while let Some(cursor) = cursors.last_mut() {
            if self.truncated {
                break;
            }
            let Some(&next) = cursor.next() else {
                cursors.pop();
                if let Some(left) = path.pop() {
                    on_path[left.index()] = false;
                }
                continue;
            };
            if on_path[next.index()] {
                continue;
            }

            path.push(next);
            if next == self.target {
                self.record(&path);
                path.pop();
                continue;
            }
            on_path[next.index()] = true;
            cursors.push(self.children(next, path.len()).iter());
        }
    }

    fn breadth_first(&mut self, source: NodeIndex) {
        let mut queue = VecDeque::from([vec![source]]);

        while let Some(path) = queue.pop_front() {
            if self.truncated {
                break;
            }
            let Some(&current) = path.last() else {
                continue;
            };
            if current == self.target {
                self.record(&path);
                continue;
            }

            for &next in self.children(current, path.len()) {
                if path.contains(&next) {
                    continue;
                }
                let mut extended = Vec::with_capacity(path.len() + 1);
                extended.extend_from_slice(&path);
                extended.push(next);
                queue.push_back(extended);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{LONG_RING, path, ring_graph, sample_graph};
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn dfs_finds_both_routes_to_e() {
        let graph = sample_graph();

        assert_eq!(
            dfs_paths(&graph, "a", "e"),
            vec![path(&["a", "b", "c", "d", "e"]), path(&["a", "b", "e"])]
        );
    }

    #[test]
    fn iterative_dfs_matches_recursive_order() {
        let graph = sample_graph();

        assert_eq!(
            dfs_paths_iterative(&graph, "a", "e"),
            dfs_paths(&graph, "a", "e")
        );
        assert_eq!(
            dfs_paths_iterative(&graph, "b", "a"),
            dfs_paths(&graph, "b", "a")
        );
    }

    #[test]
    fn bfs_emits_shorter_paths_first() {
        let graph = sample_graph();

        assert_eq!(
            bfs_paths(&graph, "a", "e"),
            vec![path(&["a", "b", "e"]), path(&["a", "b", "c", "d", "e"])]
        );
    }

    #[rstest]
    #[case::main_loop("a", "e")]
    #[case::back_edge("b", "a")]
    #[case::into_two_cycle("a", "j")]
    #[case::tail("c", "n")]
    fn strategies_agree_on_the_set(#[case] start: &str, #[case] end: &str) {
        let graph = sample_graph();

        let dfs: HashSet<_> = dfs_paths(&graph, start, end).into_iter().collect();
        let iterative: HashSet<_> = dfs_paths_iterative(&graph, start, end).into_iter().collect();
        let bfs: HashSet<_> = bfs_paths(&graph, start, end).into_iter().collect();

        assert!(!dfs.is_empty());
        assert_eq!(dfs, iterative);
        assert_eq!(dfs, bfs);
    }

    #[rstest]
    #[case::recursive(TraversalStrategy::DepthFirst)]
    #[case::iterative(TraversalStrategy::DepthFirstIterative)]
    #[case::breadth(TraversalStrategy::BreadthFirst)]
    fn start_equals_end_is_a_trivial_path(#[case] strategy: TraversalStrategy) {
        let graph = sample_graph();

        let found = enumerate_paths(&graph, "g", "g", strategy, PathLimits::unbounded());
        assert_eq!(found.paths, vec![path(&["g"])]);
    }

    #[rstest]
    #[case::recursive(TraversalStrategy::DepthFirst)]
    #[case::iterative(TraversalStrategy::DepthFirstIterative)]
    #[case::breadth(TraversalStrategy::BreadthFirst)]
    fn unknown_or_unreachable_endpoints_are_empty(#[case] strategy: TraversalStrategy) {
        let graph = sample_graph();
        let limits = PathLimits::unbounded();

        assert!(enumerate_paths(&graph, "f", "g", strategy, limits).is_empty());
        assert!(enumerate_paths(&graph, "h", "a", strategy, limits).is_empty());
        assert!(enumerate_paths(&graph, "zz", "a", strategy, limits).is_empty());
        assert!(enumerate_paths(&graph, "a", "zz", strategy, limits).is_empty());
    }

    #[test]
    fn paths_never_repeat_a_node() {
        let graph = sample_graph();

        for found in dfs_paths(&graph, "a", "j") {
            let unique: HashSet<_> = found.iter().collect();
            assert_eq!(unique.len(), found.len(), "repeated node in {found:?}");
        }
    }

    #[test]
    fn max_depth_drops_long_paths() {
        let graph = sample_graph();
        let limits = PathLimits {
            max_depth: Some(2),
            max_paths: None,
        };

        for strategy in [
            TraversalStrategy::DepthFirst,
            TraversalStrategy::DepthFirstIterative,
            TraversalStrategy::BreadthFirst,
        ] {
            let found = enumerate_paths(&graph, "a", "e", strategy, limits);
            assert_eq!(found.paths, vec![path(&["a", "b", "e"])], "{strategy:?}");
            assert!(!found.truncated);
        }
    }

    #[test]
    fn max_paths_truncates_and_reports_it() {
        let graph = sample_graph();
        let limits = PathLimits {
            max_depth: None,
            max_paths: Some(1),
        };

        let found = enumerate_paths(&graph, "a", "e", TraversalStrategy::DepthFirst, limits);
        assert_eq!(found.paths, vec![path(&["a", "b", "c", "d", "e"])]);
        assert!(found.truncated);

        let found = enumerate_paths(&graph, "a", "e", TraversalStrategy::BreadthFirst, limits);
        assert_eq!(found.paths, vec![path(&["a", "b", "e"])]);
        assert!(found.truncated);
    }

    #[test]
    fn max_paths_equal_to_total_is_not_truncated() {
        let graph = sample_graph();
        let limits = PathLimits {
            max_depth: None,
            max_paths: Some(2),
        };

        let found = enumerate_paths(&graph, "a", "e", TraversalStrategy::DepthFirstIterative, limits);
        assert_eq!(found.len(), 2);
        assert!(!found.truncated);
    }

    #[test]
    fn strategy_deserializes_from_short_names() {
        let dfs: TraversalStrategy = serde_json::from_str("\"dfs\"").unwrap();
        let bfs: TraversalStrategy = serde_json::from_str("\"breadth-first\"").unwrap();

        assert_eq!(dfs, TraversalStrategy::DepthFirst);
        assert_eq!(bfs, TraversalStrategy::BreadthFirst);
    }

    #[test]
    fn default_enumeration_walks_a_long_ring() {
        let graph = ring_graph(LONG_RING);
        let last = format!("v{}", LONG_RING - 1);

        let found = all_simple_paths(&graph, "v0", &last);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len(), LONG_RING);
        assert_eq!(found[0].last(), Some(&last));

        let by_default = enumerate_paths(
            &graph,
            "v0",
            &last,
            TraversalStrategy::default(),
            PathLimits::unbounded(),
        );
        assert_eq!(by_default.paths, found);
    }
}
