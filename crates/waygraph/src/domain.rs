//! Graph documents and the flat records they are stored as.
//!
//! A [`GraphDocument`] is the unit of ingestion: a named graph with its node
//! and edge records. Once validated, its records are upserted into a
//! [`RecordStore`](crate::storage::RecordStore) and the queryable graph is
//! rebuilt from the store.

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;
use waygraph_core::{Graph, Node, WeightedEdge};

/// A stored node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique node identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A stored directed edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Unique edge identifier.
    pub id: String,
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Non-negative traversal cost.
    pub cost: f64,
}

/// Keyed records that can be upserted by identifier.
pub trait Record {
    /// The record's identifier.
    fn key(&self) -> &str;
}

impl Record for NodeRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for EdgeRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Counts reported by an upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    /// Records with a new identifier.
    pub inserted: usize,
    /// Records that replaced an existing identifier.
    pub updated: usize,
}

impl std::ops::AddAssign for UpsertSummary {
    fn add_assign(&mut self, other: Self) {
        self.inserted += other.inserted;
        self.updated += other.updated;
    }
}

/// Upsert `incoming` into `existing` by key.
///
/// A record whose key is already present replaces it in place; new keys are
/// appended in arrival order. A key repeated within `incoming` is appended
/// once and then updated.
pub fn upsert<R: Record + Clone>(existing: &mut Vec<R>, incoming: &[R]) -> UpsertSummary {
    let mut positions: HashMap<String, usize> = existing
        .iter()
        .enumerate()
        .map(|(position, record)| (record.key().to_string(), position))
        .collect();

    let mut summary = UpsertSummary::default();
    for record in incoming {
        if let Some(&position) = positions.get(record.key()) {
            existing[position] = record.clone();
            summary.updated += 1;
        } else {
            positions.insert(record.key().to_string(), existing.len());
            existing.push(record.clone());
            summary.inserted += 1;
        }
    }
    summary
}

/// A complete graph definition as submitted for loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Graph identifier.
    pub id: String,
    /// Graph name.
    pub name: String,
    /// Node definitions.
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    /// Edge definitions.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the text is not a graph document and
    /// `Error::Validation` if the document is structurally invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Check the document's structural rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingGraphId);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingGraphName);
        }
        if self.nodes.is_empty() {
            return Err(ValidationError::NoNodes);
        }

        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for (position, node) in self.nodes.iter().enumerate() {
            if node.id.is_empty() {
                return Err(ValidationError::EmptyNodeId(position));
            }
            if !node_ids.insert(node.id.as_str()) {
                return Err(ValidationError::DuplicateNode(node.id.clone()));
            }
        }

        let mut edge_ids = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(ValidationError::DuplicateEdge(edge.id.clone()));
            }
            for endpoint in [&edge.from, &edge.to] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(ValidationError::UnknownNode {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
            if !edge.cost.is_finite() || edge.cost < 0.0 {
                return Err(ValidationError::InvalidCost {
                    edge: edge.id.clone(),
                    cost: edge.cost,
                });
            }
        }

        Ok(())
    }

    /// Build the queryable graph directly from this document's records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Graph` if an edge references an unknown node, which
    /// cannot happen for a validated document.
    pub fn to_graph(&self) -> Result<Graph> {
        let graph = Graph::build(
            self.nodes.iter().map(|n| Node::new(&n.id, &n.name)),
            self.edges
                .iter()
                .map(|e| WeightedEdge::new(&e.from, &e.to, e.cost)),
        )?;
        Ok(graph)
    }
}

/// Read, parse and validate a graph document from disk.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, otherwise the errors of
/// [`GraphDocument::from_json_str`].
pub async fn load_document(path: &Path) -> Result<GraphDocument> {
    let content = fs::read_to_string(path).await?;
    GraphDocument::from_json_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rstest::rstest;

    fn node(id: &str) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
        }
    }

    fn edge(id: &str, from: &str, to: &str, cost: f64) -> EdgeRecord {
        EdgeRecord {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            cost,
        }
    }

    fn document() -> GraphDocument {
        GraphDocument {
            id: "g0".to_string(),
            name: "Sample".to_string(),
            nodes: vec![node("a"), node("b"), node("c")],
            edges: vec![edge("e1", "a", "b", 1.5), edge("e2", "b", "c", 0.0)],
        }
    }

    #[test]
    fn valid_document_passes() {
        assert_eq!(document().validate(), Ok(()));
    }

    #[test]
    fn edgeless_document_is_valid() {
        let mut doc = document();
        doc.edges.clear();
        assert_eq!(doc.validate(), Ok(()));
    }

    #[rstest]
    #[case::missing_id(|d: &mut GraphDocument| d.id.clear(), ValidationError::MissingGraphId)]
    #[case::missing_name(|d: &mut GraphDocument| d.name = "  ".into(), ValidationError::MissingGraphName)]
    #[case::no_nodes(|d: &mut GraphDocument| d.nodes.clear(), ValidationError::NoNodes)]
    #[case::empty_node_id(|d: &mut GraphDocument| d.nodes[1].id.clear(), ValidationError::EmptyNodeId(1))]
    #[case::duplicate_node(|d: &mut GraphDocument| d.nodes.push(node("a")), ValidationError::DuplicateNode("a".into()))]
    #[case::duplicate_edge(
        |d: &mut GraphDocument| d.edges.push(edge("e1", "c", "a", 1.0)),
        ValidationError::DuplicateEdge("e1".into())
    )]
    #[case::unknown_target(
        |d: &mut GraphDocument| d.edges.push(edge("e3", "c", "z", 1.0)),
        ValidationError::UnknownNode { edge: "e3".into(), node: "z".into() }
    )]
    #[case::unknown_source(
        |d: &mut GraphDocument| d.edges.push(edge("e3", "y", "a", 1.0)),
        ValidationError::UnknownNode { edge: "e3".into(), node: "y".into() }
    )]
    #[case::negative_cost(
        |d: &mut GraphDocument| d.edges[0].cost = -0.5,
        ValidationError::InvalidCost { edge: "e1".into(), cost: -0.5 }
    )]
    fn invalid_documents_are_rejected(
        #[case] mutate: fn(&mut GraphDocument),
        #[case] expected: ValidationError,
    ) {
        let mut doc = document();
        mutate(&mut doc);
        assert_eq!(doc.validate(), Err(expected));
    }

    #[test]
    fn non_finite_cost_is_rejected() {
        let mut doc = document();
        doc.edges[1].cost = f64::INFINITY;
        assert!(matches!(
            doc.validate(),
            Err(ValidationError::InvalidCost { ref edge, .. }) if edge == "e2"
        ));
    }

    #[test]
    fn parses_json_documents() {
        let json = r#"{
            "id": "g1",
            "name": "Tiny",
            "nodes": [{"id": "a", "name": "A"}, {"id": "b", "name": "B"}],
            "edges": [{"id": "e1", "from": "a", "to": "b", "cost": 2}]
        }"#;

        let doc = GraphDocument::from_json_str(json).unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert!((doc.edges[0].cost - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_json_and_invalid_graphs_are_distinguished() {
        assert!(matches!(
            GraphDocument::from_json_str("{not json"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            GraphDocument::from_json_str(r#"{"id": "g", "name": "n", "nodes": []}"#),
            Err(Error::Validation(ValidationError::NoNodes))
        ));
    }

    #[test]
    fn document_builds_its_graph() {
        let graph = document().to_graph().unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.weight("a", "b"), Some(1.5));
        assert_eq!(graph.node("c").map(|n| n.name.as_str()), Some("C"));
    }

    #[test]
    fn upsert_updates_in_place_and_appends() {
        let mut nodes = vec![node("a"), node("b")];
        let incoming = vec![
            NodeRecord {
                id: "a".to_string(),
                name: "Renamed".to_string(),
            },
            node("c"),
        ];

        assert_eq!(
            upsert(&mut nodes, &incoming),
            UpsertSummary {
                inserted: 1,
                updated: 1
            }
        );
        let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(nodes[0].name, "Renamed");
    }

    #[test]
    fn upsert_handles_repeated_and_new_ids_in_one_batch() {
        let mut nodes = vec![node("a"), node("b")];
        let renamed = |id: &str, name: &str| NodeRecord {
            id: id.to_string(),
            name: name.to_string(),
        };
        let incoming = vec![
            renamed("c", "first"),
            renamed("b", "B2"),
            renamed("c", "second"),
            node("d"),
            renamed("b", "B3"),
        ];

        assert_eq!(
            upsert(&mut nodes, &incoming),
            UpsertSummary {
                inserted: 2,
                updated: 3
            }
        );
        let names: Vec<_> = nodes
            .iter()
            .map(|n| (n.id.as_str(), n.name.as_str()))
            .collect();
        assert_eq!(names, [("a", "A"), ("b", "B3"), ("c", "second"), ("d", "D")]);
    }

    #[test]
    fn upsert_scales_to_large_batches() {
        let batch: Vec<NodeRecord> = (0..100_000).map(|i| node(&format!("n{i}"))).collect();
        let mut nodes = Vec::new();

        assert_eq!(upsert(&mut nodes, &batch).inserted, 100_000);
        let again = upsert(&mut nodes, &batch);
        assert_eq!(again.updated, 100_000);
        assert_eq!(again.inserted, 0);
        assert_eq!(nodes.len(), 100_000);
        assert_eq!(nodes[99_999].id, "n99999");
    }
}
