//! Batched query protocol.
//!
//! A batch is an ordered list of descriptors. Each descriptor may carry a
//! `paths` request, a `cheapest` request, or both:
//!
//! ```json
//! {"queries": [
//!     {"paths": {"start": "a", "end": "e"}},
//!     {"cheapest": {"start": "a", "end": "e"}}
//! ]}
//! ```
//!
//! Answers come back in batch order, a descriptor's `paths` answer before
//! its `cheapest` answer:
//!
//! ```json
//! {"answers": [
//!     {"paths": {"from": "a", "to": "e", "paths": [["a", "b", "e"]]}},
//!     {"cheapest": {"from": "a", "to": "e", "path": false}}
//! ]}
//! ```
//!
//! `path: false` (never `null`, never absent) means no cheapest path exists.
//! A batch containing one malformed descriptor fails as a whole.

use crate::cheapest::find_cheapest_path;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::paths::{NodePath, PathLimits, TraversalStrategy, enumerate_paths};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Start and end node identifiers of a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoints {
    /// Start node identifier. Need not exist in the graph.
    pub start: String,
    /// End node identifier. Need not exist in the graph.
    pub end: String,
}

impl Endpoints {
    /// Create a start/end pair.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// One entry of a query batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Enumerate all simple paths between the endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Endpoints>,
    /// Find the least-cost path between the endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheapest: Option<Endpoints>,
}

impl QueryDescriptor {
    /// A descriptor with only a `paths` request.
    pub fn paths(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            paths: Some(Endpoints::new(start, end)),
            cheapest: None,
        }
    }

    /// A descriptor with only a `cheapest` request.
    pub fn cheapest(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            paths: None,
            cheapest: Some(Endpoints::new(start, end)),
        }
    }

    /// Add a `cheapest` request to this descriptor.
    #[must_use]
    pub fn with_cheapest(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.cheapest = Some(Endpoints::new(start, end));
        self
    }

    /// The requests carried by this descriptor, `paths` first.
    pub fn requests(&self) -> impl Iterator<Item = Request<'_>> {
        self.paths
            .iter()
            .map(Request::Paths)
            .chain(self.cheapest.iter().map(Request::Cheapest))
    }
}

/// A single request extracted from a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// All simple paths.
    Paths(&'a Endpoints),
    /// Least-cost path.
    Cheapest(&'a Endpoints),
}

/// Answer to a `paths` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsAnswer {
    /// Start identifier, echoed from the request.
    pub from: String,
    /// End identifier, echoed from the request.
    pub to: String,
    /// Every simple path found; empty when there is none.
    pub paths: Vec<NodePath>,
    /// Set when a path-count bound cut the enumeration short.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

/// Answer to a `cheapest` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheapestAnswer {
    /// Start identifier, echoed from the request.
    pub from: String,
    /// End identifier, echoed from the request.
    pub to: String,
    /// The least-cost path, serialised as `false` when there is none.
    #[serde(with = "path_or_false")]
    pub path: Option<NodePath>,
}

/// One entry of the answer list, mirroring the request kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    /// Answer to a `paths` request.
    Paths(PathsAnswer),
    /// Answer to a `cheapest` request.
    Cheapest(CheapestAnswer),
}

/// A query batch document: `{"queries": [...]}`.
///
/// Descriptors are kept as raw JSON so that shape errors can be reported
/// with their position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryBatch {
    /// Raw descriptors in batch order. A missing field is an empty batch.
    #[serde(default)]
    pub queries: Vec<Value>,
}

impl QueryBatch {
    /// Interpret a parsed batch document.
    ///
    /// The document must be an object; its `queries` member, when present,
    /// must be an array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedBatch`] if the document has the wrong shape.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(Error::MalformedBatch {
                reason: format!("expected an object, found {}", json_kind(&value)),
            });
        };
        match fields.remove("queries") {
            None => Ok(Self::default()),
            Some(Value::Array(queries)) => Ok(Self { queries }),
            Some(other) => Err(Error::MalformedBatch {
                reason: format!("'queries' must be an array, found {}", json_kind(&other)),
            }),
        }
    }

    /// Interpret every raw descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedQuery`] for the first descriptor that does
    /// not have a recognisable shape.
    pub fn descriptors(&self) -> Result<Vec<QueryDescriptor>> {
        parse_queries(&self.queries)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The answer document: `{"answers": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDocument {
    /// Answers in batch order.
    pub answers: Vec<Answer>,
}

/// Interpret raw JSON descriptors.
///
/// A descriptor must be an object carrying a `paths` and/or `cheapest`
/// object with string `start` and `end`. Unknown keys are ignored.
///
/// # Errors
///
/// Returns [`Error::MalformedQuery`] for the first offending descriptor.
pub fn parse_queries(values: &[Value]) -> Result<Vec<QueryDescriptor>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| parse_descriptor(index, value))
        .collect()
}

fn parse_descriptor(index: usize, value: &Value) -> Result<QueryDescriptor> {
    let Value::Object(fields) = value else {
        return Err(Error::malformed(index, "descriptor must be an object"));
    };

    let endpoints = |kind: &str| -> Result<Option<Endpoints>> {
        fields
            .get(kind)
            .map(|request| {
                Endpoints::deserialize(request)
                    .map_err(|e| Error::malformed(index, format!("invalid '{kind}' request: {e}")))
            })
            .transpose()
    };

    let descriptor = QueryDescriptor {
        paths: endpoints("paths")?,
        cheapest: endpoints("cheapest")?,
    };
    if descriptor.paths.is_none() && descriptor.cheapest.is_none() {
        return Err(Error::malformed(
            index,
            "expected a 'paths' or 'cheapest' request",
        ));
    }
    Ok(descriptor)
}

/// How a [`QueryProcessor`] answers requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Traversal used for `paths` requests.
    pub strategy: TraversalStrategy,
    /// Bounds applied to `paths` requests.
    pub limits: PathLimits,
    /// Answer descriptors on the rayon pool.
    pub parallel: bool,
}

/// Answers query batches against one borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct QueryProcessor<'g> {
    graph: &'g Graph,
    options: QueryOptions,
}

impl<'g> QueryProcessor<'g> {
    /// Processor with default options: iterative depth-first, unbounded,
    /// sequential.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            options: QueryOptions::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Answer a single request.
    #[must_use]
    pub fn answer(&self, request: Request<'_>) -> Answer {
        match request {
            Request::Paths(Endpoints { start, end }) => {
                let found = enumerate_paths(
                    self.graph,
                    start,
                    end,
                    self.options.strategy,
                    self.options.limits,
                );
                Answer::Paths(PathsAnswer {
                    from: start.clone(),
                    to: end.clone(),
                    paths: found.paths,
                    truncated: found.truncated,
                })
            }
            Request::Cheapest(Endpoints { start, end }) => Answer::Cheapest(CheapestAnswer {
                from: start.clone(),
                to: end.clone(),
                path: find_cheapest_path(self.graph, start, end),
            }),
        }
    }

    /// Answer every request of one descriptor, `paths` first.
    #[must_use]
    pub fn answer_descriptor(&self, descriptor: &QueryDescriptor) -> Vec<Answer> {
        descriptor.requests().map(|request| self.answer(request)).collect()
    }

    /// Answer a batch in order.
    ///
    /// In parallel mode descriptors are answered concurrently and gathered
    /// by index, so the result is identical to the sequential one.
    #[must_use]
    pub fn process(&self, queries: &[QueryDescriptor]) -> Vec<Answer> {
        if self.options.parallel {
            let per_descriptor: Vec<Vec<Answer>> = queries
                .par_iter()
                .map(|descriptor| self.answer_descriptor(descriptor))
                .collect();
            per_descriptor.into_iter().flatten().collect()
        } else {
            queries
                .iter()
                .flat_map(|descriptor| self.answer_descriptor(descriptor))
                .collect()
        }
    }

    /// Interpret and answer a raw batch document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedQuery`] if any descriptor is malformed; no
    /// partial answer list is produced.
    pub fn process_batch(&self, batch: &QueryBatch) -> Result<AnswerDocument> {
        let descriptors = batch.descriptors()?;
        Ok(AnswerDocument {
            answers: self.process(&descriptors),
        })
    }
}

/// Answer `queries` against `graph` with default options.
#[must_use]
pub fn process(queries: &[QueryDescriptor], graph: &Graph) -> Vec<Answer> {
    QueryProcessor::new(graph).process(queries)
}

/// Interpret raw descriptors and answer them with default options.
///
/// # Errors
///
/// Returns [`Error::MalformedQuery`] if any descriptor is malformed.
pub fn process_values(queries: &[Value], graph: &Graph) -> Result<Vec<Answer>> {
    let descriptors = parse_queries(queries)?;
    Ok(process(&descriptors, graph))
}

/// `Option<NodePath>` as either a JSON array or the literal `false`.
mod path_or_false {
    use crate::paths::NodePath;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub(super) fn serialize<S: Serializer>(
        path: &Option<NodePath>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match path {
            Some(nodes) => nodes.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NodePath>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Path(NodePath),
            Flag(bool),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Path(nodes) => Ok(Some(nodes)),
            Repr::Flag(false) => Ok(None),
            Repr::Flag(true) => Err(D::Error::custom("expected a path or `false`")),
        }
    }
}
