use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::bidirectional::bidirectional_dijkstra;
use crate::dijkstra::dijkstra;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::path::{SearchStats, ShortestPath};
use crate::weight::{AttributeWeight, DEFAULT_WEIGHT_KEY};

/// Minimum Jaro-Winkler similarity for a vertex name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Number of suggestions attached to an unknown-vertex error.
const MAX_SUGGESTIONS: usize = 3;

/// Supported shortest-path algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    /// Bidirectional Dijkstra (two frontiers).
    #[default]
    Bidirectional,
    /// Classic single-frontier Dijkstra.
    Dijkstra,
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathAlgorithm::Bidirectional => "bidirectional",
            PathAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

impl FromStr for PathAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bidirectional" | "bidi" => Ok(PathAlgorithm::Bidirectional),
            "dijkstra" => Ok(PathAlgorithm::Dijkstra),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// High-level shortest-path request against a graph with named vertices.
#[derive(Debug, Clone)]
pub struct PathRequest {
    pub source: String,
    pub target: String,
    pub algorithm: PathAlgorithm,
    /// Edge attribute holding the cost; edges without it cost 1.
    pub weight_key: String,
}

impl PathRequest {
    /// Convenience constructor for a bidirectional query on the `weight`
    /// attribute.
    pub fn bidirectional(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            algorithm: PathAlgorithm::Bidirectional,
            weight_key: DEFAULT_WEIGHT_KEY.to_string(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: PathAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_weight_key(mut self, key: impl Into<String>) -> Self {
        self.weight_key = key.into();
        self
    }
}

/// Planned path returned by [`plan_path`].
#[derive(Debug, Clone, Serialize)]
pub struct PathPlan {
    pub algorithm: PathAlgorithm,
    pub source: String,
    pub target: String,
    pub distance: f64,
    pub steps: Vec<String>,
    /// Edge attribute the distance was measured with.
    pub weight_key: String,
    pub stats: SearchStats,
}

impl PathPlan {
    /// Number of edges in the path.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Resolve the request's vertices and run the requested algorithm.
pub fn plan_path(graph: &Graph<String>, request: &PathRequest) -> Result<PathPlan> {
    let source = resolve_vertex(graph, &request.source)?;
    let target = resolve_vertex(graph, &request.target)?;
    let weight = AttributeWeight::new(&request.weight_key);

    let result = match request.algorithm {
        PathAlgorithm::Bidirectional => bidirectional_dijkstra(graph, &source, &target, &weight),
        PathAlgorithm::Dijkstra => dijkstra(graph, &source, &target, &weight),
    };
    let ShortestPath {
        distance,
        path,
        stats,
    } = result.map_err(|error| match error {
        Error::NoPathExists { .. } => Error::NoPathExists {
            from: source.clone(),
            to: target.clone(),
        },
        other => other,
    })?;

    info!(
        algorithm = %request.algorithm,
        %source,
        %target,
        weight_key = weight.key(),
        distance,
        hops = path.len().saturating_sub(1),
        settled = stats.settled(),
        "planned path"
    );

    Ok(PathPlan {
        algorithm: request.algorithm,
        source,
        target,
        distance,
        steps: path,
        weight_key: request.weight_key.clone(),
        stats,
    })
}

/// Vertex names similar to `name`, best match first.
pub fn fuzzy_vertex_matches(graph: &Graph<String>, name: &str, limit: usize) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = graph
        .vertices()
        .map(|vertex| (strsim::jaro_winkler(name, vertex), vertex))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, vertex)| vertex.clone())
        .collect()
}

fn resolve_vertex(graph: &Graph<String>, name: &str) -> Result<String> {
    let name = name.to_string();
    if graph.contains(&name) {
        return Ok(name);
    }
    let suggestions = fuzzy_vertex_matches(graph, &name, MAX_SUGGESTIONS);
    Err(Error::VertexNotFound {
        vertex: name,
        suggestions,
    })
}
