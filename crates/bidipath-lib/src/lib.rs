//! bidipath library entry points.
//!
//! This crate exposes a bidirectional Dijkstra search over weighted directed
//! or undirected multigraphs, a single-direction Dijkstra used as reference,
//! pluggable edge weight policies, loaders for JSON and CSV graph files, and
//! helpers to summarise a planned path. Higher-level consumers (the CLI)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod bidirectional;
pub mod dijkstra;
pub mod error;
mod frontier;
pub mod graph;
pub mod loader;
pub mod output;
pub mod path;
pub mod routing;
pub mod weight;

pub use bidirectional::{bidirectional_dijkstra, BidirectionalSearch};
pub use dijkstra::{dijkstra, single_source_distances};
pub use error::{Error, Result};
pub use graph::{path_graph, Adjacency, Direction, EdgeAttributes, Graph, Vertex};
pub use loader::{graph_from_csv, graph_from_json, load_graph};
pub use output::{PathRenderMode, PathStep, PathSummary};
pub use path::{SearchStats, ShortestPath};
pub use routing::{fuzzy_vertex_matches, plan_path, PathAlgorithm, PathPlan, PathRequest};
pub use weight::{edge_cost, AttributeWeight, WeightFn, DEFAULT_EDGE_COST, DEFAULT_WEIGHT_KEY};
