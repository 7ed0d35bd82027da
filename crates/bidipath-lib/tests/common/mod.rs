//! Common test utilities and fixture helpers.
//!
//! Provides the checked-in road network fixture, temporary graph files, and
//! small graph builders shared by the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use bidipath_lib::{load_graph, EdgeAttributes, Graph};
use tempfile::TempDir;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the small undirected road network fixture.
#[allow(dead_code)]
pub fn road_fixture_path() -> PathBuf {
    fixtures_dir().join("ballerup_roads.json")
}

/// Load the road network fixture.
#[allow(dead_code)]
pub fn road_fixture() -> Graph<String> {
    load_graph(&road_fixture_path(), None).expect("road fixture loads")
}

/// Temporary directory holding graph files written by a test.
#[allow(dead_code)]
pub struct GraphFileEnv {
    _temp_dir: TempDir,
    dir: PathBuf,
}

#[allow(dead_code)]
impl GraphFileEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            dir,
        }
    }

    /// Write `contents` to `name` inside the temp directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(name);
        fs::write(&path, contents).expect("write graph file");
        path
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

/// Build a graph from `(tail, head, weight)` triples.
#[allow(dead_code)]
pub fn weighted_graph<V>(directed: bool, edges: &[(V, V, f64)]) -> Graph<V>
where
    V: bidipath_lib::Vertex,
{
    let mut graph = Graph::with_directedness(directed);
    for (tail, head, weight) in edges {
        graph.add_edge(tail.clone(), head.clone(), EdgeAttributes::weighted(*weight));
    }
    graph
}

/// Undirected `width x height` grid with vertex `y * width + x`. Edge
/// weights follow a fixed pattern, so several equal-cost routes exist
/// between opposite corners.
#[allow(dead_code)]
pub fn grid_graph(width: usize, height: usize) -> Graph<usize> {
    let mut graph = Graph::undirected();
    for y in 0..height {
        for x in 0..width {
            let vertex = y * width + x;
            graph.add_vertex(vertex);
            let weight = ((x * 7 + y * 3) % 5 + 1) as f64;
            if x + 1 < width {
                graph.add_edge(vertex, vertex + 1, EdgeAttributes::weighted(weight));
            }
            if y + 1 < height {
                graph.add_edge(vertex, vertex + width, EdgeAttributes::weighted(weight));
            }
        }
    }
    graph
}
