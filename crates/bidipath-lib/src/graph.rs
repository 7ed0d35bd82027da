use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bounds every vertex identifier must satisfy.
///
/// The engine treats vertices as opaque tokens: it only hashes, compares and
/// clones them. Error messages and log fields use the `Debug` form.
pub trait Vertex: Clone + Eq + Hash + fmt::Debug {}

impl<T> Vertex for T where T: Clone + Eq + Hash + fmt::Debug {}

/// Neighbour view of a single vertex: each neighbour maps to the attribute
/// bags of all parallel edges joining the two vertices.
pub type Adjacency<V> = IndexMap<V, Vec<EdgeAttributes>>;

/// Expansion direction of one half of a bidirectional search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Expanding from the source along outgoing edges.
    Forward,
    /// Expanding from the target along incoming edges.
    Backward,
}

impl Direction {
    /// The other half of the search.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Stable slot for per-direction state stored in `[T; 2]`.
    pub fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        };
        f.write_str(value)
    }
}

/// Attribute bag carried by an edge. Opaque to the search engine; only weight
/// functions look inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeAttributes(Map<String, Value>);

impl EdgeAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute bag holding a single numeric `weight` entry.
    pub fn weighted(weight: f64) -> Self {
        Self::new().with("weight", weight)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric value stored under `key`, if present and numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }
}

impl From<Map<String, Value>> for EdgeAttributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Directed or undirected multigraph consumed read-only by the search
/// algorithms.
///
/// Adjacency preserves insertion order, so neighbour iteration (and with it
/// tie-breaking between equal-cost paths) is reproducible.
#[derive(Debug, Clone)]
pub struct Graph<V: Vertex> {
    directed: bool,
    successors: IndexMap<V, Adjacency<V>>,
    predecessors: IndexMap<V, Adjacency<V>>,
    edge_count: usize,
}

impl<V: Vertex> Graph<V> {
    /// Create an empty directed graph.
    pub fn directed() -> Self {
        Self::with_directedness(true)
    }

    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self::with_directedness(false)
    }

    pub fn with_directedness(directed: bool) -> Self {
        Self {
            directed,
            successors: IndexMap::new(),
            predecessors: IndexMap::new(),
            edge_count: 0,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Insert a vertex with no edges. Existing vertices are left untouched.
    pub fn add_vertex(&mut self, vertex: V) {
        if self.directed {
            self.predecessors.entry(vertex.clone()).or_default();
        }
        self.successors.entry(vertex).or_default();
    }

    /// Insert an edge, adding both endpoints when missing. Parallel edges are
    /// kept side by side rather than merged.
    pub fn add_edge(&mut self, tail: V, head: V, attributes: EdgeAttributes) {
        self.add_vertex(tail.clone());
        self.add_vertex(head.clone());

        if self.directed {
            push_parallel(&mut self.predecessors, &head, tail.clone(), attributes.clone());
        } else if tail != head {
            push_parallel(&mut self.successors, &head, tail.clone(), attributes.clone());
        }
        push_parallel(&mut self.successors, &tail, head, attributes);
        self.edge_count += 1;
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.successors.contains_key(vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.successors.len()
    }

    /// Number of edges inserted, counting parallel edges individually.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.successors.keys()
    }

    /// Neighbour view of `vertex` for a search expanding in `direction`.
    ///
    /// Directed graphs expose successors going forward and predecessors going
    /// backward; undirected graphs expose the same symmetric adjacency both
    /// ways. Returns `None` when the vertex is not in the graph.
    pub fn neighbours(&self, vertex: &V, direction: Direction) -> Option<&Adjacency<V>> {
        match (self.directed, direction) {
            (true, Direction::Backward) => self.predecessors.get(vertex),
            _ => self.successors.get(vertex),
        }
    }
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::undirected()
    }
}

fn push_parallel<V: Vertex>(
    table: &mut IndexMap<V, Adjacency<V>>,
    from: &V,
    to: V,
    attributes: EdgeAttributes,
) {
    if let Some(adjacency) = table.get_mut(from) {
        adjacency.entry(to).or_default().push(attributes);
    }
}

/// Build the path graph `0 - 1 - ... - (n-1)` with attribute-free edges.
pub fn path_graph(n: usize, directed: bool) -> Graph<usize> {
    let mut graph = Graph::with_directedness(directed);
    for vertex in 0..n {
        graph.add_vertex(vertex);
    }
    for vertex in 1..n {
        graph.add_edge(vertex - 1, vertex, EdgeAttributes::new());
    }
    graph
}
