//! Graph file loaders.
//!
//! Two formats are understood:
//!
//! - JSON documents of the form
//!   `{"directed": true, "vertices": ["a"], "edges": [{"source": "a", "target": "b", "attributes": {"weight": 2}}]}`.
//!   Vertex identifiers may be strings or integers; `vertices` lists isolated
//!   vertices and may be omitted.
//! - CSV edge lists with a `source,target` header followed by any number of
//!   attribute columns. Numeric cells become numbers, other cells strings,
//!   and empty cells are left out of the attribute bag.
//!
//! Both formats produce a `Graph<String>`.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{EdgeAttributes, Graph};

#[derive(Debug, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    vertices: Vec<Value>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    source: Value,
    target: Value,
    #[serde(default)]
    attributes: EdgeAttributes,
}

/// Load a graph from `path`, choosing the format from the file extension.
///
/// `directed` overrides the directedness recorded in the file (JSON) or the
/// undirected default (CSV).
pub fn load_graph(path: &Path, directed: Option<bool>) -> Result<Graph<String>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let file = match extension.as_deref() {
        Some("json") | Some("csv") => fs::File::open(path)?,
        _ => {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let graph = match extension.as_deref() {
        Some("csv") => graph_from_csv(file, directed.unwrap_or(false))?,
        _ => graph_from_json(file, directed)?,
    };

    debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "loaded graph"
    );
    Ok(graph)
}

/// Parse a JSON graph document.
pub fn graph_from_json<R: Read>(reader: R, directed: Option<bool>) -> Result<Graph<String>> {
    let document: GraphDocument = serde_json::from_reader(reader)?;
    let mut graph = Graph::with_directedness(directed.unwrap_or(document.directed));

    for vertex in &document.vertices {
        graph.add_vertex(vertex_name(vertex)?);
    }
    for edge in document.edges {
        let tail = vertex_name(&edge.source)?;
        let head = vertex_name(&edge.target)?;
        graph.add_edge(tail, head, edge.attributes);
    }

    Ok(graph)
}

/// Parse a CSV edge list.
pub fn graph_from_csv<R: Read>(reader: R, directed: bool) -> Result<Graph<String>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::InvalidGraph {
                message: format!(
                    "edge list missing required column '{name}'. Available: {}",
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            })
    };
    let source_column = column("source")?;
    let target_column = column("target")?;

    let mut graph = Graph::with_directedness(directed);
    for record in csv_reader.records() {
        let record = record?;
        let tail = required_cell(&record, source_column)?;
        let head = required_cell(&record, target_column)?;

        let mut attributes = EdgeAttributes::new();
        for (index, (header, cell)) in headers.iter().zip(record.iter()).enumerate() {
            if index == source_column || index == target_column || cell.is_empty() {
                continue;
            }
            attributes.insert(header.trim(), cell_value(cell));
        }
        graph.add_edge(tail, head, attributes);
    }

    Ok(graph)
}

fn vertex_name(value: &Value) -> Result<String> {
    let name = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) if number.is_i64() || number.is_u64() => number.to_string(),
        other => {
            return Err(Error::InvalidGraph {
                message: format!("vertex identifiers must be strings or integers, found {other}"),
            })
        }
    };

    if name.is_empty() {
        return Err(Error::InvalidGraph {
            message: "vertex identifiers must not be empty".to_string(),
        });
    }
    Ok(name)
}

fn required_cell(record: &StringRecord, column: usize) -> Result<String> {
    match record.get(column) {
        Some(cell) if !cell.is_empty() => Ok(cell.to_string()),
        _ => {
            let line = record.position().map(|position| position.line()).unwrap_or_default();
            Err(Error::InvalidGraph {
                message: format!("edge on line {line} is missing an endpoint"),
            })
        }
    }
}

fn cell_value(cell: &str) -> Value {
    if let Ok(integer) = cell.parse::<i64>() {
        return Value::from(integer);
    }
    cell.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}
