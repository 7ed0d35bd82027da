//! Output formatting for command results.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use bidipath_lib::{Direction, Graph, PathRenderMode, PathSummary};

/// How command results are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Markdown list, suitable for pasting into notes.
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

/// Render a path summary in the requested format.
pub fn render_path(summary: &PathSummary, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => summary.render(PathRenderMode::PlainText),
        OutputFormat::Markdown => summary.render(PathRenderMode::Markdown),
        OutputFormat::Json => serde_json::to_string_pretty(summary)? + "\n",
    };
    Ok(rendered)
}

/// Shape of a loaded graph file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphInfo {
    pub directed: bool,
    pub vertices: usize,
    pub edges: usize,
    /// Vertices with no incident edges.
    pub isolated: usize,
}

impl GraphInfo {
    pub fn from_graph(graph: &Graph<String>) -> Self {
        let isolated = graph
            .vertices()
            .filter(|vertex| {
                graph
                    .neighbours(vertex, Direction::Forward)
                    .is_none_or(|adjacency| adjacency.is_empty())
                    && graph
                        .neighbours(vertex, Direction::Backward)
                        .is_none_or(|adjacency| adjacency.is_empty())
            })
            .count();

        Self {
            directed: graph.is_directed(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            isolated,
        }
    }
}

/// Render graph information in the requested format.
pub fn render_info(info: &GraphInfo, format: OutputFormat) -> Result<String> {
    let kind = if info.directed { "directed" } else { "undirected" };
    let mut buffer = String::new();
    match format {
        OutputFormat::Text => {
            writeln!(buffer, "graph: {kind}")?;
            writeln!(buffer, "vertices: {}", info.vertices)?;
            writeln!(buffer, "edges: {}", info.edges)?;
            writeln!(buffer, "isolated: {}", info.isolated)?;
        }
        OutputFormat::Markdown => {
            writeln!(buffer, "**Graph** _{kind}_")?;
            writeln!(buffer, "* vertices: {}", info.vertices)?;
            writeln!(buffer, "* edges: {}", info.edges)?;
            writeln!(buffer, "* isolated: {}", info.isolated)?;
        }
        OutputFormat::Json => {
            buffer = serde_json::to_string_pretty(info)? + "\n";
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidipath_lib::EdgeAttributes;

    fn graph() -> Graph<String> {
        let mut graph = Graph::directed();
        graph.add_edge("a".into(), "b".into(), EdgeAttributes::weighted(1.0));
        graph.add_edge("a".into(), "b".into(), EdgeAttributes::weighted(3.0));
        graph.add_vertex("c".into());
        graph
    }

    #[test]
    fn info_counts_isolated_vertices() {
        let info = GraphInfo::from_graph(&graph());
        assert_eq!(
            info,
            GraphInfo {
                directed: true,
                vertices: 3,
                edges: 2,
                isolated: 1,
            }
        );
    }

    #[test]
    fn info_text_lists_counts() {
        let text = render_info(&GraphInfo::from_graph(&graph()), OutputFormat::Text).unwrap();
        assert_eq!(text, "graph: directed\nvertices: 3\nedges: 2\nisolated: 1\n");
    }

    #[test]
    fn info_json_is_parseable() {
        let json = render_info(&GraphInfo::from_graph(&graph()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["edges"], 2);
        assert_eq!(value["directed"], true);
    }
}
