//! Path command handler for shortest-path queries between two vertices.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use bidipath_lib::{
    load_graph, plan_path, PathAlgorithm, PathRequest, PathSummary, DEFAULT_WEIGHT_KEY,
};

use crate::output::{render_path, OutputFormat};

/// Arguments for the path command.
#[derive(Debug, Clone, Args)]
pub struct PathCommandArgs {
    /// Graph file (.json document or .csv edge list).
    #[arg(long)]
    pub graph: PathBuf,
    /// Source vertex.
    #[arg(long = "from")]
    pub from: String,
    /// Target vertex.
    #[arg(long = "to")]
    pub to: String,
    /// Search algorithm (bidirectional or dijkstra).
    #[arg(long, default_value_t = PathAlgorithm::Bidirectional)]
    pub algorithm: PathAlgorithm,
    /// Edge attribute holding the cost; edges without it cost 1.
    #[arg(long, default_value = DEFAULT_WEIGHT_KEY)]
    pub weight: String,
    /// Treat every edge as directed, overriding the file.
    #[arg(long, conflicts_with = "undirected")]
    pub directed: bool,
    /// Treat every edge as undirected, overriding the file.
    #[arg(long)]
    pub undirected: bool,
}

impl PathCommandArgs {
    /// Directedness override requested on the command line, if any.
    pub fn directedness(&self) -> Option<bool> {
        match (self.directed, self.undirected) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Convert CLI args to a library [`PathRequest`].
    pub fn to_request(&self) -> PathRequest {
        PathRequest::bidirectional(&self.from, &self.to)
            .with_algorithm(self.algorithm)
            .with_weight_key(&self.weight)
    }
}

/// Handle the path subcommand.
pub fn handle_path_command(args: &PathCommandArgs, format: OutputFormat) -> Result<()> {
    let graph = load_graph(&args.graph, args.directedness())
        .with_context(|| format!("failed to load graph from {}", args.graph.display()))?;

    let plan = plan_path(&graph, &args.to_request())?;
    let summary = PathSummary::from_plan(&graph, &plan)?;

    print!("{}", render_path(&summary, format)?);
    Ok(())
}
