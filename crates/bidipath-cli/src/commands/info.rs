//! Info command handler summarising a graph file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use bidipath_lib::load_graph;

use crate::output::{render_info, GraphInfo, OutputFormat};

/// Arguments for the info command.
#[derive(Debug, Clone, Args)]
pub struct InfoCommandArgs {
    /// Graph file (.json document or .csv edge list).
    #[arg(long)]
    pub graph: PathBuf,
}

/// Handle the info subcommand.
pub fn handle_info_command(args: &InfoCommandArgs, format: OutputFormat) -> Result<()> {
    let graph = load_graph(&args.graph, None)
        .with_context(|| format!("failed to load graph from {}", args.graph.display()))?;

    let info = GraphInfo::from_graph(&graph);
    debug!(?info, "graph info");
    print!("{}", render_info(&info, format)?);
    Ok(())
}
