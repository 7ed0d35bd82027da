use anyhow::Result;
use clap::{Parser, Subcommand};

use bidipath_cli::commands::info::{handle_info_command, InfoCommandArgs};
use bidipath_cli::commands::path::{handle_path_command, PathCommandArgs};
use bidipath_cli::logging::{init_logging, LoggingConfig};
use bidipath_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest paths over graph files")]
struct Cli {
    /// Output format for command results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the minimum-weight path between two vertices.
    Path(PathCommandArgs),
    /// Report the shape of a graph file.
    Info(InfoCommandArgs),
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    match &cli.command {
        Command::Path(args) => handle_path_command(args, cli.format),
        Command::Info(args) => handle_info_command(args, cli.format),
    }
}
