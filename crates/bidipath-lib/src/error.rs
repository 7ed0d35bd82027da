use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the bidipath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Source or target vertex is not part of the graph.
    #[error("vertex {vertex} is not in the graph{}", format_suggestions(.suggestions))]
    VertexNotFound {
        vertex: String,
        suggestions: Vec<String>,
    },

    /// Both frontiers were exhausted without meeting.
    #[error("no path between {from} and {to}")]
    NoPathExists { from: String, to: String },

    /// A relaxation found a shorter distance to an already finalized vertex.
    #[error("contradictory paths found at vertex {vertex}: negative weights?")]
    InconsistentWeights { vertex: String },

    /// Raised when a path result to be summarised has no vertices.
    #[error("path was empty")]
    EmptyPath,

    /// The caller raised the cancellation flag while the search was running.
    #[error("search cancelled")]
    Cancelled,

    /// Raised when a graph document violates the graph invariants.
    #[error("invalid graph: {message}")]
    InvalidGraph { message: String },

    /// Raised when a graph file has an extension no loader understands.
    #[error("unsupported graph format for {path}; expected .json or .csv")]
    UnsupportedFormat { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV decoding errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn vertex_not_found(vertex: &impl fmt::Debug) -> Self {
        Error::VertexNotFound {
            vertex: format!("{vertex:?}"),
            suggestions: Vec::new(),
        }
    }

    pub(crate) fn no_path(source: &impl fmt::Debug, target: &impl fmt::Debug) -> Self {
        Error::NoPathExists {
            from: format!("{source:?}"),
            to: format!("{target:?}"),
        }
    }

    pub(crate) fn inconsistent_weights(vertex: &impl fmt::Debug) -> Self {
        Error::InconsistentWeights {
            vertex: format!("{vertex:?}"),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
