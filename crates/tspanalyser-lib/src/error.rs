use std::path::PathBuf;

use thiserror::Error;

use crate::node::NodeId;

/// Convenient result alias for the tspanalyser library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a start identifier is not part of the loaded dataset.
    #[error("start node {id} does not exist")]
    NoSuchStartVertex { id: NodeId },

    /// Raised when no closed tour could be built from the given start node.
    #[error("no tour reachable from start node {start}")]
    NoFeasibleTour { start: NodeId },

    /// Raised when the graph holds a node the id map does not know about.
    #[error("node {id} is in the graph but missing from the id map")]
    UnmappedNode { id: NodeId },

    /// Raised when an edge refers to a node that was never added to the graph.
    #[error("edge references unknown node {id}")]
    UnknownNode { id: NodeId },

    /// Raised when an edge weight is negative or not a number.
    #[error("invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    /// Dataset file could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when a dataset selection does not name a known graph.
    #[error("unknown {kind} graph: {name}{}", format_choices(.choices))]
    UnknownGraph {
        kind: String,
        name: String,
        choices: Vec<String>,
    },

    /// Raised when a dataset row cannot be interpreted.
    #[error("malformed dataset {path} at line {line}: {message}")]
    MalformedDataset {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_choices(choices: &[String]) -> String {
    if choices.is_empty() {
        String::new()
    } else {
        format!(
            ". Expected one of: {}",
            choices
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
