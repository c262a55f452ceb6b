//! Error types for the velo library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a graph or building routes.
#[derive(Error, Debug)]
pub enum VeloError {
    /// IO error when reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A graph file is missing from the data directory.
    #[error("Graph file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File size is not a whole number of records.
    #[error("Invalid file size for {path}: {size} bytes (expected a multiple of {record})")]
    InvalidFileSize {
        path: PathBuf,
        size: usize,
        record: usize,
    },

    /// The graph tables are individually well-formed but inconsistent with each other.
    #[error("Malformed graph: {reason}")]
    MalformedGraph { reason: String },

    /// Coordinates are outside the region covered by the network.
    #[error("Coordinates out of bounds: e={e}, n={n}")]
    OutOfBounds { e: f64, n: f64 },

    /// A caller-supplied argument violates a precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias using [`VeloError`].
pub type Result<T> = std::result::Result<T, VeloError>;
