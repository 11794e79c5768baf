//! Error types for Floor Navigator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or writing a floor catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or does not match the expected layout.
    #[error("invalid catalog JSON: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    /// Floor numbers start at 1.
    #[error("invalid floor number {floor}: floors are numbered from 1")]
    InvalidFloorNumber { floor: u32 },
}

/// Errors that can occur when retrieving a diagram asset.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to read the asset from the local filesystem.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The server answered with a non-success status.
    #[error("'{url}' responded with status {status}")]
    Status { url: String, status: u16 },

    /// The request never produced a response.
    #[error("request to '{url}' failed: {message}")]
    Transport { url: String, message: String },
}

/// Errors surfaced by the map viewer. None of them are fatal.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The requested floor is not in the catalog.
    #[error("floor {floor} not found")]
    FloorNotFound { floor: u32 },

    /// The diagram for a floor could not be retrieved.
    #[error("failed to load the map of floor {floor}: {source}")]
    AssetFetchFailed { floor: u32, source: FetchError },

    /// The injected markup has no recognizable diagram root.
    #[error("map of floor {floor} contains no SVG diagram")]
    DiagramMissing { floor: u32 },
}
