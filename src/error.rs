use std::path::PathBuf;
use thiserror::Error;

/// Error type for override installation.
///
/// Only configuration failures surface as errors; a missing override target
/// or a failed existence probe is a silent pass-through, never an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read override config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse override config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
