use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Export loading failures; both are fatal for the run.
#[derive(Debug, ThisError)]
pub enum ExportError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
