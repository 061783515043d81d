use thiserror::Error as ThisError;

use super::{ExportError, GithubError};

#[derive(Debug, ThisError)]
pub enum MigrationError {
    #[error(transparent)]
    Github(#[from] GithubError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Repository should be in format 'owner/name', got {0:?}")]
    InvalidRepository(String),

    #[error("Discussion category {0:?} not found")]
    CategoryNotFound(String),

    #[error("Journal IO error: {0}")]
    JournalIo(#[from] std::io::Error),

    #[error("Journal entry malformed at line {line}: {source}")]
    JournalParse {
        line: usize,
        source: serde_json::Error,
    },
}
