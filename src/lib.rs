pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod migration;
pub mod utils;

pub use error::{ExportError, GithubError, MigrationError};
pub use github::{DiscussionsClient, HttpTransport, RetryingExecutor};
