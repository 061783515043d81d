mod export;
mod github;
mod migration;

pub use export::ExportError;
pub use github::GithubError;
pub use migration::MigrationError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
