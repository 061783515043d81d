//! GitHub Discussions over GraphQL: rate-aware transport, retrying executor and typed client.

mod client;
mod executor;
mod operation;
mod policy;
mod rate_state;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::DiscussionsClient;
pub use executor::RetryingExecutor;
pub use operation::{Operation, OperationKind};
pub use policy::{classify_graphql_errors, classify_status, is_throttle_error};
pub use rate_state::{RESET_HEADER, REMAINING_HEADER, RateGate, RateState};
pub use transport::{HttpTransport, Transport};
