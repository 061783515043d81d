use migrator_schema::GraphqlErrorObject;
use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::IsRetryable;

#[derive(Debug, ThisError)]
pub enum GithubError {
    /// Upstream rejected the call for arriving too quickly (secondary rate limit).
    ///
    /// Distinct from quota exhaustion, which the rate gate absorbs before sending.
    #[error("Throttled by upstream: {message}")]
    Throttled { message: String },

    /// Every attempt allowed by the retry budget ended in [`GithubError::Throttled`].
    #[error("Retries exhausted after {attempts} attempts")]
    ExhaustedRetries {
        attempts: usize,
        #[source]
        source: Box<GithubError>,
    },

    /// GraphQL-level failure (validation, not found, forbidden, ...).
    #[error("GraphQL error: {}", join_messages(.errors))]
    Graphql { errors: Vec<GraphqlErrorObject> },

    /// Non-2xx HTTP status that is not a throttle signal (auth failure, server error, ...).
    #[error("Upstream error: status={status}, body={body:.200}")]
    UpstreamStatus { status: StatusCode, body: String },

    /// 2xx response whose payload lacks what the operation selected.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure (DNS, connect, timeouts, etc).
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IsRetryable for GithubError {
    fn is_retryable(&self) -> bool {
        matches!(self, GithubError::Throttled { .. })
    }
}

fn join_messages(errors: &[GraphqlErrorObject]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_throttle_is_retryable() {
        let throttled = GithubError::Throttled {
            message: "was submitted too quickly".to_string(),
        };
        assert!(throttled.is_retryable());

        let exhausted = GithubError::ExhaustedRetries {
            attempts: 4,
            source: Box::new(throttled),
        };
        assert!(!exhausted.is_retryable());

        let unauthorized = GithubError::UpstreamStatus {
            status: StatusCode::UNAUTHORIZED,
            body: "Bad credentials".to_string(),
        };
        assert!(!unauthorized.is_retryable());
        assert!(!GithubError::MalformedResponse("x".to_string()).is_retryable());
    }

    #[test]
    fn graphql_display_joins_messages() {
        let err = GithubError::Graphql {
            errors: vec![
                GraphqlErrorObject {
                    message: "first".to_string(),
                    ..Default::default()
                },
                GraphqlErrorObject {
                    message: "second".to_string(),
                    ..Default::default()
                },
            ],
        };
        assert_eq!(err.to_string(), "GraphQL error: first; second");
    }
}
