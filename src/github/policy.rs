//! Stable failure classification at the transport boundary.
//!
//! Every upstream failure is mapped exactly once, here, to a [`GithubError`] variant. The retry
//! layer only looks at the variant.

use migrator_schema::GraphqlErrorObject;
use reqwest::StatusCode;

use crate::error::GithubError;

pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

/// GitHub's `type` for GraphQL calls rejected by a rate limit.
const RATE_LIMITED_TYPE: &str = "RATE_LIMITED";

/// Message GitHub attaches to content-creation mutations issued too fast. Free text, so this is
/// a heuristic and is matched in this function only.
const SUBMITTED_TOO_QUICKLY: &str = "was submitted too quickly";

const SECONDARY_RATE_LIMIT: &str = "secondary rate limit";

pub fn is_throttle_error(error: &GraphqlErrorObject) -> bool {
    error
        .kind()
        .is_some_and(|kind| kind.eq_ignore_ascii_case(RATE_LIMITED_TYPE))
        || error
            .message
            .to_ascii_lowercase()
            .contains(SUBMITTED_TOO_QUICKLY)
}

/// Maps a GraphQL `errors` array. Any throttle entry makes the whole call a throttle signal.
pub fn classify_graphql_errors(errors: Vec<GraphqlErrorObject>) -> GithubError {
    match errors.iter().find(|e| is_throttle_error(e)) {
        Some(throttle) => GithubError::Throttled {
            message: throttle.message.clone(),
        },
        None => GithubError::Graphql { errors },
    }
}

/// Maps a non-2xx HTTP response.
pub fn classify_status(status: StatusCode, body: String) -> GithubError {
    let throttled = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && body.to_ascii_lowercase().contains(SECONDARY_RATE_LIMIT));

    if throttled {
        GithubError::Throttled {
            message: format!("{status}: {}", preview(&body)),
        }
    } else {
        GithubError::UpstreamStatus { status, body }
    }
}

pub fn preview(body: &str) -> String {
    format!("{:.len$}", body, len = UPSTREAM_BODY_PREVIEW_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(kind: Option<&str>, message: &str) -> GraphqlErrorObject {
        GraphqlErrorObject {
            message: message.to_string(),
            r#type: kind.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn typed_rate_limit_is_throttle() {
        assert!(is_throttle_error(&error(Some("RATE_LIMITED"), "API rate limit exceeded")));
    }

    #[test]
    fn submitted_too_quickly_is_throttle_even_when_typed_otherwise() {
        assert!(is_throttle_error(&error(
            Some("UNPROCESSABLE"),
            "Body was submitted too quickly"
        )));
        assert!(is_throttle_error(&error(None, "was submitted too quickly")));
    }

    #[test]
    fn other_graphql_errors_are_terminal() {
        let err = classify_graphql_errors(vec![error(
            Some("NOT_FOUND"),
            "Could not resolve to a Repository",
        )]);
        assert!(matches!(err, GithubError::Graphql { ref errors } if errors.len() == 1));
    }

    #[test]
    fn mixed_errors_prefer_throttle() {
        let err = classify_graphql_errors(vec![
            error(Some("FORBIDDEN"), "nope"),
            error(Some("RATE_LIMITED"), "slow down"),
        ]);
        assert!(matches!(err, GithubError::Throttled { ref message } if message == "slow down"));
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            GithubError::Throttled { .. }
        ));
        assert!(matches!(
            classify_status(
                StatusCode::FORBIDDEN,
                r#"{"message":"You have exceeded a secondary rate limit."}"#.to_string()
            ),
            GithubError::Throttled { .. }
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "Resource not accessible".to_string()),
            GithubError::UpstreamStatus { status, .. } if status == StatusCode::FORBIDDEN
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "Bad credentials".to_string()),
            GithubError::UpstreamStatus { status, .. } if status == StatusCode::UNAUTHORIZED
        ));
    }
}
