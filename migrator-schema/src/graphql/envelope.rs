use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// POST body of a GraphQL call.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,

    #[serde(skip_serializing_if = "is_null")]
    pub variables: &'a Value,
}

fn is_null(value: &&Value) -> bool {
    value.is_null()
}

/// Standard GraphQL response envelope. `data` stays raw so each operation decodes its own payload.
#[derive(Debug, Deserialize, Serialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlErrorObject>,
}

/// One entry of the `errors` array.
///
/// GitHub adds a non-standard top-level `type` (e.g. `RATE_LIMITED`, `NOT_FOUND`) next to the
/// standard `message`/`path`/`extensions` fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GraphqlErrorObject {
    #[serde(default)]
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl GraphqlErrorObject {
    /// `type`, falling back to `extensions.code` used by some GraphQL servers.
    pub fn kind(&self) -> Option<&str> {
        self.r#type.as_deref().or_else(|| {
            self.extensions
                .as_ref()
                .and_then(|ext| ext.get("code"))
                .and_then(Value::as_str)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_null_variables() {
        let variables = Value::Null;
        let req = GraphqlRequest {
            query: "query { viewer { login } }",
            variables: &variables,
        };
        let encoded = serde_json::to_value(&req).expect("serialize request");
        assert_eq!(encoded, json!({"query": "query { viewer { login } }"}));
    }

    #[test]
    fn parses_github_typed_error() {
        let raw = r#"{
            "data": null,
            "errors": [{"type": "RATE_LIMITED", "message": "API rate limit exceeded", "locations": []}]
        }"#;
        let parsed: GraphqlResponse = serde_json::from_str(raw).expect("parse response");

        assert!(parsed.data.is_none());
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].kind(), Some("RATE_LIMITED"));
        assert!(parsed.errors[0].extra.contains_key("locations"));
    }

    #[test]
    fn kind_falls_back_to_extensions_code() {
        let raw = r#"{"message": "nope", "extensions": {"code": "FORBIDDEN"}}"#;
        let parsed: GraphqlErrorObject = serde_json::from_str(raw).expect("parse error object");
        assert_eq!(parsed.kind(), Some("FORBIDDEN"));
    }
}
