use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use migrator_schema::{GraphqlRequest, GraphqlResponse};
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::operation::Operation;
use super::policy::{classify_graphql_errors, classify_status, preview};
use super::rate_state::{RateGate, RateState};
use crate::config::GithubConfig;
use crate::error::GithubError;
use crate::utils::logging::with_pretty_json_debug;

/// One outbound GraphQL call plus the admission gate in front of it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Blocks while the remote reports an exhausted quota; proceeds at once otherwise.
    async fn wait_if_throttled(&self);

    /// Performs exactly one call and returns the `data` object. Never retries.
    async fn send(&self, operation: &Operation) -> Result<Value, GithubError>;
}

/// reqwest-backed transport for the GitHub GraphQL endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
    gate: RateGate,
    pacer: DefaultDirectRateLimiter,
}

impl HttpTransport {
    pub fn new(cfg: &GithubConfig, token: impl Into<String>) -> Result<Self, GithubError> {
        let client = build_client(cfg)?;
        Ok(Self::with_client(cfg, token, client))
    }

    pub fn with_client(
        cfg: &GithubConfig,
        token: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        let calls_per_hour = NonZeroU32::new(cfg.calls_per_hour).unwrap_or(NonZeroU32::MIN);
        Self {
            client,
            endpoint: cfg.api_url.clone(),
            token: token.into(),
            gate: RateGate::new(),
            pacer: RateLimiter::direct(Quota::per_hour(calls_per_hour)),
        }
    }

    /// Last quota reported by the remote.
    pub fn rate_state(&self) -> RateState {
        self.gate.snapshot()
    }

    pub fn build_request(
        &self,
        operation: &Operation,
    ) -> Result<reqwest::Request, reqwest::Error> {
        self.client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&GraphqlRequest {
                query: operation.document(),
                variables: operation.variables(),
            })
            .build()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn wait_if_throttled(&self) {
        self.gate.wait_if_throttled().await;
    }

    async fn send(&self, operation: &Operation) -> Result<Value, GithubError> {
        self.pacer.until_ready().await;

        let req = self.build_request(operation)?;
        let resp = self.client.execute(req).await?;
        let status = resp.status();
        let rate = self.gate.observe(resp.headers());
        let bytes = resp.bytes().await?;

        debug!(
            operation = %operation.kind(),
            %status,
            remaining = ?rate.remaining,
            "GraphQL response received"
        );

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(classify_status(status, body));
        }

        let envelope: GraphqlResponse = serde_json::from_slice(&bytes).map_err(|e| {
            GithubError::MalformedResponse(format!(
                "{e}; body={}",
                preview(&String::from_utf8_lossy(&bytes))
            ))
        })?;

        if !envelope.errors.is_empty() {
            with_pretty_json_debug(&envelope.errors, |pretty| {
                debug!(operation = %operation.kind(), errors = %pretty, "GraphQL errors");
            });
            return Err(classify_graphql_errors(envelope.errors));
        }

        envelope
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| GithubError::MalformedResponse("response carried no data".to_string()))
    }
}

fn build_client(cfg: &GithubConfig) -> Result<reqwest::Client, GithubError> {
    let mut headers = HeaderMap::new();

    let mut builder = reqwest::Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60));

    if let Some(proxy_url) = cfg.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }

    if cfg.enable_multiplexing {
        builder = builder.http2_adaptive_window(true);
    } else {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        builder = builder
            .http1_only()
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Duration::from_secs(0));
    }

    Ok(builder.default_headers(headers).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn build_request_sets_bearer_and_body() {
        let cfg = GithubConfig {
            api_url: Url::parse("http://example.test/graphql").expect("valid url"),
            ..GithubConfig::default()
        };
        let transport = HttpTransport::with_client(&cfg, "tok-1", reqwest::Client::new());

        let req = transport
            .build_request(&Operation::read_repository_id("octocat", "hello"))
            .expect("failed to build request");

        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url().as_str(), "http://example.test/graphql");
        assert_eq!(
            req.headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer tok-1")
        );

        let body = req
            .body()
            .and_then(reqwest::Body::as_bytes)
            .expect("buffered body");
        let json: Value = serde_json::from_slice(body).expect("json body");
        assert!(json["query"].as_str().is_some_and(|q| q.contains("GetRepositoryId")));
        assert_eq!(json["variables"]["owner"], "octocat");
    }

    #[test]
    fn starts_with_unknown_rate_state() {
        let transport =
            HttpTransport::with_client(&GithubConfig::default(), "t", reqwest::Client::new());
        assert_eq!(transport.rate_state(), RateState::default());
    }
}
