use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

static DEFAULT_API_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://api.github.com/graphql").expect("valid GitHub GraphQL URL")
});

pub const DEFAULT_USER_AGENT: &str = concat!("discussions-migrator/", env!("CARGO_PKG_VERSION"));

/// GitHub GraphQL settings managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GithubConfig {
    /// GraphQL endpoint.
    /// TOML: `github.api_url`. Default: `https://api.github.com/graphql`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Optional upstream HTTP proxy. If set, used for the reqwest client.
    /// TOML: `github.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Allow HTTP/2 multiplexing for the reqwest client; disabled forces HTTP/1.
    /// TOML: `github.enable_multiplexing`. Default: `false`.
    #[serde(default)]
    pub enable_multiplexing: bool,

    /// User-Agent header (GitHub rejects requests without one).
    /// TOML: `github.user_agent`.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Client-side ceiling on calls per hour, independent of the quota headers.
    /// TOML: `github.calls_per_hour`. Default: `5000`.
    #[serde(default = "default_calls_per_hour")]
    pub calls_per_hour: u32,

    /// Total attempts per operation when upstream throttles (first call included).
    /// TOML: `github.max_attempts`. Default: `4`.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// First backoff delay in seconds; later delays grow by `retry_factor`.
    /// TOML: `github.retry_base_delay_secs`. Default: `5`.
    #[serde(default = "default_retry_base_delay_secs")]
    pub retry_base_delay_secs: u64,

    /// Multiplier between consecutive backoff delays.
    /// TOML: `github.retry_factor`. Default: `5.0`.
    #[serde(default = "default_retry_factor")]
    pub retry_factor: f32,
}

impl GithubConfig {
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_secs(self.retry_base_delay_secs)
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            proxy: None,
            enable_multiplexing: false,
            user_agent: default_user_agent(),
            calls_per_hour: default_calls_per_hour(),
            max_attempts: default_max_attempts(),
            retry_base_delay_secs: default_retry_base_delay_secs(),
            retry_factor: default_retry_factor(),
        }
    }
}

fn default_api_url() -> Url {
    DEFAULT_API_URL.clone()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_calls_per_hour() -> u32 {
    5000
}

fn default_max_attempts() -> usize {
    4
}

fn default_retry_base_delay_secs() -> u64 {
    5
}

fn default_retry_factor() -> f32 {
    5.0
}
