//! Quota tracking learned from `x-ratelimit-*` response headers.
//!
//! The gate is the only admission control in front of the transport: it is consulted before
//! every call and blocks only when the remote has reported zero remaining calls.

use chrono::Utc;
use reqwest::header::HeaderMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

const MIN_QUOTA_WAIT: Duration = Duration::from_secs(1);

/// Remaining calls and reset time (epoch seconds). `None` means the remote has not told us.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateState {
    pub remaining: Option<u64>,
    pub reset_at: Option<i64>,
}

impl RateState {
    /// Missing or unparsable headers yield `None`, never zero.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining: parse_header(headers, REMAINING_HEADER),
            reset_at: parse_header(headers, RESET_HEADER),
        }
    }

    /// How long to hold the next call, or `None` to proceed immediately.
    pub fn wait_duration(&self, now_epoch_secs: i64) -> Option<Duration> {
        match (self.remaining, self.reset_at) {
            (Some(0), Some(reset_at)) => {
                let secs = u64::try_from(reset_at.saturating_sub(now_epoch_secs)).unwrap_or(0);
                Some(Duration::from_secs(secs).max(MIN_QUOTA_WAIT))
            }
            _ => None,
        }
    }
}

/// Owner of the [`RateState`] of one connection.
#[derive(Debug, Default)]
pub struct RateGate {
    state: Mutex<RateState>,
}

impl RateGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RateState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, state: RateState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Replaces the state with what `headers` report and returns it.
    pub fn observe(&self, headers: &HeaderMap) -> RateState {
        let state = RateState::from_headers(headers);
        debug!(
            remaining = ?state.remaining,
            reset_at = ?state.reset_at,
            "Rate state updated from response headers"
        );
        self.record(state);
        state
    }

    /// Sleeps until the reported reset when quota is exhausted. Returns the time waited.
    pub async fn wait_if_throttled(&self) -> Option<Duration> {
        let wait = self.snapshot().wait_duration(Utc::now().timestamp())?;
        info!(
            wait_secs = wait.as_secs(),
            "Rate limit quota exhausted, waiting for reset"
        );
        tokio::time::sleep(wait).await;
        Some(wait)
    }
}

fn parse_header<T: std::str::FromStr>(headers: &HeaderMap, key: &str) -> Option<T> {
    headers.get(key)?.to_str().ok()?.trim().parse().ok()
}
