//! Scripted [`Transport`] and log capture for unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::Instant;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use super::operation::{Operation, OperationKind};
use super::transport::Transport;
use crate::error::GithubError;

#[derive(Debug, Clone)]
pub(crate) struct SentCall {
    pub kind: OperationKind,
    pub variables: Value,
    pub at: Instant,
}

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Value, GithubError>>>,
    sent: Mutex<Vec<SentCall>>,
    gate_checks: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Result<Value, GithubError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentCall> {
        self.sent.lock().unwrap().clone()
    }

    pub fn gate_checks(&self) -> usize {
        self.gate_checks.load(Ordering::SeqCst)
    }
}

pub(crate) fn throttled() -> GithubError {
    GithubError::Throttled {
        message: "was submitted too quickly".to_string(),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn wait_if_throttled(&self) {
        self.gate_checks.fetch_add(1, Ordering::SeqCst);
    }

    async fn send(&self, operation: &Operation) -> Result<Value, GithubError> {
        self.sent.lock().unwrap().push(SentCall {
            kind: operation.kind(),
            variables: operation.variables().clone(),
            at: Instant::now(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GithubError::MalformedResponse("script exhausted".to_string())))
    }
}

/// Collects formatted log lines written while its guard is held on the current thread.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
