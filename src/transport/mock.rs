//! transport::mock
//!
//! Mock transport implementation for deterministic testing.
//!
//! # Design
//!
//! Responses are scripted per request target. Each target can additionally
//! be *held*: requests to a held target do not settle until the target is
//! released, which lets tests decide the order in which concurrent requests
//! complete. A target that is held and never released models a request that
//! never reaches its final state.
//!
//! # Example
//!
//! ```
//! use changeset_loader::transport::mock::MockTransport;
//! use changeset_loader::transport::Transport;
//!
//! # tokio_test::block_on(async {
//! let transport = MockTransport::new();
//! transport.respond("http://srv/changesets/1", 200, "<div>1</div>");
//!
//! let completion = transport.get("http://srv/changesets/1").await.unwrap();
//! assert_eq!(completion.status, 200);
//! assert_eq!(transport.requests(), vec!["http://srv/changesets/1".to_string()]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use super::traits::{Completion, Transport, TransportError};

/// Mock transport for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockTransport {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockTransportInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockTransportInner {
    /// Scripted outcomes by request target.
    responses: HashMap<String, Result<Completion, TransportError>>,
    /// Gates by request target; `false` means held.
    gates: HashMap<String, watch::Sender<bool>>,
    /// Request targets in the order they were issued.
    requests: Vec<String>,
}

impl MockTransport {
    /// Create a mock transport with nothing scripted.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTransportInner::default())),
        }
    }

    /// Script a fully received response for `url`.
    pub fn respond(&self, url: impl Into<String>, status: u16, body: impl Into<String>) {
        self.script(url, Ok(Completion::done(status, body)));
    }

    /// Script an arbitrary completion for `url`.
    pub fn complete_with(&self, url: impl Into<String>, completion: Completion) {
        self.script(url, Ok(completion));
    }

    /// Script a transport failure for `url`.
    pub fn fail_with(&self, url: impl Into<String>, error: TransportError) {
        self.script(url, Err(error));
    }

    fn script(&self, url: impl Into<String>, outcome: Result<Completion, TransportError>) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.insert(url.into(), outcome);
    }

    /// Hold requests to `url` until [`release`](Self::release) is called.
    pub fn hold(&self, url: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        let (tx, _rx) = watch::channel(false);
        inner.gates.insert(url.into(), tx);
    }

    /// Let held requests to `url` settle, now and in the future.
    pub fn release(&self, url: &str) {
        let inner = self.inner.lock().unwrap();
        if let Some(gate) = inner.gates.get(url) {
            gate.send_replace(true);
        }
    }

    /// Request targets seen so far, in issue order.
    pub fn requests(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.requests.len()
    }

    /// Clear recorded requests.
    pub fn clear_requests(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.clear();
    }

    /// Record the request and return the gate to wait on, if any.
    fn record(&self, url: &str) -> Option<watch::Receiver<bool>> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(url.to_string());
        inner.gates.get(url).map(|gate| gate.subscribe())
    }

    fn outcome(&self, url: &str) -> Result<Completion, TransportError> {
        let inner = self.inner.lock().unwrap();
        inner
            .responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::NotScripted(url.to_string())))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get(&self, url: &str) -> Result<Completion, TransportError> {
        if let Some(mut gate) = self.record(url) {
            let opened = gate.wait_for(|open| *open).await.is_ok();
            // A replaced gate never opens.
            if !opened {
                std::future::pending::<()>().await;
            }
        }
        self.outcome(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ReadyState;
    use std::time::Duration;

    #[tokio::test]
    async fn scripted_response_is_returned() {
        let transport = MockTransport::new();
        transport.respond("http://srv/changesets/1", 404, "missing");

        let completion = transport.get("http://srv/changesets/1").await.unwrap();
        assert_eq!(completion, Completion::done(404, "missing"));
    }

    #[tokio::test]
    async fn unscripted_target_fails() {
        let transport = MockTransport::new();
        let err = transport.get("http://srv/changesets/9").await.unwrap_err();
        assert_eq!(
            err,
            TransportError::NotScripted("http://srv/changesets/9".into())
        );
    }

    #[tokio::test]
    async fn records_requests_in_order() {
        let transport = MockTransport::new();
        transport.respond("a", 200, "");
        transport.respond("b", 200, "");

        transport.get("b").await.unwrap();
        transport.get("a").await.unwrap();

        assert_eq!(transport.requests(), vec!["b".to_string(), "a".to_string()]);
        transport.clear_requests();
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn held_request_waits_for_release() {
        let transport = MockTransport::new();
        transport.respond("a", 200, "<p>a</p>");
        transport.hold("a");

        let pending = tokio::time::timeout(Duration::from_millis(20), transport.get("a")).await;
        assert!(pending.is_err());

        transport.release("a");
        let completion = transport.get("a").await.unwrap();
        assert_eq!(completion.body, "<p>a</p>");
    }

    #[tokio::test]
    async fn interrupted_completion_is_passed_through() {
        let transport = MockTransport::new();
        transport.complete_with("a", Completion::interrupted(ReadyState::Loading, 200, "<p"));

        let completion = transport.get("a").await.unwrap();
        assert_eq!(completion.ready_state, ReadyState::Loading);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let transport = MockTransport::new();
        let clone = transport.clone();
        clone.respond("a", 200, "x");

        transport.get("a").await.unwrap();
        assert_eq!(clone.request_count(), 1);
    }
}
