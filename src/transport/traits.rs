//! transport::traits
//!
//! Transport trait definition and the completion record it produces.
//!
//! # Design
//!
//! A transport performs one HTTP GET and reports what it observed when the
//! request settled. It does not decide whether that observation is usable;
//! the loader applies that filter (see [`crate::loader::should_apply`]).
//!
//! A request that settles with a partial body is still a `Completion`, just
//! one whose [`ReadyState`] never reached [`ReadyState::Done`]. Failures that
//! happen before any status line arrives are [`TransportError`]s.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from transport operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request target could not be turned into a request.
    #[error("invalid url '{url}': {message}")]
    InvalidUrl {
        /// The target as given
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// A mock transport received a request it has no response for.
    #[error("no scripted response for {0}")]
    NotScripted(String),
}

/// Lifecycle of a single request, as observed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ReadyState {
    /// Request object created, nothing sent
    #[default]
    Unsent,
    /// Target set, not yet sent
    Opened,
    /// Status line and headers received
    HeadersReceived,
    /// Body partially received
    Loading,
    /// Body fully received
    Done,
}

impl std::fmt::Display for ReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadyState::Unsent => write!(f, "unsent"),
            ReadyState::Opened => write!(f, "opened"),
            ReadyState::HeadersReceived => write!(f, "headers-received"),
            ReadyState::Loading => write!(f, "loading"),
            ReadyState::Done => write!(f, "done"),
        }
    }
}

/// The last observation of a request before it settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Furthest lifecycle state reached
    pub ready_state: ReadyState,
    /// HTTP status code (0 when no status line was received)
    pub status: u16,
    /// Response body, possibly partial unless `ready_state` is `Done`
    pub body: String,
}

impl Completion {
    /// A fully received response.
    pub fn done(status: u16, body: impl Into<String>) -> Self {
        Self {
            ready_state: ReadyState::Done,
            status,
            body: body.into(),
        }
    }

    /// A response that stopped short of `Done`.
    pub fn interrupted(ready_state: ReadyState, status: u16, body: impl Into<String>) -> Self {
        Self {
            ready_state,
            status,
            body: body.into(),
        }
    }

    /// Whether the body was received in full.
    pub fn is_done(&self) -> bool {
        self.ready_state == ReadyState::Done
    }
}

/// Performs single asynchronous GET requests.
///
/// Implementations must be `Send + Sync`; the loader shares one transport
/// across every request it spawns.
///
/// No retries, no timeouts and no custom headers: a request runs until the
/// host gives up on it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Get the transport name (e.g., "http", "mock").
    fn name(&self) -> &'static str;

    /// Issue a GET to `url` and wait for it to settle.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if `url` cannot be requested at all
    /// - `Network` if the connection fails before a status is received
    async fn get(&self, url: &str) -> Result<Completion, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_orders_along_lifecycle() {
        assert!(ReadyState::Unsent < ReadyState::Opened);
        assert!(ReadyState::Opened < ReadyState::HeadersReceived);
        assert!(ReadyState::HeadersReceived < ReadyState::Loading);
        assert!(ReadyState::Loading < ReadyState::Done);
    }

    #[test]
    fn ready_state_display() {
        assert_eq!(format!("{}", ReadyState::Unsent), "unsent");
        assert_eq!(format!("{}", ReadyState::HeadersReceived), "headers-received");
        assert_eq!(format!("{}", ReadyState::Done), "done");
    }

    #[test]
    fn completion_constructors() {
        let done = Completion::done(200, "<div/>");
        assert!(done.is_done());
        assert_eq!(done.status, 200);

        let partial = Completion::interrupted(ReadyState::Loading, 200, "<di");
        assert!(!partial.is_done());
        assert_eq!(partial.body, "<di");
    }

    #[test]
    fn transport_error_display() {
        assert_eq!(
            format!(
                "{}",
                TransportError::InvalidUrl {
                    url: "/changesets/1".into(),
                    message: "relative URL without a base".into()
                }
            ),
            "invalid url '/changesets/1': relative URL without a base"
        );
        assert_eq!(
            format!("{}", TransportError::Network("connection refused".into())),
            "network error: connection refused"
        );
        assert_eq!(
            format!("{}", TransportError::NotScripted("http://x/changesets/1".into())),
            "no scripted response for http://x/changesets/1"
        );
    }
}
