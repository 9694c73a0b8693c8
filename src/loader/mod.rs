//! loader
//!
//! Fetches rendered changesets and places them into the display region.
//!
//! # Overview
//!
//! [`ChangesetLoader::load`] takes a whitespace-separated token string,
//! requests `<base-url>/changesets/<query>` and, if the request completes
//! with status 200, replaces the display region's content with the body.
//! The call returns immediately; nothing about the request is reported
//! back to the caller.
//!
//! # Ordering
//!
//! Overlapping calls are not coordinated. Each request runs to completion
//! on its own task and the last one to *complete* decides what the region
//! shows, regardless of the order the calls were made in.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use changeset_loader::loader::{ChangesetLoader, LoaderOptions};
//! use changeset_loader::page::MemoryPage;
//! use changeset_loader::transport::mock::MockTransport;
//!
//! # tokio_test::block_on(async {
//! let transport = MockTransport::new();
//! transport.respond("https://srv/changesets/1 2", 200, "<div>1, 2</div>");
//! let page = MemoryPage::new().with_element("changesets", "");
//!
//! let loader = ChangesetLoader::new(
//!     LoaderOptions::new("https://srv"),
//!     Arc::new(transport),
//!     Arc::new(page.clone()),
//! )
//! .unwrap();
//!
//! loader.load("1 2");
//! loader.idle().await;
//! assert_eq!(page.content("changesets").as_deref(), Some("<div>1, 2</div>"));
//! # });
//! ```

mod outcome;

pub use outcome::{should_apply, LoadOutcome, SkipReason, SUCCESS_STATUS};

use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::page::Page;
use crate::transport::Transport;

/// Path segment placed between the base URL and the query.
pub const CHANGESETS_PATH: &str = "/changesets/";

/// Id of the display region written by default.
pub const DEFAULT_REGION: &str = "changesets";

/// The request target for `query` under `base_url`.
///
/// Plain concatenation: the query is neither validated nor escaped.
pub fn target_url(base_url: &str, query: &str) -> String {
    format!("{}{}{}", base_url, CHANGESETS_PATH, query)
}

/// Errors from constructing a loader.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// No tokio runtime was available to run requests on.
    #[error("no async runtime available: {0}")]
    NoRuntime(String),
}

/// Settings fixed for the lifetime of a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Server root; the empty string when not configured
    pub base_url: String,
    /// Id of the display region to write into
    pub region: String,
}

impl LoaderOptions {
    /// Options for `base_url` writing to the default region.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            region: DEFAULT_REGION.to_string(),
        }
    }

    /// Write into `region` instead of the default.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::new("")
    }
}

/// Loads changeset markup into a page.
///
/// Cheap to clone; clones share the transport, the page and the in-flight
/// counter.
#[derive(Clone)]
pub struct ChangesetLoader {
    /// Fixed settings
    options: Arc<LoaderOptions>,
    /// Networking capability
    transport: Arc<dyn Transport>,
    /// Document holding the display region
    page: Arc<dyn Page>,
    /// Runtime requests are spawned on
    runtime: Handle,
    /// Number of requests started by `load` that have not settled
    in_flight: Arc<watch::Sender<usize>>,
}

impl std::fmt::Debug for ChangesetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangesetLoader")
            .field("options", &self.options)
            .field("transport", &self.transport.name())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl ChangesetLoader {
    /// Create a loader that spawns requests on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::NoRuntime` when called outside a runtime.
    pub fn new(
        options: LoaderOptions,
        transport: Arc<dyn Transport>,
        page: Arc<dyn Page>,
    ) -> Result<Self, LoaderError> {
        let runtime = Handle::try_current().map_err(|e| LoaderError::NoRuntime(e.to_string()))?;
        Ok(Self::with_handle(options, transport, page, runtime))
    }

    /// Create a loader that spawns requests on `runtime`.
    pub fn with_handle(
        options: LoaderOptions,
        transport: Arc<dyn Transport>,
        page: Arc<dyn Page>,
        runtime: Handle,
    ) -> Self {
        let (in_flight, _rx) = watch::channel(0);
        Self {
            options: Arc::new(options),
            transport,
            page,
            runtime,
            in_flight: Arc::new(in_flight),
        }
    }

    /// The loader's settings.
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// The request target for `query`.
    ///
    /// Plain concatenation: the query is neither validated nor escaped.
    pub fn target_url(&self, query: &str) -> String {
        target_url(&self.options.base_url, query)
    }

    /// Request changesets for `query` and show them when they arrive.
    ///
    /// Returns immediately. Failures of any kind leave the display region
    /// untouched and are not reported.
    pub fn load(&self, query: &str) {
        let loader = self.clone();
        let query = query.to_string();
        let guard = InFlight::enter(Arc::clone(&self.in_flight));

        self.runtime.spawn(async move {
            let _guard = guard;
            loader.fetch(&query).await;
        });
    }

    /// Perform one request for `query` and wait for it to settle.
    ///
    /// This is the body of [`load`](Self::load) for callers that want to
    /// await a single request; the display region is updated the same way.
    pub async fn fetch(&self, query: &str) -> LoadOutcome {
        let url = self.target_url(query);
        tracing::debug!(url = %url, transport = self.transport.name(), "requesting changesets");

        let result = self.transport.get(&url).await;
        let body = match outcome::accept(result) {
            Ok(body) => body,
            Err(reason) => {
                tracing::debug!(url = %url, reason = %reason, "changeset response ignored");
                return LoadOutcome::Skipped(reason);
            }
        };

        match self.page.replace_content(&self.options.region, &body) {
            Ok(()) => {
                tracing::debug!(url = %url, region = %self.options.region, bytes = body.len(), "changesets applied");
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "display region not updated");
                LoadOutcome::Skipped(SkipReason::Page(e))
            }
        }
    }

    /// Number of requests started by `load` that have not settled yet.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Wait until every request started by `load` has settled.
    ///
    /// Requests that never settle keep this pending forever.
    pub async fn idle(&self) {
        let mut rx = self.in_flight.subscribe();
        // The sender is owned by `self`, so the channel stays open.
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

/// Counts one request as in flight until dropped.
struct InFlight {
    counter: Arc<watch::Sender<usize>>,
}

impl InFlight {
    fn enter(counter: Arc<watch::Sender<usize>>) -> Self {
        counter.send_modify(|n| *n += 1);
        Self { counter }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.counter.send_modify(|n| *n = n.saturating_sub(1));
    }
}
