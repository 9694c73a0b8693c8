//! loader::outcome
//!
//! The completion filter and what the loader did with a request.
//!
//! # Design
//!
//! Only two outcomes exist: the markup was applied, or the request was
//! skipped. Every failure mode (transport error, incomplete body, status
//! other than 200, missing display region) is a skip. Skips are recorded
//! with a reason for logging and tests but are never surfaced to callers of
//! [`ChangesetLoader::load`](super::ChangesetLoader::load).

use crate::page::PageError;
use crate::transport::{Completion, ReadyState, TransportError};

/// The only status that counts as success.
pub const SUCCESS_STATUS: u16 = 200;

/// Whether a completion carries markup that should be applied.
///
/// True only when the body was received in full and the status is exactly
/// 200. Redirect targets, 2xx statuses other than 200, and partial bodies
/// are all rejected.
pub fn should_apply(completion: &Completion) -> bool {
    completion.ready_state == ReadyState::Done && completion.status == SUCCESS_STATUS
}

/// Why a request did not update the display region.
#[derive(Debug)]
pub enum SkipReason {
    /// The transport failed before a response arrived.
    Transport(TransportError),
    /// The response never reached its final state.
    Incomplete(ReadyState),
    /// The response completed with a status other than 200.
    Status(u16),
    /// The display region could not be written.
    Page(PageError),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Transport(e) => write!(f, "{}", e),
            SkipReason::Incomplete(state) => write!(f, "response stopped at {}", state),
            SkipReason::Status(status) => write!(f, "status {}", status),
            SkipReason::Page(e) => write!(f, "{}", e),
        }
    }
}

/// Result of one changeset request.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The response body replaced the display region's content.
    Applied,
    /// Nothing was written.
    Skipped(SkipReason),
}

impl LoadOutcome {
    /// Whether the display region was updated.
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied)
    }

    /// The skip reason, if the request was skipped.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            LoadOutcome::Applied => None,
            LoadOutcome::Skipped(reason) => Some(reason),
        }
    }
}

/// Classify a settled request: either the body to apply or the reason to skip.
pub(crate) fn accept(
    result: Result<Completion, TransportError>,
) -> Result<String, SkipReason> {
    let completion = result.map_err(SkipReason::Transport)?;
    if should_apply(&completion) {
        return Ok(completion.body);
    }
    if !completion.is_done() {
        Err(SkipReason::Incomplete(completion.ready_state))
    } else {
        Err(SkipReason::Status(completion.status))
    }
}
