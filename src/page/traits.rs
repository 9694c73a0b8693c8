//! page::traits
//!
//! Page trait definition for replacing the content of named display regions.

use thiserror::Error;

/// Errors from page operations.
#[derive(Debug, Error)]
pub enum PageError {
    /// No element with the given id exists on the page.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Writing the content to its sink failed.
    #[error("failed to write element '{id}': {source}")]
    Io {
        /// Element id being written
        id: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// A document with named regions whose content can be replaced wholesale.
///
/// Implementations must be `Send + Sync`; completions for overlapping
/// requests may replace the same region from different tasks. Each call
/// replaces the whole content; there are no partial writes.
pub trait Page: Send + Sync {
    /// Replace the content of `element_id` with `markup`.
    ///
    /// # Errors
    ///
    /// - `ElementNotFound` if the page has no such element
    /// - `Io` if the content could not be written to its sink
    fn replace_content(&self, element_id: &str, markup: &str) -> Result<(), PageError>;
}
