//! changeset-loader - fetch rendered changesets into a display region
//!
//! A revert server renders changesets as HTML fragments at
//! `<server>/changesets/<ids>`. This crate requests such a fragment and, when
//! the server answers with status 200, replaces the content of a display
//! region with it. Every other outcome is silently ignored.
//!
//! # Architecture
//!
//! - [`loader`] - The changeset loader and its completion filter
//! - [`transport`] - Abstraction over the HTTP GET (reqwest, mock)
//! - [`page`] - Abstraction over the document holding the display region
//! - [`core`] - Configuration and query normalization
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - Output formatting
//! - [`logging`] - tracing subscriber setup
//!
//! # Guarantees
//!
//! 1. `load` never blocks and never reports failure to its caller
//! 2. Only a fully received status-200 response touches the display region
//! 3. A write replaces the whole region; there are no partial writes
//! 4. Concurrent requests are not ordered; the last to complete wins

pub mod cli;
pub mod core;
pub mod loader;
pub mod logging;
pub mod page;
pub mod transport;
pub mod ui;
