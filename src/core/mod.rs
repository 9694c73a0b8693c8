//! core
//!
//! Configuration and input handling shared by the CLI and embedders.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading
//! - [`query`] - Normalization of user input into a changeset query

pub mod config;
pub mod query;
