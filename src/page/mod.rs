//! page
//!
//! Abstraction for the document the loader writes into.
//!
//! # Modules
//!
//! - `traits`: Core `Page` trait and `PageError`
//! - [`memory`]: In-memory page with registered elements
//! - [`sink`]: Single-region pages rendered to a writer or a file

pub mod memory;
pub mod sink;
mod traits;

pub use memory::MemoryPage;
pub use sink::{FilePage, WriterPage};
pub use traits::*;
