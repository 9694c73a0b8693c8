//! transport
//!
//! Abstraction for the networking capability the loader runs on.
//!
//! # Architecture
//!
//! The `Transport` trait defines a single asynchronous GET. The loader holds
//! a transport behind `Arc<dyn Transport>` and never imports a concrete
//! implementation, so the same loader runs over real HTTP or a scripted mock.
//!
//! # Modules
//!
//! - `traits`: Core `Transport` trait, `Completion` and `ReadyState`
//! - [`http`]: reqwest-backed implementation
//! - [`mock`]: Mock implementation for deterministic testing

pub mod http;
pub mod mock;
mod traits;

pub use http::HttpTransport;
pub use traits::*;
