//! Client library for the ideaboard community backend.
//!
//! Everything authoritative (persistence, authentication, score
//! aggregation, the follower graph) lives behind an HTTP API; this crate is
//! the typed client and the per-view workflow logic a presentation layer
//! drives. Views hold their own transient state and nothing is cached
//! across them; dropping a workflow value drops its in-flight futures with
//! it.

pub mod api_methods;
pub mod config;
pub mod error;
pub mod session;
pub mod workflows;

pub use api_methods::ApiMethods;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use session::{Session, Viewer};
