//! Core infrastructure for the Jet admin backend.
//!
//! Holds the application state shared by all handlers, the registry of
//! lookup-capable models with their content types and permissions, and the
//! authentication middleware and extractors.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod middleware;
pub mod prelude;
pub mod registry;

// Re-export commonly used types
pub use app::{App, AppBuilderOpts, AppState};
pub use extract::{Auth, OptionalAuth};
pub use registry::{ContentType, ModelRegistry, RegisteredModel};

// vim: ts=4
