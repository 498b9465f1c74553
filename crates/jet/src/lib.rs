//! Jet is an admin dashboard backend.
//!
//! # Features
//!
//! - Per-user bookmarks of admin pages
//! - Pinned applications
//! - Autocomplete lookup over registered models, permission checked
//! - Password login with JWT access tokens
//!
//! Storage is pluggable through the adapter traits in `jet-types`; SQLite
//! implementations live in the `jet-auth-adapter-sqlite` and
//! `jet-meta-adapter-sqlite` crates.

// Re-export shared types and adapter traits from jet-types
pub use jet_types::auth_adapter;
pub use jet_types::error;
pub use jet_types::lookup;
pub use jet_types::meta_adapter;
pub use jet_types::types;
pub use jet_types::worker;

// Feature crate re-exports
pub use jet_admin as admin;
pub use jet_core::registry;

// Local modules
pub mod app;
pub mod auth;
pub mod prelude;
pub mod routes;

pub use app::AppBuilder;

// vim: ts=4
