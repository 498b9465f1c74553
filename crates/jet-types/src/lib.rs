//! Shared types, adapter traits, and core utilities for the Jet admin backend.
//!
//! This crate contains the foundational types that are shared between the
//! server crates and all adapter implementations, so adapters can be built
//! without depending on the HTTP layer.

pub mod auth_adapter;
pub mod error;
pub mod lookup;
pub mod meta_adapter;
pub mod prelude;
pub mod types;
pub mod worker;

// vim: ts=4
