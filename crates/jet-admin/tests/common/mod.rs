//! Common test utilities and helpers
//!
//! In-memory adapters, mock lookup models and user fixtures shared by the
//! form tests.

#![allow(dead_code)]

pub mod adapters;
pub mod fixtures;

pub use adapters::*;
pub use fixtures::*;

// vim: ts=4
