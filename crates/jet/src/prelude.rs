pub use jet_core::prelude::*;

// vim: ts=4
