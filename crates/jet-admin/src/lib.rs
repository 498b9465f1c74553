//! Admin dashboard endpoints: bookmarks, pinned applications and model lookup.
//!
//! Each endpoint is backed by a form. A form is built from the request input
//! and the requester, `clean` validates it (authorization first, then fields)
//! and yields a validated value whose `save`/`lookup` performs the operation.

pub mod bookmark;
pub mod lookup;
pub mod perm;
pub mod pin;

mod prelude;

// vim: ts=4
