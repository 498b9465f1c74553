pub use crate::app::App;
pub use jet_types::error::{ClResult, Error};
pub use jet_types::types::{Timestamp, UserId};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
