//! App state type

use std::sync::Arc;

use jet_types::auth_adapter::AuthAdapter;
use jet_types::meta_adapter::MetaAdapter;

use crate::registry::ModelRegistry;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub auth_adapter: Arc<dyn AuthAdapter>,
	pub meta_adapter: Arc<dyn MetaAdapter>,

	/// Lookup models, frozen at startup
	pub models: ModelRegistry,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub auth_adapter: Option<Arc<dyn AuthAdapter>>,
	pub meta_adapter: Option<Arc<dyn MetaAdapter>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self { listen: "127.0.0.1:8080".into() }
	}
}

// vim: ts=4
