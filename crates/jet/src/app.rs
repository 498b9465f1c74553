//! App builder - constructs and runs the Jet application

use std::sync::Arc;

pub use jet_core::app::{Adapters, App, AppBuilderOpts, AppState, VERSION};
use jet_core::registry::ModelRegistry;
use jet_types::auth_adapter::AuthAdapter;
use jet_types::lookup::LookupModel;
use jet_types::meta_adapter::MetaAdapter;

use crate::prelude::*;
use crate::routes;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
	models: ModelRegistry,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed (tests build several apps)
		if let Err(err) = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init()
		{
			debug!("Tracing subscriber already installed: {}", err);
		}
		AppBuilder {
			opts: AppBuilderOpts::default(),
			adapters: Adapters { auth_adapter: None, meta_adapter: None },
			models: ModelRegistry::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}

	// Adapters
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self {
		self.adapters.auth_adapter = Some(auth_adapter);
		self
	}
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.adapters.meta_adapter = Some(meta_adapter);
		self
	}

	/// Registers a lookup model.
	///
	/// Fails with `ConfigError` if the model defines both a search query hook
	/// and search fields, or if it is already registered.
	pub fn model(&mut self, model: Arc<dyn LookupModel>) -> ClResult<&mut Self> {
		let registered = self.models.register(model).inspect_err(|err| {
			error!("FATAL: Invalid lookup model: {}", err);
		})?;
		debug!(
			model = %registered.label(),
			content_type = registered.content_type.id,
			"Registered lookup model"
		);
		Ok(self)
	}

	/// Assembles the application state without starting a listener
	pub fn build(self) -> ClResult<App> {
		let Some(auth_adapter) = self.adapters.auth_adapter else {
			error!("FATAL: No auth adapter configured");
			return Err(Error::Internal("No auth adapter configured".into()));
		};
		let Some(meta_adapter) = self.adapters.meta_adapter else {
			error!("FATAL: No meta adapter configured");
			return Err(Error::Internal("No meta adapter configured".into()));
		};

		Ok(Arc::new(AppState {
			opts: self.opts,
			auth_adapter,
			meta_adapter,
			models: self.models,
		}))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("     _      _");
		info!("    | | ___| |_");
		info!(" _  | |/ _ \\ __|");
		info!("| |_| |  __/ |_");
		info!(" \\___/ \\___|\\__|");
		info!("V{}", VERSION);
		info!("");

		let app = self.build()?;
		info!("Registered {} lookup models", app.models.len());

		let router = routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await.map_err(|e| {
			error!("FATAL: Cannot listen on {}: {}", app.opts.listen, e);
			e
		})?;
		info!("Listening on HTTP {}", app.opts.listen);

		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
