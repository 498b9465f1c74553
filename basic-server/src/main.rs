use std::{env, path, sync::Arc};

use jet::auth_adapter::{AuthAdapter, CreateUserData};
use jet::prelude::*;
use jet::worker::WorkerPool;
use jet_auth_adapter_sqlite::AuthAdapterSqlite;
use jet_meta_adapter_sqlite::{MetaAdapterSqlite, TableModelSpec};

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub admin_user: Option<String>,
	pub admin_password: Option<String>,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			admin_user: env::var("ADMIN_USER").ok(),
			admin_password: env::var("ADMIN_PASSWORD").ok(),
		}
	}
}

/// Creates the bootstrap superuser unless it already exists
async fn ensure_admin(auth: &dyn AuthAdapter, username: &str, password: &str) -> ClResult<()> {
	match auth.read_user_id(username).await {
		Ok(_) => Ok(()),
		Err(Error::NotFound) => {
			let user_id = auth
				.create_user(&CreateUserData {
					username,
					password: Some(password),
					is_active: true,
					is_staff: true,
					is_superuser: true,
				})
				.await?;
			info!(user_id = %user_id, username = %username, "Created admin user");
			Ok(())
		}
		Err(err) => Err(err),
	}
}

#[tokio::main]
async fn main() -> ClResult<()> {
	let config = Config::from_env();
	let mut builder = jet::AppBuilder::new();

	let worker = Arc::new(WorkerPool::new(1, 2));
	let auth_adapter =
		Arc::new(AuthAdapterSqlite::new(worker, &config.db_dir).await?);
	let meta_adapter = Arc::new(MetaAdapterSqlite::new(&config.db_dir).await?);

	if let (Some(user), Some(password)) = (&config.admin_user, &config.admin_password) {
		ensure_admin(auth_adapter.as_ref(), user, password).await?;
	}

	let bookmark_model = meta_adapter.table_model(
		TableModelSpec::new("jet", "bookmark", "bookmarks")
			.pk("bookmark_id")
			.label("title")
			.search_fields(&["title", "url"]),
	)?;
	let pin_model = meta_adapter.table_model(
		TableModelSpec::new("jet", "pinnedapplication", "pinned_apps")
			.pk("pin_id")
			.label("app_label")
			.search_fields(&["app_label"]),
	)?;

	builder
		.listen(config.listen)
		.auth_adapter(auth_adapter)
		.meta_adapter(meta_adapter)
		.model(Arc::new(bookmark_model))?
		.model(Arc::new(pin_model))?;
	builder.run().await
}

// vim: ts=4
