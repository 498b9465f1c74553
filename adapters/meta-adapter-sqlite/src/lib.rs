//! SQLite implementation of the Jet `MetaAdapter`.
//!
//! Also provides [`SqliteTableModel`], a `LookupModel` over any table of the
//! same database.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use jet::{meta_adapter::*, prelude::*};

mod bookmark;
mod model;
mod pinned_app;
mod schema;
mod utils;

pub use model::{SqliteQuerySet, SqliteTableModel, TableModelSpec};

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	/// Opens (or creates) `meta.db` inside the `path` directory
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(path.as_ref()).await?;

		let db_path = path.as_ref().join("meta.db");
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(&db_path)
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}

	/// Builds a lookup model over a table of this database
	pub fn table_model(&self, spec: TableModelSpec) -> ClResult<SqliteTableModel> {
		SqliteTableModel::new(self.db.clone(), spec)
	}

	/// The underlying pool, for applications that keep their own tables here
	pub fn pool(&self) -> &SqlitePool {
		&self.db
	}
}

#[async_trait]
impl MetaAdapter for MetaAdapterSqlite {
	// Bookmarks
	//***********
	async fn create_bookmark(&self, user_id: UserId, url: &str, title: &str) -> ClResult<Bookmark> {
		bookmark::create(&self.db, user_id, url, title).await
	}

	async fn read_bookmark(&self, bookmark_id: i64) -> ClResult<Bookmark> {
		bookmark::read(&self.db, bookmark_id).await
	}

	async fn list_bookmarks(&self, user_id: UserId) -> ClResult<Vec<Bookmark>> {
		bookmark::list(&self.db, user_id).await
	}

	async fn delete_bookmark(&self, bookmark_id: i64) -> ClResult<()> {
		bookmark::delete(&self.db, bookmark_id).await
	}

	// Pinned applications
	//*********************
	async fn read_pinned_application(
		&self,
		user_id: UserId,
		app_label: &str,
	) -> ClResult<Option<PinnedApplication>> {
		pinned_app::read(&self.db, user_id, app_label).await
	}

	async fn create_pinned_application(
		&self,
		user_id: UserId,
		app_label: &str,
	) -> ClResult<PinnedApplication> {
		pinned_app::create(&self.db, user_id, app_label).await
	}

	async fn delete_pinned_application(&self, pin_id: i64) -> ClResult<()> {
		pinned_app::delete(&self.db, pin_id).await
	}

	async fn list_pinned_applications(&self, user_id: UserId) -> ClResult<Vec<PinnedApplication>> {
		pinned_app::list(&self.db, user_id).await
	}
}

// vim: ts=4
