//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Bookmarks
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS bookmarks (
			bookmark_id integer PRIMARY KEY AUTOINCREMENT,
			user_id integer NOT NULL,
			url text NOT NULL,
			title text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookmarks_user ON bookmarks (user_id)")
		.execute(&mut *tx)
		.await?;

	// Pinned applications. (user_id, app_label) is not unique, any matching
	// row means "pinned".
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS pinned_apps (
			pin_id integer PRIMARY KEY AUTOINCREMENT,
			user_id integer NOT NULL,
			app_label text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_pinned_apps_user_app ON pinned_apps (user_id, app_label)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
