//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS vars (
		key text NOT NULL,
		value text NOT NULL,
		created_at INTEGER DEFAULT (unixepoch()),
		updated_at INTEGER DEFAULT (unixepoch()),
		PRIMARY KEY(key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Users
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
			user_id integer PRIMARY KEY AUTOINCREMENT,
			username text NOT NULL,
			password text,
			is_active integer NOT NULL DEFAULT 1,
			is_staff integer NOT NULL DEFAULT 0,
			is_superuser integer NOT NULL DEFAULT 0,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username ON users (username)")
		.execute(&mut *tx)
		.await?;

	// Permission grants, `<app_label>.<codename>`
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_perms (
			user_id integer NOT NULL,
			perm text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			PRIMARY KEY(user_id, perm)
		)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
