//! Server variable storage

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use jet::prelude::*;

pub(crate) async fn read_var(db: &SqlitePool, var: &str) -> ClResult<Option<Box<str>>> {
	let res = sqlx::query("SELECT value FROM vars WHERE key = ?1")
		.bind(var)
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	match res {
		Some(row) => Ok(Some(row.try_get("value").inspect_err(inspect).or(Err(Error::DbError))?)),
		None => Ok(None),
	}
}

pub(crate) async fn update_var(db: &SqlitePool, var: &str, value: &str) -> ClResult<()> {
	sqlx::query(
		"INSERT OR REPLACE INTO vars (key, value, updated_at) VALUES (?1, ?2, unixepoch())",
	)
	.bind(var)
	.bind(value)
	.execute(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;
	Ok(())
}

// vim: ts=4
