//! Pinned application storage

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use jet::{meta_adapter::PinnedApplication, prelude::*};

fn pin_from_row(row: &SqliteRow) -> Result<PinnedApplication, sqlx::Error> {
	Ok(PinnedApplication {
		pin_id: row.try_get("pin_id")?,
		user_id: UserId(row.try_get("user_id")?),
		app_label: row.try_get("app_label")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn read(
	db: &SqlitePool,
	user_id: UserId,
	app_label: &str,
) -> ClResult<Option<PinnedApplication>> {
	let row = sqlx::query(
		"SELECT pin_id, user_id, app_label, created_at FROM pinned_apps
		WHERE user_id = ?1 AND app_label = ?2 ORDER BY pin_id LIMIT 1",
	)
	.bind(user_id.0)
	.bind(app_label)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	row.as_ref().map(pin_from_row).transpose().inspect_err(inspect).or(Err(Error::DbError))
}

pub(crate) async fn create(
	db: &SqlitePool,
	user_id: UserId,
	app_label: &str,
) -> ClResult<PinnedApplication> {
	let res = sqlx::query(
		"INSERT INTO pinned_apps (user_id, app_label) VALUES (?1, ?2)
		RETURNING pin_id, user_id, app_label, created_at",
	)
	.bind(user_id.0)
	.bind(app_label)
	.fetch_one(db)
	.await;

	map_res(res, pin_from_row)
}

pub(crate) async fn delete(db: &SqlitePool, pin_id: i64) -> ClResult<()> {
	let res = sqlx::query("DELETE FROM pinned_apps WHERE pin_id = ?1")
		.bind(pin_id)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn list(db: &SqlitePool, user_id: UserId) -> ClResult<Vec<PinnedApplication>> {
	let rows = sqlx::query(
		"SELECT pin_id, user_id, app_label, created_at FROM pinned_apps
		WHERE user_id = ?1 ORDER BY pin_id",
	)
	.bind(user_id.0)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	collect_res(rows.iter().map(pin_from_row))
}

// vim: ts=4
