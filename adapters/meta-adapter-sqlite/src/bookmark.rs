//! Bookmark storage

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use jet::{meta_adapter::Bookmark, prelude::*};

fn bookmark_from_row(row: &SqliteRow) -> Result<Bookmark, sqlx::Error> {
	Ok(Bookmark {
		bookmark_id: row.try_get("bookmark_id")?,
		user_id: UserId(row.try_get("user_id")?),
		url: row.try_get("url")?,
		title: row.try_get("title")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(
	db: &SqlitePool,
	user_id: UserId,
	url: &str,
	title: &str,
) -> ClResult<Bookmark> {
	let res = sqlx::query(
		"INSERT INTO bookmarks (user_id, url, title) VALUES (?1, ?2, ?3)
		RETURNING bookmark_id, user_id, url, title, created_at",
	)
	.bind(user_id.0)
	.bind(url)
	.bind(title)
	.fetch_one(db)
	.await;

	map_res(res, bookmark_from_row)
}

pub(crate) async fn read(db: &SqlitePool, bookmark_id: i64) -> ClResult<Bookmark> {
	let res = sqlx::query(
		"SELECT bookmark_id, user_id, url, title, created_at FROM bookmarks WHERE bookmark_id = ?1",
	)
	.bind(bookmark_id)
	.fetch_one(db)
	.await;

	map_res(res, bookmark_from_row)
}

pub(crate) async fn list(db: &SqlitePool, user_id: UserId) -> ClResult<Vec<Bookmark>> {
	let rows = sqlx::query(
		"SELECT bookmark_id, user_id, url, title, created_at FROM bookmarks
		WHERE user_id = ?1 ORDER BY bookmark_id",
	)
	.bind(user_id.0)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	collect_res(rows.iter().map(bookmark_from_row))
}

pub(crate) async fn delete(db: &SqlitePool, bookmark_id: i64) -> ClResult<()> {
	let res = sqlx::query("DELETE FROM bookmarks WHERE bookmark_id = ?1")
		.bind(bookmark_id)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
