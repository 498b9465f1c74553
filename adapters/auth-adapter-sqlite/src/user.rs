//! User records and permission grants

use sqlx::{Row, SqlitePool};

use crate::{crypto, utils::*};
use jet::{auth_adapter::*, prelude::*, worker::WorkerPool};

pub(crate) async fn create(
	db: &SqlitePool,
	worker: &WorkerPool,
	user: &CreateUserData<'_>,
) -> ClResult<UserId> {
	let username = user.username.trim();
	if username.is_empty() {
		return Err(Error::ValidationError("username is required".into()));
	}

	let password_hash = match user.password {
		Some(password) => Some(crypto::generate_password_hash(worker, password).await?),
		None => None,
	};

	let res = sqlx::query(
		"INSERT INTO users (username, password, is_active, is_staff, is_superuser)
		VALUES (?1, ?2, ?3, ?4, ?5) RETURNING user_id",
	)
	.bind(username)
	.bind(password_hash.as_deref())
	.bind(user.is_active)
	.bind(user.is_staff)
	.bind(user.is_superuser)
	.fetch_one(db)
	.await;

	match res {
		Ok(row) => {
			let user_id = UserId(row.try_get("user_id").inspect_err(inspect).or(Err(Error::DbError))?);
			info!(user_id = %user_id, username = %username, "Created user");
			Ok(user_id)
		}
		Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
			Err(Error::ValidationError(format!("username '{}' is already taken", username)))
		}
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

pub(crate) async fn read_id(db: &SqlitePool, username: &str) -> ClResult<UserId> {
	let res = sqlx::query("SELECT user_id FROM users WHERE username = ?1")
		.bind(username)
		.fetch_one(db)
		.await;

	map_res(res, |row| row.try_get("user_id").map(UserId))
}

pub(crate) async fn read_auth_ctx(db: &SqlitePool, user_id: UserId) -> ClResult<AuthCtx> {
	let res = sqlx::query(
		"SELECT username, is_active, is_staff, is_superuser FROM users WHERE user_id = ?1",
	)
	.bind(user_id.0)
	.fetch_one(db)
	.await;

	let (username, is_active, is_staff, is_superuser) = map_res(res, |row| {
		Ok((
			row.try_get::<Box<str>, _>("username")?,
			row.try_get::<bool, _>("is_active")?,
			row.try_get::<bool, _>("is_staff")?,
			row.try_get::<bool, _>("is_superuser")?,
		))
	})?;

	let rows = sqlx::query("SELECT perm FROM user_perms WHERE user_id = ?1 ORDER BY perm")
		.bind(user_id.0)
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	let perms = collect_res(rows.iter().map(|row| row.try_get::<Box<str>, _>("perm")))?;

	Ok(AuthCtx {
		user_id,
		username,
		is_active,
		is_staff,
		is_superuser,
		perms: perms.into_boxed_slice(),
	})
}

pub(crate) async fn grant_permission(db: &SqlitePool, user_id: UserId, perm: &str) -> ClResult<()> {
	// Fails with NotFound for unknown users
	read_username(db, user_id).await?;

	sqlx::query("INSERT OR IGNORE INTO user_perms (user_id, perm) VALUES (?1, ?2)")
		.bind(user_id.0)
		.bind(perm)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	info!(user_id = %user_id, perm = %perm, "Granted permission");
	Ok(())
}

pub(crate) async fn revoke_permission(
	db: &SqlitePool,
	user_id: UserId,
	perm: &str,
) -> ClResult<()> {
	sqlx::query("DELETE FROM user_perms WHERE user_id = ?1 AND perm = ?2")
		.bind(user_id.0)
		.bind(perm)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	info!(user_id = %user_id, perm = %perm, "Revoked permission");
	Ok(())
}

async fn read_username(db: &SqlitePool, user_id: UserId) -> ClResult<Box<str>> {
	let res = sqlx::query("SELECT username FROM users WHERE user_id = ?1")
		.bind(user_id.0)
		.fetch_one(db)
		.await;

	map_res(res, |row| row.try_get("username"))
}

// vim: ts=4
