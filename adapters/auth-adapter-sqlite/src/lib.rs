//! SQLite implementation of the Jet `AuthAdapter`.
//!
//! Stores users, their granted permission codes and the JWT signing secret.
//! Password hashing and token signing run on the shared worker pool.

use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use sqlx::sqlite::{self, SqlitePool};
use std::{fmt::Debug, path::Path, sync::Arc};

use jet::{auth_adapter::*, prelude::*, worker::WorkerPool};

mod auth;
mod crypto;
mod schema;
mod user;
mod utils;
mod variable;

pub struct AuthAdapterSqlite {
	db: SqlitePool,
	worker: Arc<WorkerPool>,
	jwt_secret_str: Box<str>,
	jwt_secret: DecodingKey,
}

impl Debug for AuthAdapterSqlite {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AuthAdapterSqlite").field("db", &self.db).finish_non_exhaustive()
	}
}

impl AuthAdapterSqlite {
	/// Opens (or creates) `auth.db` inside the `path` directory
	pub async fn new(worker: Arc<WorkerPool>, path: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(path.as_ref()).await?;

		let db_path = path.as_ref().join("auth.db");
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

		let jwt_secret_str = auth::ensure_jwt_secret(&db).await?;
		let jwt_secret = DecodingKey::from_secret(jwt_secret_str.as_bytes());

		Ok(Self { db, worker, jwt_secret_str: jwt_secret_str.into(), jwt_secret })
	}
}

#[async_trait]
impl AuthAdapter for AuthAdapterSqlite {
	async fn create_user(&self, user: &CreateUserData<'_>) -> ClResult<UserId> {
		user::create(&self.db, &self.worker, user).await
	}

	async fn read_user_id(&self, username: &str) -> ClResult<UserId> {
		user::read_id(&self.db, username).await
	}

	async fn read_auth_ctx(&self, user_id: UserId) -> ClResult<AuthCtx> {
		user::read_auth_ctx(&self.db, user_id).await
	}

	async fn check_password(&self, username: &str, password: &str) -> ClResult<AuthLogin> {
		auth::check_password(&self.db, &self.worker, username, password, &self.jwt_secret_str).await
	}

	async fn validate_access_token(&self, token: &str) -> ClResult<UserId> {
		auth::validate_access_token(&self.jwt_secret, token)
	}

	async fn grant_permission(&self, user_id: UserId, perm: &str) -> ClResult<()> {
		user::grant_permission(&self.db, user_id, perm).await
	}

	async fn revoke_permission(&self, user_id: UserId, perm: &str) -> ClResult<()> {
		user::revoke_permission(&self.db, user_id, perm).await
	}
}

// vim: ts=4
