//! Password login and access token handling

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use sqlx::{Row, SqlitePool};

use crate::{crypto, utils::*, variable};
use jet::{auth_adapter::*, prelude::*, worker::WorkerPool};

const JWT_SECRET_VAR: &str = "jwt_secret";

/// Validate an access token (JWT) and return the user it was issued for
pub(crate) fn validate_access_token(jwt_secret: &DecodingKey, token: &str) -> ClResult<UserId> {
	let token_data = decode::<AccessToken>(token, jwt_secret, &Validation::new(Algorithm::HS256))
		.map_err(|_| Error::Unauthorized)?;

	Ok(token_data.claims.sub)
}

/// Get or generate the JWT secret for HS256 signing
pub(crate) async fn ensure_jwt_secret(db: &SqlitePool) -> ClResult<String> {
	if let Some(secret) = variable::read_var(db, JWT_SECRET_VAR).await? {
		return Ok(secret.into());
	}

	// 32 random bytes, base64 encoded
	use base64::Engine;
	use rand::Rng;
	let mut secret_bytes = [0u8; 32];
	let mut rng = rand::rng();
	rng.fill_bytes(&mut secret_bytes);
	let secret_str = base64::engine::general_purpose::STANDARD.encode(secret_bytes);

	variable::update_var(db, JWT_SECRET_VAR, &secret_str).await?;

	info!("Generated new JWT secret");
	Ok(secret_str)
}

/// Check a user's password and issue an access token
///
/// Unknown users, users without a password and inactive users all fail with
/// `Unauthorized`, same as a wrong password.
pub(crate) async fn check_password(
	db: &SqlitePool,
	worker: &WorkerPool,
	username: &str,
	password: &str,
	jwt_secret_str: &str,
) -> ClResult<AuthLogin> {
	let res = sqlx::query("SELECT user_id, password, is_active FROM users WHERE username = ?1")
		.bind(username)
		.fetch_one(db)
		.await;

	let (user_id, password_hash, is_active) = match map_res(res, |row| {
		Ok((
			UserId(row.try_get("user_id")?),
			row.try_get::<Option<Box<str>>, _>("password")?,
			row.try_get::<bool, _>("is_active")?,
		))
	}) {
		Ok(row) => row,
		Err(Error::NotFound) => {
			debug!(username = %username, "Login attempt for unknown user");
			return Err(Error::Unauthorized);
		}
		Err(err) => return Err(err),
	};

	let Some(password_hash) = password_hash else {
		return Err(Error::Unauthorized);
	};
	crypto::check_password(worker, password, password_hash).await?;
	if !is_active {
		warn!(user_id = %user_id, "Login attempt by inactive user");
		return Err(Error::Unauthorized);
	}

	let access_token = AccessToken { sub: user_id, exp: Timestamp::from_now(ACCESS_TOKEN_EXPIRY) };
	let token = crypto::generate_access_token(worker, access_token, jwt_secret_str.into()).await?;

	Ok(AuthLogin { user_id, username: username.into(), token })
}


// vim: ts=4
