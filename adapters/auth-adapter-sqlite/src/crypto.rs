const BCRYPT_COST: u32 = 10;

use jet::{auth_adapter::AccessToken, prelude::*, worker::WorkerPool};

fn generate_password_hash_sync(password: Box<str>) -> ClResult<Box<str>> {
	let hash = bcrypt::hash(password.as_ref(), BCRYPT_COST)
		.map_err(|err| Error::Internal(format!("password hashing failed: {}", err)))?;

	Ok(hash.into())
}

/// Hashing for new accounts runs on the normal queue, behind logins
pub async fn generate_password_hash(worker: &WorkerPool, password: &str) -> ClResult<Box<str>> {
	let password: Box<str> = password.into();
	worker.try_run(move || generate_password_hash_sync(password)).await
}

fn check_password_sync(password: Box<str>, password_hash: Box<str>) -> ClResult<()> {
	let res =
		bcrypt::verify(password.as_ref(), &password_hash).map_err(|_| Error::Unauthorized)?;
	if res { Ok(()) } else { Err(Error::Unauthorized) }
}

pub async fn check_password(
	worker: &WorkerPool,
	password: &str,
	password_hash: Box<str>,
) -> ClResult<()> {
	let password: Box<str> = password.into();
	worker.try_run_immed(move || check_password_sync(password, password_hash)).await
}

fn generate_access_token_sync(access_token: &AccessToken, jwt_secret: &str) -> ClResult<Box<str>> {
	let token = jsonwebtoken::encode(
		&jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
		access_token,
		&jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_bytes()),
	)
	.inspect_err(|err| error!("encode err: {}", err))
	.map_err(|_| Error::Internal("token signing failed".into()))?
	.into();

	Ok(token)
}

pub async fn generate_access_token(
	worker: &WorkerPool,
	access_token: AccessToken,
	jwt_secret: Box<str>,
) -> ClResult<Box<str>> {
	worker.try_run_immed(move || generate_access_token_sync(&access_token, &jwt_secret)).await
}


// vim: ts=4
