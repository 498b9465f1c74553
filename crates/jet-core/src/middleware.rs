//! Authentication middleware

use axum::{
	body::Body,
	extract::State,
	http::{Request, header, response::Response},
	middleware::Next,
};

use crate::extract::Auth;
use crate::prelude::*;

fn bearer_token(req: &Request<Body>) -> Option<&str> {
	req.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
}

/// Attaches the requester's `Auth` if a bearer token is present.
///
/// Requests without an `Authorization` header pass through anonymously. A
/// token that does not validate, or one issued to a deactivated user, is
/// rejected with `Unauthorized`.
pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response<Body>> {
	if req.headers().contains_key(header::AUTHORIZATION) {
		let token = bearer_token(&req).ok_or(Error::Unauthorized)?;
		let user_id = app.auth_adapter.validate_access_token(token).await.map_err(|err| {
			debug!("Access token rejected: {}", err);
			Error::Unauthorized
		})?;
		let auth_ctx = app.auth_adapter.read_auth_ctx(user_id).await.map_err(|err| match err {
			Error::NotFound => Error::Unauthorized,
			err => err,
		})?;
		if !auth_ctx.is_active {
			warn!(user_id = %user_id, "Token presented by inactive user");
			return Err(Error::Unauthorized);
		}

		req.extensions_mut().insert(Auth(auth_ctx));
	}

	Ok(next.run(req).await)
}

// vim: ts=4
