//! Password login

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	username: Option<String>,
	password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
	pub token: Box<str>,
	pub user_id: UserId,
	pub username: Box<str>,
}

/// POST /api/auth/login - Exchange a username and password for an access token
pub async fn post_login(
	State(app): State<App>,
	Json(req): Json<LoginRequest>,
) -> ClResult<Json<LoginResponse>> {
	let (Some(username), Some(password)) = (req.username, req.password) else {
		return Err(Error::ValidationError("username and password are required".into()));
	};

	let login = app.auth_adapter.check_password(username.trim(), &password).await.inspect_err(
		|_| {
			warn!(username = %username.trim(), "Failed login attempt");
		},
	)?;
	info!(user_id = %login.user_id, "User logged in");

	Ok(Json(LoginResponse { token: login.token, user_id: login.user_id, username: login.username }))
}

// vim: ts=4
