//! Adapter that manages users, permission grants and access tokens.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

pub const ACCESS_TOKEN_EXPIRY: i64 = 8 * 3600;

/// Access tokens are used to authenticate users (HS256 JWT claims)
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessToken {
	pub sub: UserId,
	pub exp: Timestamp,
}

/// Context struct for an authenticated user
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub user_id: UserId,
	pub username: Box<str>,
	pub is_active: bool,
	pub is_staff: bool,
	pub is_superuser: bool,
	/// Granted permission codes in `<app_label>.<codename>` form
	pub perms: Box<[Box<str>]>,
}

impl AuthCtx {
	/// Inactive users hold no permission, active superusers hold all of them.
	pub fn has_perm(&self, perm: &str) -> bool {
		if !self.is_active {
			return false;
		}
		self.is_superuser || self.perms.iter().any(|p| p.as_ref() == perm)
	}

	pub fn has_any_perm<S: AsRef<str>>(&self, perms: &[S]) -> bool {
		perms.iter().any(|p| self.has_perm(p.as_ref()))
	}
}

#[derive(Debug)]
pub struct AuthLogin {
	pub user_id: UserId,
	pub username: Box<str>,
	pub token: Box<str>,
}

/// Data needed to create a new user
#[derive(Debug, Default)]
pub struct CreateUserData<'a> {
	pub username: &'a str,
	pub password: Option<&'a str>,
	pub is_active: bool,
	pub is_staff: bool,
	pub is_superuser: bool,
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// Creates a user; fails with `ValidationError` if the username is taken
	async fn create_user(&self, user: &CreateUserData<'_>) -> ClResult<UserId>;

	/// Resolves a username to its id
	async fn read_user_id(&self, username: &str) -> ClResult<UserId>;

	/// Reads the user flags and granted permission codes
	async fn read_auth_ctx(&self, user_id: UserId) -> ClResult<AuthCtx>;

	/// Checks a password and issues an access token
	async fn check_password(&self, username: &str, password: &str) -> ClResult<AuthLogin>;

	/// Validates an access token and returns the user it was issued for
	async fn validate_access_token(&self, token: &str) -> ClResult<UserId>;

	async fn grant_permission(&self, user_id: UserId, perm: &str) -> ClResult<()>;
	async fn revoke_permission(&self, user_id: UserId, perm: &str) -> ClResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn user(is_active: bool, is_superuser: bool, perms: &[&str]) -> AuthCtx {
		AuthCtx {
			user_id: UserId(1),
			username: "alice".into(),
			is_active,
			is_staff: true,
			is_superuser,
			perms: perms.iter().map(|p| Box::from(*p)).collect(),
		}
	}

	#[test]
	fn test_has_perm_granted() {
		let u = user(true, false, &["jet.change_bookmark"]);
		assert!(u.has_perm("jet.change_bookmark"));
		assert!(!u.has_perm("jet.view_bookmark"));
	}

	#[test]
	fn test_superuser_has_every_perm() {
		let u = user(true, true, &[]);
		assert!(u.has_perm("shop.view_order"));
	}

	#[test]
	fn test_inactive_user_has_no_perm() {
		let u = user(false, true, &["jet.change_bookmark"]);
		assert!(!u.has_perm("jet.change_bookmark"));
	}

	#[test]
	fn test_has_any_perm() {
		let u = user(true, false, &["shop.view_order"]);
		assert!(u.has_any_perm(&["shop.change_order", "shop.view_order"]));
		assert!(!u.has_any_perm::<&str>(&[]));
	}
}

// vim: ts=4
