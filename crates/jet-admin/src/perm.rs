//! Staff and permission checks shared by the forms

use jet_types::auth_adapter::AuthCtx;

use crate::prelude::*;

/// Permission required to create bookmarks
pub const BOOKMARK_CHANGE_PERM: &str = "jet.change_bookmark";

/// Returns the requester if authenticated, active and staff
pub fn require_staff(user: Option<&AuthCtx>) -> ClResult<&AuthCtx> {
	let Some(user) = user else {
		debug!("Anonymous request to a staff endpoint");
		return Err(Error::PermissionDenied);
	};
	if !user.is_active || !user.is_staff {
		warn!(
			user_id = %user.user_id,
			is_active = user.is_active,
			is_staff = user.is_staff,
			"Permission denied - active staff user required"
		);
		return Err(Error::PermissionDenied);
	}
	Ok(user)
}

/// Fails with `PermissionDenied` unless `user` holds `perm`
pub fn require_perm(user: &AuthCtx, perm: &str) -> ClResult<()> {
	if user.has_perm(perm) {
		Ok(())
	} else {
		warn!(user_id = %user.user_id, perm = %perm, "Permission denied - missing permission");
		Err(Error::PermissionDenied)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn user(is_active: bool, is_staff: bool) -> AuthCtx {
		AuthCtx {
			user_id: UserId(1),
			username: "alice".into(),
			is_active,
			is_staff,
			is_superuser: false,
			perms: Box::new([BOOKMARK_CHANGE_PERM.into()]),
		}
	}

	#[test]
	fn test_require_staff() {
		assert!(matches!(require_staff(None), Err(Error::PermissionDenied)));
		assert!(matches!(require_staff(Some(&user(true, false))), Err(Error::PermissionDenied)));
		assert!(matches!(require_staff(Some(&user(false, true))), Err(Error::PermissionDenied)));

		let staff = user(true, true);
		assert_eq!(require_staff(Some(&staff)).map(|u| u.user_id).ok(), Some(UserId(1)));
	}

	#[test]
	fn test_require_perm() {
		let staff = user(true, true);
		assert!(require_perm(&staff, BOOKMARK_CHANGE_PERM).is_ok());
		assert!(matches!(require_perm(&staff, "jet.delete_bookmark"), Err(Error::PermissionDenied)));
	}
}

// vim: ts=4
