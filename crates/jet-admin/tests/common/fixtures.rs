//! Reusable users and registries

use std::sync::Arc;

use jet_core::registry::ModelRegistry;
use jet_types::auth_adapter::AuthCtx;
use jet_types::lookup::LookupModel;
use jet_types::types::UserId;

fn user(user_id: i64, is_staff: bool, perms: &[&str]) -> AuthCtx {
	AuthCtx {
		user_id: UserId(user_id),
		username: format!("user{}", user_id).into(),
		is_active: true,
		is_staff,
		is_superuser: false,
		perms: perms.iter().map(|p| Box::from(*p)).collect(),
	}
}

/// Active staff user holding `perms`
pub fn staff(user_id: i64, perms: &[&str]) -> AuthCtx {
	user(user_id, true, perms)
}

/// Active user without the staff flag, holding `perms`
pub fn non_staff(user_id: i64, perms: &[&str]) -> AuthCtx {
	user(user_id, false, perms)
}

pub fn superuser(user_id: i64) -> AuthCtx {
	AuthCtx { is_superuser: true, ..user(user_id, true, &[]) }
}

pub fn inactive_staff(user_id: i64, perms: &[&str]) -> AuthCtx {
	AuthCtx { is_active: false, ..user(user_id, true, perms) }
}

pub fn registry(models: Vec<Arc<dyn LookupModel>>) -> ModelRegistry {
	let mut registry = ModelRegistry::new();
	for model in models {
		registry.register(model).expect("Failed to register model");
	}
	registry
}

// vim: ts=4
