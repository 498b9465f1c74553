//! Application pin toggle form and endpoints

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use jet_core::extract::OptionalAuth;
use jet_types::auth_adapter::AuthCtx;
use jet_types::meta_adapter::{MetaAdapter, PinnedApplication};

use crate::perm::require_staff;
use crate::prelude::*;

pub const APP_LABEL_MAX_LENGTH: usize = 255;

/// Flips the pinned state of an application for the requester
#[derive(Debug)]
pub struct ToggleApplicationPinForm<'a> {
	pub user: Option<&'a AuthCtx>,
	pub app_label: Option<&'a str>,
}

#[derive(Debug)]
pub struct ValidTogglePin {
	pub user_id: UserId,
	pub app_label: Box<str>,
}

impl ToggleApplicationPinForm<'_> {
	pub fn clean(&self) -> ClResult<ValidTogglePin> {
		let user = require_staff(self.user)?;

		let app_label = self.app_label.map(str::trim).unwrap_or_default();
		if app_label.is_empty() {
			return Err(Error::ValidationError("app_label: This field is required.".into()));
		}
		if app_label.chars().count() > APP_LABEL_MAX_LENGTH {
			return Err(Error::ValidationError(format!(
				"app_label: Ensure this value has at most {} characters.",
				APP_LABEL_MAX_LENGTH
			)));
		}

		Ok(ValidTogglePin { user_id: user.user_id, app_label: app_label.into() })
	}
}

impl ValidTogglePin {
	/// Returns `true` if the application is pinned afterwards.
	///
	/// Read and write are separate statements; two concurrent toggles may
	/// both see "not pinned" and insert two rows.
	pub async fn save(&self, meta: &dyn MetaAdapter) -> ClResult<bool> {
		match meta.read_pinned_application(self.user_id, &self.app_label).await? {
			Some(pin) => {
				meta.delete_pinned_application(pin.pin_id).await?;
				info!(user_id = %self.user_id, app_label = %self.app_label, "Application unpinned");
				Ok(false)
			}
			None => {
				meta.create_pinned_application(self.user_id, &self.app_label).await?;
				info!(user_id = %self.user_id, app_label = %self.app_label, "Application pinned");
				Ok(true)
			}
		}
	}
}

// Handlers //
//**********//
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TogglePinRequest {
	pub app_label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TogglePinResponse {
	pub pinned: bool,
}

/// GET /api/jet/pinned-apps - Applications pinned by the requester
pub async fn list_pinned_apps(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
) -> ClResult<Json<Vec<PinnedApplication>>> {
	let user = require_staff(auth.as_ref())?;
	let pins = app.meta_adapter.list_pinned_applications(user.user_id).await?;
	Ok(Json(pins))
}

/// POST /api/jet/pinned-apps/toggle - Pin or unpin an application
pub async fn post_toggle_pin(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<TogglePinRequest>,
) -> ClResult<Json<TogglePinResponse>> {
	let form = ToggleApplicationPinForm { user: auth.as_ref(), app_label: req.app_label.as_deref() };
	let pinned = form.clean()?.save(app.meta_adapter.as_ref()).await?;
	Ok(Json(TogglePinResponse { pinned }))
}

// vim: ts=4
