//! Router assembly

use axum::{
	Router, middleware,
	routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use jet_admin::{bookmark, lookup, pin};
use jet_core::middleware::optional_auth;

use crate::auth;
use crate::prelude::*;

pub fn init(app: App) -> Router {
	let jet_router = Router::new()
		.route("/api/jet/bookmarks", get(bookmark::list_bookmarks).post(bookmark::post_bookmark))
		.route("/api/jet/bookmarks/{bookmark_id}", delete(bookmark::delete_bookmark))
		.route("/api/jet/pinned-apps", get(pin::list_pinned_apps))
		.route("/api/jet/pinned-apps/toggle", post(pin::post_toggle_pin))
		.route("/api/jet/model-lookup", get(lookup::get_model_lookup))
		.route_layer(middleware::from_fn_with_state(app.clone(), optional_auth));

	let public_router = Router::new().route("/api/auth/login", post(auth::post_login));

	Router::new()
		.merge(public_router)
		.merge(jet_router)
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
