//! Model lookup: paginated autocomplete search over registered models

use axum::{
	Json,
	extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

use jet_core::extract::OptionalAuth;
use jet_core::registry::{ModelRegistry, RegisteredModel};
use jet_types::auth_adapter::AuthCtx;
use jet_types::lookup::{EmptyQuerySet, LookupItem, QuerySet, SearchStrategy};

use crate::perm::require_staff;
use crate::prelude::*;

pub const DEFAULT_PAGE_SIZE: u64 = 100;
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Raw lookup parameters. Empty values count as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ModelLookupParams {
	#[serde_as(as = "NoneAsEmptyString")]
	#[serde(default)]
	pub app_label: Option<String>,
	#[serde_as(as = "NoneAsEmptyString")]
	#[serde(default)]
	pub model: Option<String>,
	#[serde_as(as = "NoneAsEmptyString")]
	#[serde(default)]
	pub q: Option<String>,
	#[serde_as(as = "NoneAsEmptyString")]
	#[serde(default)]
	pub page: Option<String>,
	#[serde_as(as = "NoneAsEmptyString")]
	#[serde(default)]
	pub page_size: Option<String>,
	#[serde_as(as = "NoneAsEmptyString")]
	#[serde(default)]
	pub object_id: Option<String>,
}

#[derive(Debug)]
pub struct ModelLookupForm<'a> {
	pub user: Option<&'a AuthCtx>,
	pub params: ModelLookupParams,
}

#[derive(Debug)]
pub struct ValidModelLookup<'a> {
	pub user: &'a AuthCtx,
	pub model: &'a RegisteredModel,
	/// Trimmed search term, `None` if blank
	pub q: Option<String>,
	pub offset: u64,
	pub limit: u64,
	/// Accepted for compatibility, does not influence the lookup
	pub object_id: Option<i64>,
}

fn required<'p>(name: &str, value: Option<&'p str>) -> ClResult<&'p str> {
	value.ok_or_else(|| Error::ValidationError(format!("{}: This field is required.", name)))
}

fn parse_int<T: std::str::FromStr>(name: &str, value: Option<&str>) -> ClResult<Option<T>> {
	value
		.map(|v| {
			v.trim()
				.parse::<T>()
				.map_err(|_| Error::ValidationError(format!("{}: Enter a whole number.", name)))
		})
		.transpose()
}

impl<'a> ModelLookupForm<'a> {
	pub fn clean(self, registry: &'a ModelRegistry) -> ClResult<ValidModelLookup<'a>> {
		let user = require_staff(self.user)?;
		let params = self.params;

		let app_label = required("app_label", params.app_label.as_deref())?;
		let model_name = required("model", params.model.as_deref())?;

		let page = parse_int::<u64>("page", params.page.as_deref())?.unwrap_or(1);
		if page < 1 {
			return Err(Error::ValidationError(
				"page: Ensure this value is greater than or equal to 1.".into(),
			));
		}
		let limit =
			parse_int::<u64>("page_size", params.page_size.as_deref())?.unwrap_or(DEFAULT_PAGE_SIZE);
		if !(1..=MAX_PAGE_SIZE).contains(&limit) {
			return Err(Error::ValidationError(format!(
				"page_size: Ensure this value is between 1 and {}.",
				MAX_PAGE_SIZE
			)));
		}
		let offset = (page - 1)
			.checked_mul(limit)
			.ok_or_else(|| Error::ValidationError("page: Value is out of range.".into()))?;
		let object_id = parse_int::<i64>("object_id", params.object_id.as_deref())?;

		let Some(model) = registry.get(app_label, model_name) else {
			debug!(app_label = %app_label, model = %model_name, "Lookup of unknown model");
			return Err(Error::ValidationError("model not found".into()));
		};

		if !model.user_can_lookup(user) {
			warn!(
				user_id = %user.user_id,
				model = %model.label(),
				"Permission denied - change or view permission required for lookup"
			);
			return Err(Error::PermissionDenied);
		}

		let q = params.q.map(|q| q.trim().to_owned()).filter(|q| !q.is_empty());

		Ok(ValidModelLookup { user, model, q, offset, limit, object_id })
	}
}

impl ValidModelLookup<'_> {
	async fn queryset(&self) -> ClResult<Box<dyn QuerySet>> {
		let Some(q) = self.q.as_deref() else {
			return Ok(Box::new(EmptyQuerySet));
		};
		match &self.model.strategy {
			SearchStrategy::Query => self.model.model.search_query(q, self.user).await,
			SearchStrategy::Fields(fields) => self.model.model.filter_contains(fields, q).await,
			SearchStrategy::Unsupported => Ok(Box::new(EmptyQuerySet)),
		}
	}

	/// Returns one page of `{id, text}` items and the total match count.
	///
	/// The count is `None` when the model post-filters its results, since the
	/// filtered total is unknown.
	pub async fn lookup(&self) -> ClResult<(Vec<LookupItem>, Option<u64>)> {
		let qs = self.queryset().await?;
		let items = qs.slice(self.offset, self.limit).await?;

		if self.model.model.has_search_filter() {
			let items = self.model.model.search_filter(items).await?;
			Ok((items, None))
		} else {
			let count = qs.count().await?;
			Ok((items, Some(count)))
		}
	}
}

// Handlers //
//**********//
#[derive(Debug, Serialize)]
pub struct ModelLookupResponse {
	pub items: Vec<LookupItem>,
	pub count: Option<u64>,
}

/// GET /api/jet/model-lookup - Autocomplete search over a registered model
pub async fn get_model_lookup(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Query(params): Query<ModelLookupParams>,
) -> ClResult<Json<ModelLookupResponse>> {
	let form = ModelLookupForm { user: auth.as_ref(), params };
	let (items, count) = form.clean(&app.models)?.lookup().await?;
	Ok(Json(ModelLookupResponse { items, count }))
}


// vim: ts=4
