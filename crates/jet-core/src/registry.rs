//! Registry of lookup-capable models.
//!
//! Maps `(app_label, model)` pairs to model handles. Every registered model gets
//! a content type with the default `add_`, `change_`, `delete_` and `view_`
//! permission codenames plus the model's extra codenames. The permission
//! codes that grant lookup access are computed once at registration.

use std::collections::HashMap;
use std::sync::Arc;

use jet_types::auth_adapter::AuthCtx;
use jet_types::lookup::{LookupModel, SearchStrategy, resolve_search_strategy};

use crate::prelude::*;

const DEFAULT_PERMISSION_ACTIONS: &[&str] = &["add", "change", "delete", "view"];
const LOOKUP_PERMISSION_PREFIXES: &[&str] = &["change_", "view_"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentType {
	pub id: u32,
	pub app_label: Box<str>,
	pub model: Box<str>,
}

#[derive(Debug)]
pub struct RegisteredModel {
	pub content_type: ContentType,
	/// All permission codenames of the content type
	pub permissions: Box<[Box<str>]>,
	/// `<app_label>.<codename>` codes granting lookup access
	pub lookup_perms: Box<[Box<str>]>,
	pub strategy: SearchStrategy,
	pub model: Arc<dyn LookupModel>,
}

impl RegisteredModel {
	pub fn user_can_lookup(&self, user: &AuthCtx) -> bool {
		user.has_any_perm(&self.lookup_perms[..])
	}

	pub fn label(&self) -> String {
		format!("{}.{}", self.content_type.app_label, self.content_type.model)
	}
}

#[derive(Debug, Default)]
pub struct ModelRegistry {
	models: HashMap<(Box<str>, Box<str>), RegisteredModel>,
}

impl ModelRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, model: Arc<dyn LookupModel>) -> ClResult<&RegisteredModel> {
		let strategy = resolve_search_strategy(model.as_ref())?;

		let app_label: Box<str> = model.app_label().into();
		let model_name: Box<str> = model.model_name().to_lowercase().into();
		if app_label.is_empty() || model_name.is_empty() {
			return Err(Error::ConfigError("Model has an empty app label or model name".into()));
		}
		let key = (app_label.clone(), model_name.clone());
		if self.models.contains_key(&key) {
			return Err(Error::ConfigError(format!(
				"Model {}.{} is registered twice",
				app_label, model_name
			)));
		}

		let mut permissions: Vec<Box<str>> = DEFAULT_PERMISSION_ACTIONS
			.iter()
			.map(|action| format!("{}_{}", action, model_name).into_boxed_str())
			.collect();
		for codename in model.extra_permissions() {
			if !permissions.contains(&codename) {
				permissions.push(codename);
			}
		}
		let lookup_perms = permissions
			.iter()
			.filter(|codename| LOOKUP_PERMISSION_PREFIXES.iter().any(|p| codename.starts_with(p)))
			.map(|codename| format!("{}.{}", app_label, codename).into_boxed_str())
			.collect();

		let content_type = ContentType {
			id: u32::try_from(self.models.len() + 1)
				.map_err(|_| Error::ConfigError("Too many models".into()))?,
			app_label,
			model: model_name,
		};
		debug!(
			content_type_id = content_type.id,
			app_label = %content_type.app_label,
			model = %content_type.model,
			strategy = ?strategy,
			"Registered lookup model"
		);

		let registered = self.models.entry(key).or_insert(RegisteredModel {
			content_type,
			permissions: permissions.into_boxed_slice(),
			lookup_perms,
			strategy,
			model,
		});
		Ok(registered)
	}

	/// App labels match exactly, model names case-insensitively
	pub fn get(&self, app_label: &str, model: &str) -> Option<&RegisteredModel> {
		self.models.get(&(Box::from(app_label), model.to_lowercase().into_boxed_str()))
	}

	pub fn len(&self) -> usize {
		self.models.len()
	}

	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &RegisteredModel> {
		self.models.values()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use jet_types::lookup::{EmptyQuerySet, QuerySet};

	#[derive(Debug)]
	struct Model {
		app_label: &'static str,
		model_name: &'static str,
		query: bool,
		fields: Option<Vec<Box<str>>>,
		extra: Vec<Box<str>>,
	}

	impl Model {
		fn new(app_label: &'static str, model_name: &'static str) -> Self {
			Self { app_label, model_name, query: false, fields: None, extra: Vec::new() }
		}
	}

	#[async_trait]
	impl LookupModel for Model {
		fn app_label(&self) -> &str {
			self.app_label
		}
		fn model_name(&self) -> &str {
			self.model_name
		}
		fn extra_permissions(&self) -> Vec<Box<str>> {
			self.extra.clone()
		}
		fn search_fields(&self) -> Option<Vec<Box<str>>> {
			self.fields.clone()
		}
		fn has_search_query(&self) -> bool {
			self.query
		}
		async fn filter_contains(
			&self,
			_fields: &[Box<str>],
			_query: &str,
		) -> ClResult<Box<dyn QuerySet>> {
			Ok(Box::new(EmptyQuerySet))
		}
	}

	fn user(perms: &[&str]) -> AuthCtx {
		AuthCtx {
			user_id: UserId(1),
			username: "staff".into(),
			is_active: true,
			is_staff: true,
			is_superuser: false,
			perms: perms.iter().map(|p| Box::from(*p)).collect(),
		}
	}

	#[test]
	fn test_register_computes_permissions() {
		let mut registry = ModelRegistry::new();
		let mut model = Model::new("shop", "Product");
		model.extra = vec!["view_product_prices".into(), "export_product".into()];
		let Ok(registered) = registry.register(Arc::new(model)) else {
			panic!("registration failed");
		};

		assert_eq!(registered.content_type.model.as_ref(), "product");
		assert_eq!(registered.permissions.len(), 6);
		let lookup: Vec<&str> = registered.lookup_perms.iter().map(AsRef::as_ref).collect();
		assert_eq!(
			lookup,
			vec!["shop.change_product", "shop.view_product", "shop.view_product_prices"]
		);
	}

	#[test]
	fn test_get_is_case_insensitive_on_model() {
		let mut registry = ModelRegistry::new();
		assert!(registry.register(Arc::new(Model::new("shop", "product"))).is_ok());

		assert!(registry.get("shop", "Product").is_some());
		assert!(registry.get("shop", "PRODUCT").is_some());
		assert!(registry.get("Shop", "product").is_none());
		assert!(registry.get("shop", "order").is_none());
	}

	#[test]
	fn test_register_rejects_duplicates() {
		let mut registry = ModelRegistry::new();
		assert!(registry.register(Arc::new(Model::new("shop", "product"))).is_ok());
		let res = registry.register(Arc::new(Model::new("shop", "Product")));
		assert!(matches!(res, Err(Error::ConfigError(_))));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_register_rejects_ambiguous_search() {
		let mut registry = ModelRegistry::new();
		let mut model = Model::new("shop", "product");
		model.query = true;
		model.fields = Some(vec!["name".into()]);
		let res = registry.register(Arc::new(model));
		assert!(matches!(res, Err(Error::ConfigError(_))));
		assert!(registry.is_empty());
	}

	#[test]
	fn test_content_type_ids_are_sequential() {
		let mut registry = ModelRegistry::new();
		assert!(registry.register(Arc::new(Model::new("shop", "product"))).is_ok());
		assert!(registry.register(Arc::new(Model::new("shop", "order"))).is_ok());
		let mut ids: Vec<u32> = registry.iter().map(|m| m.content_type.id).collect();
		ids.sort_unstable();
		assert_eq!(ids, vec![1, 2]);
	}

	#[test]
	fn test_user_can_lookup() {
		let mut registry = ModelRegistry::new();
		assert!(registry.register(Arc::new(Model::new("shop", "product"))).is_ok());
		let Some(registered) = registry.get("shop", "product") else {
			panic!("model not registered");
		};

		assert!(registered.user_can_lookup(&user(&["shop.view_product"])));
		assert!(registered.user_can_lookup(&user(&["shop.change_product"])));
		assert!(!registered.user_can_lookup(&user(&["shop.add_product", "shop.delete_product"])));
		assert!(!registered.user_can_lookup(&user(&["other.view_product"])));
	}
}

// vim: ts=4
