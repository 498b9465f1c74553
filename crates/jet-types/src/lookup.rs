//! Model lookup capabilities.
//!
//! A [`LookupModel`] is a model type that can be searched from the admin
//! autocomplete endpoint. It exposes up to three optional hooks:
//!
//! - a search query hook (`has_search_query` / `search_query`) that builds the
//!   whole queryset itself,
//! - a list of search fields (`search_fields`) that are OR-combined into a
//!   case-insensitive "contains" filter by the model manager
//!   (`filter_contains`),
//! - a post-filter (`has_search_filter` / `search_filter`) applied in-process
//!   to a page of results.
//!
//! Defining both the query hook and search fields is a configuration error,
//! reported by [`resolve_search_strategy`].

use std::collections::HashSet;
use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use crate::auth_adapter::AuthCtx;
use crate::prelude::*;

/// A single search result: primary key and display label
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LookupItem {
	pub id: i64,
	pub text: String,
}

impl LookupItem {
	pub fn new(id: i64, text: impl Into<String>) -> Self {
		Self { id, text: text.into() }
	}
}

/// A lazily evaluated, distinct result set.
///
/// Implementations must return each primary key at most once and keep a
/// stable order between `slice` calls.
#[async_trait]
pub trait QuerySet: Send + Sync {
	/// Total number of rows, ignoring pagination
	async fn count(&self) -> ClResult<u64>;

	/// Rows in `[offset, offset + limit)`
	async fn slice(&self, offset: u64, limit: u64) -> ClResult<Vec<LookupItem>>;
}

/// The "none" queryset
#[derive(Debug, Default)]
pub struct EmptyQuerySet;

#[async_trait]
impl QuerySet for EmptyQuerySet {
	async fn count(&self) -> ClResult<u64> {
		Ok(0)
	}

	async fn slice(&self, _offset: u64, _limit: u64) -> ClResult<Vec<LookupItem>> {
		Ok(Vec::new())
	}
}

/// In-memory queryset over already materialized items
#[derive(Debug, Default)]
pub struct VecQuerySet {
	items: Vec<LookupItem>,
}

impl VecQuerySet {
	/// Keeps the first occurrence of every id
	pub fn new(items: impl IntoIterator<Item = LookupItem>) -> Self {
		let mut seen = HashSet::new();
		let items = items.into_iter().filter(|item| seen.insert(item.id)).collect();
		Self { items }
	}
}

#[async_trait]
impl QuerySet for VecQuerySet {
	async fn count(&self) -> ClResult<u64> {
		Ok(self.items.len() as u64)
	}

	async fn slice(&self, offset: u64, limit: u64) -> ClResult<Vec<LookupItem>> {
		let offset = usize::try_from(offset).unwrap_or(usize::MAX);
		let limit = usize::try_from(limit).unwrap_or(usize::MAX);
		Ok(self.items.iter().skip(offset).take(limit).cloned().collect())
	}
}

#[async_trait]
pub trait LookupModel: Debug + Send + Sync {
	fn app_label(&self) -> &str;

	/// Lowercase model name, used in permission codenames
	fn model_name(&self) -> &str;

	fn verbose_name(&self) -> &str {
		self.model_name()
	}

	/// Codenames declared in addition to the default add/change/delete/view
	fn extra_permissions(&self) -> Vec<Box<str>> {
		Vec::new()
	}

	/// Fields searched with a case-insensitive "contains" match
	fn search_fields(&self) -> Option<Vec<Box<str>>> {
		None
	}

	fn has_search_query(&self) -> bool {
		false
	}

	/// Builds a distinct queryset for `query` on behalf of `user`
	async fn search_query(&self, _query: &str, _user: &AuthCtx) -> ClResult<Box<dyn QuerySet>> {
		Ok(Box::new(EmptyQuerySet))
	}

	/// OR-combined case-insensitive contains filter over `fields`, distinct
	async fn filter_contains(&self, fields: &[Box<str>], query: &str)
	-> ClResult<Box<dyn QuerySet>>;

	fn has_search_filter(&self) -> bool {
		false
	}

	/// Post-processes a page of results
	async fn search_filter(&self, items: Vec<LookupItem>) -> ClResult<Vec<LookupItem>> {
		Ok(items)
	}
}

/// How a model answers a free-text search
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStrategy {
	Query,
	Fields(Box<[Box<str>]>),
	Unsupported,
}

pub fn resolve_search_strategy(model: &dyn LookupModel) -> ClResult<SearchStrategy> {
	match (model.has_search_query(), model.search_fields()) {
		(true, Some(_)) => Err(Error::ConfigError(format!(
			"The model {}.{} cannot have both autocomplete search fields and an autocomplete search query",
			model.app_label(),
			model.model_name()
		))),
		(true, None) => Ok(SearchStrategy::Query),
		(false, Some(fields)) => Ok(SearchStrategy::Fields(fields.into_boxed_slice())),
		(false, None) => Ok(SearchStrategy::Unsupported),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug)]
	struct Probe {
		query: bool,
		fields: Option<Vec<Box<str>>>,
	}

	#[async_trait]
	impl LookupModel for Probe {
		fn app_label(&self) -> &str {
			"shop"
		}
		fn model_name(&self) -> &str {
			"product"
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

	#[test]
	fn test_strategy_both_hooks_is_config_error() {
		let model = Probe { query: true, fields: Some(vec!["name".into()]) };
		assert!(matches!(resolve_search_strategy(&model), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_strategy_single_hook() {
		let model = Probe { query: true, fields: None };
		assert!(matches!(resolve_search_strategy(&model), Ok(SearchStrategy::Query)));

		let model = Probe { query: false, fields: Some(vec!["name".into()]) };
		match resolve_search_strategy(&model) {
			Ok(SearchStrategy::Fields(fields)) => {
				assert_eq!(fields.len(), 1);
				assert_eq!(&*fields[0], "name");
			}
			other => panic!("unexpected strategy: {:?}", other),
		}
	}

	#[test]
	fn test_strategy_no_hook() {
		let model = Probe { query: false, fields: None };
		assert!(matches!(resolve_search_strategy(&model), Ok(SearchStrategy::Unsupported)));
	}

	#[tokio::test]
	async fn test_vec_queryset_dedups_and_slices() {
		let qs = VecQuerySet::new(vec![
			LookupItem::new(1, "a"),
			LookupItem::new(2, "b"),
			LookupItem::new(1, "a again"),
			LookupItem::new(3, "c"),
		]);
		assert_eq!(qs.count().await.ok(), Some(3));
		let page = qs.slice(1, 5).await.unwrap_or_default();
		assert_eq!(page, vec![LookupItem::new(2, "b"), LookupItem::new(3, "c")]);
	}

	#[tokio::test]
	async fn test_empty_queryset() {
		assert_eq!(EmptyQuerySet.count().await.ok(), Some(0));
		assert!(EmptyQuerySet.slice(0, 100).await.unwrap_or_default().is_empty());
	}
}

// vim: ts=4
