//! In-memory adapters and mock lookup models

use async_trait::async_trait;
use parking_lot::Mutex;

use jet_types::auth_adapter::AuthCtx;
use jet_types::lookup::{LookupItem, LookupModel, QuerySet, VecQuerySet};
use jet_types::meta_adapter::{Bookmark, MetaAdapter, PinnedApplication};
use jet_types::prelude::*;

// MemMetaAdapter //
//****************//
#[derive(Debug, Default)]
pub struct MemMetaAdapter {
	bookmarks: Mutex<Vec<Bookmark>>,
	pins: Mutex<Vec<PinnedApplication>>,
	last_id: Mutex<i64>,
}

impl MemMetaAdapter {
	fn next_id(&self) -> i64 {
		let mut last_id = self.last_id.lock();
		*last_id += 1;
		*last_id
	}

	pub fn bookmark_count(&self) -> usize {
		self.bookmarks.lock().len()
	}

	pub fn pin_count(&self, user_id: UserId, app_label: &str) -> usize {
		self.pins
			.lock()
			.iter()
			.filter(|p| p.user_id == user_id && p.app_label.as_ref() == app_label)
			.count()
	}
}

#[async_trait]
impl MetaAdapter for MemMetaAdapter {
	async fn create_bookmark(&self, user_id: UserId, url: &str, title: &str) -> ClResult<Bookmark> {
		let bookmark = Bookmark {
			bookmark_id: self.next_id(),
			user_id,
			url: url.into(),
			title: title.into(),
			created_at: Timestamp::now(),
		};
		self.bookmarks.lock().push(bookmark.clone());
		Ok(bookmark)
	}

	async fn read_bookmark(&self, bookmark_id: i64) -> ClResult<Bookmark> {
		self.bookmarks
			.lock()
			.iter()
			.find(|b| b.bookmark_id == bookmark_id)
			.cloned()
			.ok_or(Error::NotFound)
	}

	async fn list_bookmarks(&self, user_id: UserId) -> ClResult<Vec<Bookmark>> {
		Ok(self.bookmarks.lock().iter().filter(|b| b.user_id == user_id).cloned().collect())
	}

	async fn delete_bookmark(&self, bookmark_id: i64) -> ClResult<()> {
		let mut bookmarks = self.bookmarks.lock();
		let len = bookmarks.len();
		bookmarks.retain(|b| b.bookmark_id != bookmark_id);
		if bookmarks.len() == len { Err(Error::NotFound) } else { Ok(()) }
	}

	async fn read_pinned_application(
		&self,
		user_id: UserId,
		app_label: &str,
	) -> ClResult<Option<PinnedApplication>> {
		Ok(self
			.pins
			.lock()
			.iter()
			.find(|p| p.user_id == user_id && p.app_label.as_ref() == app_label)
			.cloned())
	}

	async fn create_pinned_application(
		&self,
		user_id: UserId,
		app_label: &str,
	) -> ClResult<PinnedApplication> {
		let pin = PinnedApplication {
			pin_id: self.next_id(),
			user_id,
			app_label: app_label.into(),
			created_at: Timestamp::now(),
		};
		self.pins.lock().push(pin.clone());
		Ok(pin)
	}

	async fn delete_pinned_application(&self, pin_id: i64) -> ClResult<()> {
		let mut pins = self.pins.lock();
		let len = pins.len();
		pins.retain(|p| p.pin_id != pin_id);
		if pins.len() == len { Err(Error::NotFound) } else { Ok(()) }
	}

	async fn list_pinned_applications(&self, user_id: UserId) -> ClResult<Vec<PinnedApplication>> {
		Ok(self.pins.lock().iter().filter(|p| p.user_id == user_id).cloned().collect())
	}
}

// MockModel //
//***********//
/// A row with two searchable columns
#[derive(Clone, Debug)]
pub struct Record {
	pub id: i64,
	pub name: String,
	pub code: String,
}

impl Record {
	pub fn new(id: i64, name: &str, code: &str) -> Self {
		Self { id, name: name.into(), code: code.into() }
	}

	fn field(&self, field: &str) -> &str {
		match field {
			"code" => &self.code,
			_ => &self.name,
		}
	}
}

/// Lookup model over in-memory records.
///
/// The search query hook matches name prefixes (unlike the contains filter)
/// so tests can tell which strategy ran. The post-filter keeps even ids.
#[derive(Debug)]
pub struct MockModel {
	pub app_label: &'static str,
	pub model_name: &'static str,
	pub records: Vec<Record>,
	pub fields: Option<Vec<Box<str>>>,
	pub query_hook: bool,
	pub post_filter: bool,
	pub extra_permissions: Vec<Box<str>>,
	/// User passed to the last `search_query` call
	pub query_user: Mutex<Option<UserId>>,
}

impl MockModel {
	pub fn new(app_label: &'static str, model_name: &'static str, records: Vec<Record>) -> Self {
		Self {
			app_label,
			model_name,
			records,
			fields: None,
			query_hook: false,
			post_filter: false,
			extra_permissions: Vec::new(),
			query_user: Mutex::new(None),
		}
	}

	pub fn with_fields(mut self, fields: &[&str]) -> Self {
		self.fields = Some(fields.iter().map(|f| Box::from(*f)).collect());
		self
	}

	pub fn with_query_hook(mut self) -> Self {
		self.query_hook = true;
		self
	}

	pub fn with_post_filter(mut self) -> Self {
		self.post_filter = true;
		self
	}

	pub fn with_extra_permission(mut self, codename: &str) -> Self {
		self.extra_permissions.push(codename.into());
		self
	}
}

/// `n` records named "Item 1" .. "Item n"
pub fn numbered_records(n: i64) -> Vec<Record> {
	(1..=n).map(|i| Record::new(i, &format!("Item {}", i), &format!("C{}", i))).collect()
}

#[async_trait]
impl LookupModel for MockModel {
	fn app_label(&self) -> &str {
		self.app_label
	}

	fn model_name(&self) -> &str {
		self.model_name
	}

	fn extra_permissions(&self) -> Vec<Box<str>> {
		self.extra_permissions.clone()
	}

	fn search_fields(&self) -> Option<Vec<Box<str>>> {
		self.fields.clone()
	}

	fn has_search_query(&self) -> bool {
		self.query_hook
	}

	async fn search_query(&self, query: &str, user: &AuthCtx) -> ClResult<Box<dyn QuerySet>> {
		*self.query_user.lock() = Some(user.user_id);
		let query = query.to_lowercase();
		// Yields every match twice; the queryset must still be distinct
		let items = self
			.records
			.iter()
			.chain(self.records.iter())
			.filter(|r| r.name.to_lowercase().starts_with(&query))
			.map(|r| LookupItem::new(r.id, r.name.clone()));
		Ok(Box::new(VecQuerySet::new(items)))
	}

	async fn filter_contains(&self, fields: &[Box<str>], query: &str) -> ClResult<Box<dyn QuerySet>> {
		let query = query.to_lowercase();
		let items = self
			.records
			.iter()
			.filter(|r| fields.iter().any(|f| r.field(f).to_lowercase().contains(&query)))
			.map(|r| LookupItem::new(r.id, r.name.clone()));
		Ok(Box::new(VecQuerySet::new(items)))
	}

	fn has_search_filter(&self) -> bool {
		self.post_filter
	}

	async fn search_filter(&self, items: Vec<LookupItem>) -> ClResult<Vec<LookupItem>> {
		Ok(items.into_iter().filter(|i| i.id % 2 == 0).collect())
	}
}

// vim: ts=4
