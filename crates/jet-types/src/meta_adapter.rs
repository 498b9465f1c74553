//! Adapter that stores per-user admin metadata: bookmarks and pinned applications.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::prelude::*;

/// A named URL saved by a staff user
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
	pub bookmark_id: i64,
	pub user_id: UserId,
	pub url: Box<str>,
	pub title: Box<str>,
	pub created_at: Timestamp,
}

/// Marks an application as pinned for a user. Existence means "pinned".
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedApplication {
	pub pin_id: i64,
	pub user_id: UserId,
	pub app_label: Box<str>,
	pub created_at: Timestamp,
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	// Bookmarks
	//***********
	async fn create_bookmark(&self, user_id: UserId, url: &str, title: &str) -> ClResult<Bookmark>;
	async fn read_bookmark(&self, bookmark_id: i64) -> ClResult<Bookmark>;
	async fn list_bookmarks(&self, user_id: UserId) -> ClResult<Vec<Bookmark>>;
	async fn delete_bookmark(&self, bookmark_id: i64) -> ClResult<()>;

	// Pinned applications
	//*********************
	/// Returns the first pin matching `(user_id, app_label)`, if any
	async fn read_pinned_application(
		&self,
		user_id: UserId,
		app_label: &str,
	) -> ClResult<Option<PinnedApplication>>;
	async fn create_pinned_application(
		&self,
		user_id: UserId,
		app_label: &str,
	) -> ClResult<PinnedApplication>;
	async fn delete_pinned_application(&self, pin_id: i64) -> ClResult<()>;
	async fn list_pinned_applications(&self, user_id: UserId) -> ClResult<Vec<PinnedApplication>>;
}

// vim: ts=4
