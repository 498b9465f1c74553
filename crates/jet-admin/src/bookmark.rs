//! Bookmark forms and endpoints

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::Deserialize;

use jet_core::extract::OptionalAuth;
use jet_types::auth_adapter::AuthCtx;
use jet_types::meta_adapter::{Bookmark, MetaAdapter};

use crate::perm::{BOOKMARK_CHANGE_PERM, require_perm, require_staff};
use crate::prelude::*;

pub const URL_MAX_LENGTH: usize = 200;
pub const TITLE_MAX_LENGTH: usize = 255;

const URL_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

fn clean_url(url: Option<&str>) -> ClResult<Box<str>> {
	let url = url.map(str::trim).unwrap_or_default();
	if url.is_empty() {
		return Err(Error::ValidationError("url: This field is required.".into()));
	}
	if url.chars().count() > URL_MAX_LENGTH {
		return Err(Error::ValidationError(format!(
			"url: Ensure this value has at most {} characters.",
			URL_MAX_LENGTH
		)));
	}
	match url::Url::parse(url) {
		Ok(parsed) if URL_SCHEMES.contains(&parsed.scheme()) && parsed.host().is_some() => {
			Ok(url.into())
		}
		_ => Err(Error::ValidationError("url: Enter a valid URL.".into())),
	}
}

fn clean_title(title: Option<&str>) -> ClResult<Box<str>> {
	let title = title.map(str::trim).unwrap_or_default();
	if title.is_empty() {
		return Err(Error::ValidationError("title: This field is required.".into()));
	}
	if title.chars().count() > TITLE_MAX_LENGTH {
		return Err(Error::ValidationError(format!(
			"title: Ensure this value has at most {} characters.",
			TITLE_MAX_LENGTH
		)));
	}
	Ok(title.into())
}

// AddBookmarkForm //
//*****************//
/// Input of the bookmark creation form. The owner always comes from `user`.
#[derive(Debug)]
pub struct AddBookmarkForm<'a> {
	pub user: Option<&'a AuthCtx>,
	pub url: Option<&'a str>,
	pub title: Option<&'a str>,
}

#[derive(Debug)]
pub struct ValidAddBookmark {
	pub user_id: UserId,
	pub url: Box<str>,
	pub title: Box<str>,
}

impl AddBookmarkForm<'_> {
	pub fn clean(&self) -> ClResult<ValidAddBookmark> {
		let user = require_staff(self.user)?;
		require_perm(user, BOOKMARK_CHANGE_PERM)?;

		Ok(ValidAddBookmark {
			user_id: user.user_id,
			url: clean_url(self.url)?,
			title: clean_title(self.title)?,
		})
	}
}

impl ValidAddBookmark {
	pub async fn save(&self, meta: &dyn MetaAdapter) -> ClResult<Bookmark> {
		let bookmark = meta.create_bookmark(self.user_id, &self.url, &self.title).await?;
		info!(user_id = %self.user_id, bookmark_id = bookmark.bookmark_id, "Bookmark added");
		Ok(bookmark)
	}
}

// RemoveBookmarkForm //
//********************//
/// Bound to an existing bookmark
#[derive(Debug)]
pub struct RemoveBookmarkForm<'a> {
	pub user: Option<&'a AuthCtx>,
	pub bookmark: Bookmark,
}

#[derive(Debug)]
pub struct ValidRemoveBookmark {
	pub bookmark: Bookmark,
}

impl RemoveBookmarkForm<'_> {
	pub fn clean(self) -> ClResult<ValidRemoveBookmark> {
		let user = require_staff(self.user)?;
		if self.bookmark.user_id != user.user_id {
			warn!(
				user_id = %user.user_id,
				bookmark_id = self.bookmark.bookmark_id,
				"Permission denied - bookmark owned by another user"
			);
			return Err(Error::PermissionDenied);
		}
		Ok(ValidRemoveBookmark { bookmark: self.bookmark })
	}
}

impl ValidRemoveBookmark {
	/// Deletes the bookmark. Nothing happens unless `commit` is set.
	pub async fn save(&self, meta: &dyn MetaAdapter, commit: bool) -> ClResult<()> {
		if !commit {
			return Ok(());
		}
		meta.delete_bookmark(self.bookmark.bookmark_id).await?;
		info!(
			user_id = %self.bookmark.user_id,
			bookmark_id = self.bookmark.bookmark_id,
			"Bookmark removed"
		);
		Ok(())
	}
}

// Handlers //
//**********//
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookmarkRequest {
	pub url: Option<String>,
	pub title: Option<String>,
}

/// GET /api/jet/bookmarks - Bookmarks of the requester
pub async fn list_bookmarks(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
) -> ClResult<Json<Vec<Bookmark>>> {
	let user = require_staff(auth.as_ref())?;
	let bookmarks = app.meta_adapter.list_bookmarks(user.user_id).await?;
	Ok(Json(bookmarks))
}

/// POST /api/jet/bookmarks - Add a bookmark for the requester
pub async fn post_bookmark(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<AddBookmarkRequest>,
) -> ClResult<(StatusCode, Json<Bookmark>)> {
	let form = AddBookmarkForm {
		user: auth.as_ref(),
		url: req.url.as_deref(),
		title: req.title.as_deref(),
	};
	let bookmark = form.clean()?.save(app.meta_adapter.as_ref()).await?;
	Ok((StatusCode::CREATED, Json(bookmark)))
}

/// DELETE /api/jet/bookmarks/{bookmark_id} - Remove one of the requester's bookmarks
pub async fn delete_bookmark(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Path(bookmark_id): Path<i64>,
) -> ClResult<StatusCode> {
	// Before the lookup: anonymous requests get 403, never 404
	require_staff(auth.as_ref())?;
	let bookmark = app.meta_adapter.read_bookmark(bookmark_id).await?;

	let form = RemoveBookmarkForm { user: auth.as_ref(), bookmark };
	form.clean()?.save(app.meta_adapter.as_ref(), true).await?;
	Ok(StatusCode::NO_CONTENT)
}


// vim: ts=4
