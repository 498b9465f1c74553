//! Bookmark form tests

mod common;

use common::*;
use jet_admin::bookmark::{AddBookmarkForm, RemoveBookmarkForm};
use jet_admin::perm::BOOKMARK_CHANGE_PERM;
use jet_types::meta_adapter::MetaAdapter;
use jet_types::prelude::*;

#[tokio::test]
async fn test_add_bookmark_by_staff_with_perm() {
	let meta = MemMetaAdapter::default();
	let user = staff(1, &[BOOKMARK_CHANGE_PERM]);

	let form = AddBookmarkForm {
		user: Some(&user),
		url: Some("https://example.com/admin/shop/"),
		title: Some("Shop"),
	};
	let bookmark = form.clean().expect("clean failed").save(&meta).await.expect("save failed");

	assert_eq!(bookmark.user_id, UserId(1));
	assert_eq!(bookmark.url.as_ref(), "https://example.com/admin/shop/");
	assert_eq!(bookmark.title.as_ref(), "Shop");
	assert_eq!(meta.bookmark_count(), 1);
}

#[tokio::test]
async fn test_add_bookmark_denied_without_perm() {
	let meta = MemMetaAdapter::default();
	let user = staff(1, &[]);

	let form = AddBookmarkForm { user: Some(&user), url: Some("https://x.io/"), title: Some("X") };
	assert!(matches!(form.clean(), Err(Error::PermissionDenied)));
	assert_eq!(meta.bookmark_count(), 0);
}

#[tokio::test]
async fn test_add_bookmark_denied_for_anonymous_and_non_staff() {
	let form = AddBookmarkForm { user: None, url: Some("https://x.io/"), title: Some("X") };
	assert!(matches!(form.clean(), Err(Error::PermissionDenied)));

	let user = non_staff(1, &[BOOKMARK_CHANGE_PERM]);
	let form = AddBookmarkForm { user: Some(&user), url: Some("https://x.io/"), title: Some("X") };
	assert!(matches!(form.clean(), Err(Error::PermissionDenied)));

	let user = inactive_staff(1, &[BOOKMARK_CHANGE_PERM]);
	let form = AddBookmarkForm { user: Some(&user), url: Some("https://x.io/"), title: Some("X") };
	assert!(matches!(form.clean(), Err(Error::PermissionDenied)));
}

#[tokio::test]
async fn test_add_bookmark_superuser_needs_no_grant() {
	let meta = MemMetaAdapter::default();
	let user = superuser(9);

	let form = AddBookmarkForm { user: Some(&user), url: Some("https://x.io/"), title: Some("X") };
	let bookmark = form.clean().expect("clean failed").save(&meta).await.expect("save failed");
	assert_eq!(bookmark.user_id, UserId(9));
}

#[tokio::test]
async fn test_add_bookmark_field_errors() {
	let user = staff(1, &[BOOKMARK_CHANGE_PERM]);

	let form = AddBookmarkForm { user: Some(&user), url: None, title: Some("X") };
	assert!(matches!(form.clean(), Err(Error::ValidationError(_))));

	let form = AddBookmarkForm { user: Some(&user), url: Some("https://x.io/"), title: Some("  ") };
	assert!(matches!(form.clean(), Err(Error::ValidationError(_))));

	let form = AddBookmarkForm { user: Some(&user), url: Some("not a url"), title: Some("X") };
	assert!(matches!(form.clean(), Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_permission_checked_before_fields() {
	// Invalid fields from an unauthorized requester still yield PermissionDenied
	let user = staff(1, &[]);
	let form = AddBookmarkForm { user: Some(&user), url: None, title: None };
	assert!(matches!(form.clean(), Err(Error::PermissionDenied)));
}

#[tokio::test]
async fn test_remove_own_bookmark() {
	let meta = MemMetaAdapter::default();
	let bookmark = meta.create_bookmark(UserId(1), "https://x.io/", "X").await.expect("create");
	let user = staff(1, &[]);

	let form = RemoveBookmarkForm { user: Some(&user), bookmark: bookmark.clone() };
	form.clean().expect("clean failed").save(&meta, true).await.expect("save failed");

	assert!(matches!(meta.read_bookmark(bookmark.bookmark_id).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_remove_without_commit_keeps_bookmark() {
	let meta = MemMetaAdapter::default();
	let bookmark = meta.create_bookmark(UserId(1), "https://x.io/", "X").await.expect("create");
	let user = staff(1, &[]);

	let form = RemoveBookmarkForm { user: Some(&user), bookmark: bookmark.clone() };
	form.clean().expect("clean failed").save(&meta, false).await.expect("save failed");

	assert!(meta.read_bookmark(bookmark.bookmark_id).await.is_ok());
}

#[tokio::test]
async fn test_remove_foreign_bookmark_is_denied() {
	let meta = MemMetaAdapter::default();
	let bookmark = meta.create_bookmark(UserId(1), "https://x.io/", "X").await.expect("create");
	// Ownership is required even for superusers
	let other = superuser(2);

	let form = RemoveBookmarkForm { user: Some(&other), bookmark: bookmark.clone() };
	assert!(matches!(form.clean(), Err(Error::PermissionDenied)));
	assert!(meta.read_bookmark(bookmark.bookmark_id).await.is_ok());
}

#[tokio::test]
async fn test_remove_by_non_staff_owner_is_denied() {
	let meta = MemMetaAdapter::default();
	let bookmark = meta.create_bookmark(UserId(1), "https://x.io/", "X").await.expect("create");
	let owner = non_staff(1, &[]);

	let form = RemoveBookmarkForm { user: Some(&owner), bookmark };
	assert!(matches!(form.clean(), Err(Error::PermissionDenied)));
}

// vim: ts=4
