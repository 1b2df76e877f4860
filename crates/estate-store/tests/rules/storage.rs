// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object rules for `property_documents/{propertyId}/{documentId}/{filename}`.

use bytes::Bytes;
use serde_json::json;

use super::support::{assert_allowed, assert_denied, assert_outcome, Actor, TestPlatform};

const USER: &str = "user0001";
const READABLE: &str = "readable0002";
const UPDATABLE: &str = "updatable0003";
const ANOTHER: &str = "another0004";
const FILENAME: &str = "registration.pdf";

fn payload() -> Bytes {
	Bytes::from_static(b"Hello, world!")
}

/// A property whose lists include `ANOTHER`, and a document under it whose
/// lists do not.
async fn setup() -> TestPlatform {
	let app = TestPlatform::new();
	app.seed(
		"properties/p",
		json!({
			"name": "property",
			"permissions": { "read": [USER, ANOTHER], "update": [USER, ANOTHER] },
		}),
	)
	.await;
	app.seed(
		"properties/p/documents/d",
		json!({
			"name": FILENAME,
			"tags": ["building_registration"],
			"permissions": { "read": [USER, READABLE], "update": [USER, UPDATABLE] },
		}),
	)
	.await;
	app
}

fn actors() -> Vec<(Actor, bool)> {
	vec![
		(Actor::anonymous(), false),
		(Actor::new("read and update", USER), true),
		(Actor::new("update only", UPDATABLE), true),
		(Actor::new("read only", READABLE), false),
		(Actor::new("property member only", ANOTHER), false),
	]
}

#[tokio::test]
async fn upload_requires_document_update_rights() {
	for (actor, allowed) in actors() {
		let app = setup().await;
		let client = app.client(actor.requester.as_ref());

		assert_outcome(
			client
				.upload(&format!("property_documents/p/d/{FILENAME}"), payload())
				.await,
			allowed,
			&format!("{} uploads to existing document", actor.name),
		);
		assert_denied(
			client
				.upload(&format!("property_documents/p/absent/{FILENAME}"), payload())
				.await,
			&format!("{} uploads to missing document", actor.name),
		);
		assert_denied(
			client
				.upload("property_documents/p/d/other.pdf", payload())
				.await,
			&format!("{} uploads with wrong filename", actor.name),
		);
	}
}

#[tokio::test]
async fn uploads_never_overwrite() {
	let app = setup().await;
	let key = format!("property_documents/p/d/{FILENAME}");
	let user = app.client(Actor::new("user", USER).requester.as_ref());
	let updatable = app.client(Actor::new("updatable", UPDATABLE).requester.as_ref());

	assert_allowed(user.upload(&key, payload()).await, "first upload");
	assert_denied(
		user.upload(&key, Bytes::from_static(b"replaced")).await,
		"same uploader",
	);
	assert_denied(
		updatable.upload(&key, Bytes::from_static(b"replaced")).await,
		"other updater",
	);
	assert_eq!(app.admin.download(&key).await.unwrap(), payload());
}

#[tokio::test]
async fn concurrent_uploads_store_one_object() {
	let app = setup().await;
	let key = format!("property_documents/p/d/{FILENAME}");
	let user = app.client(Actor::new("user", USER).requester.as_ref());
	let updatable = app.client(Actor::new("updatable", UPDATABLE).requester.as_ref());

	let (first, second) = tokio::join!(
		user.upload(&key, Bytes::from_static(b"first")),
		updatable.upload(&key, Bytes::from_static(b"second")),
	);
	assert_eq!(
		[first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
		1
	);
}

#[tokio::test]
async fn download_follows_either_permission_list() {
	let app = setup().await;
	let key = format!("property_documents/p/d/{FILENAME}");
	app.admin.upload(&key, payload()).await.unwrap();

	let cases = [
		(Actor::anonymous(), false),
		(Actor::new("read and update", USER), true),
		(Actor::new("update only", UPDATABLE), true),
		(Actor::new("read only", READABLE), true),
		(Actor::new("property member only", ANOTHER), false),
	];
	for (actor, allowed) in cases {
		let client = app.client(actor.requester.as_ref());
		let result = client.download(&key).await;
		if allowed {
			assert_eq!(assert_allowed(result, actor.name), payload());
		} else {
			assert_denied(result, actor.name);
		}
	}
}

#[tokio::test]
async fn listing_is_denied_at_every_depth() {
	let app = setup().await;
	let key = format!("property_documents/p/d/{FILENAME}");
	app.admin.upload(&key, payload()).await.unwrap();

	for (actor, _) in actors() {
		let client = app.client(actor.requester.as_ref());
		for prefix in [
			"",
			"property_documents/",
			"property_documents/p/",
			"property_documents/p/d/",
			key.as_str(),
		] {
			assert_denied(
				client.list_objects(prefix).await,
				&format!("{} lists {prefix:?}", actor.name),
			);
		}
	}
	assert_eq!(app.admin.list_objects("property_documents/").await.unwrap(), vec![key]);
}

#[tokio::test]
async fn clients_cannot_delete_objects() {
	let app = setup().await;
	let key = format!("property_documents/p/d/{FILENAME}");
	app.admin.upload(&key, payload()).await.unwrap();

	for (actor, _) in actors() {
		let client = app.client(actor.requester.as_ref());
		assert_denied(client.delete_object(&key).await, actor.name);
	}
	assert!(app.admin.delete_object(&key).await.unwrap());
}

#[tokio::test]
async fn keys_outside_the_namespace_are_denied() {
	let app = setup().await;
	let user = app.client(Actor::new("user", USER).requester.as_ref());
	for key in [
		"inspectionApplications/a1/photo.jpg",
		"property_documents/p/d",
		"property_documents/p/d/registration.pdf/extra",
	] {
		assert_denied(user.upload(key, payload()).await, key);
	}
}

/// A reads, B updates, C has neither; the document is named `x.pdf`.
#[tokio::test]
async fn permission_list_scenario() {
	let app = TestPlatform::new();
	app.seed(
		"properties/p",
		json!({ "name": "p", "permissions": { "read": [], "update": ["b"] } }),
	)
	.await;
	app.seed(
		"properties/p/documents/d",
		json!({
			"name": "x.pdf",
			"tags": [],
			"permissions": { "read": ["a"], "update": ["b"] },
		}),
	)
	.await;
	let a = app.client(Actor::new("a", "a").requester.as_ref());
	let b = app.client(Actor::new("b", "b").requester.as_ref());
	let c = app.client(Actor::new("c", "c").requester.as_ref());
	let key = "property_documents/p/d/x.pdf";

	assert_allowed(b.upload(key, payload()).await, "B uploads");
	assert_denied(b.upload(key, payload()).await, "B overwrites");
	assert_eq!(assert_allowed(a.download(key).await, "A downloads"), payload());
	assert_allowed(b.download(key).await, "B downloads");
	assert_denied(a.upload(key, payload()).await, "A uploads");
	assert_denied(c.upload(key, payload()).await, "C uploads");
	assert_denied(c.download(key).await, "C downloads");
	assert_denied(c.list_objects("property_documents/p/d/").await, "C lists");
	assert_denied(
		b.upload("property_documents/p/d/y.pdf", payload()).await,
		"B uploads y.pdf",
	);
}
