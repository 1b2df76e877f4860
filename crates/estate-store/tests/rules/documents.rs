// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `properties/{id}/documents` access and shape rules.

use estate_rules::{Query, Value};
use estate_store::{DocumentRecord, Patch, Permissions, Record};
use serde_json::json;

use super::support::{
	assert_allowed, assert_denied, assert_outcome, invalid_values, with_field, without_field,
	Actor, TestPlatform,
};

const OWNER: &str = "owner0001";
const VIEWER: &str = "viewer0002";
const READER: &str = "reader0003";
const WRITER: &str = "writer0004";
const STRANGER: &str = "stranger0005";
const PROPERTY: &str = "properties/p1";
const DOCUMENT: &str = "properties/p1/documents/d1";
const COLLECTION: &str = "properties/p1/documents";

async fn setup() -> TestPlatform {
	let app = TestPlatform::new();
	app.seed(
		PROPERTY,
		json!({
			"name": "property",
			"permissions": { "read": [OWNER, VIEWER], "update": [OWNER] },
		}),
	)
	.await;
	app.seed(
		DOCUMENT,
		json!({
			"name": "registration.pdf",
			"tags": ["building_registration"],
			"permissions": { "read": [OWNER, READER], "update": [OWNER, WRITER] },
		}),
	)
	.await;
	app
}

fn new_document() -> DocumentRecord {
	DocumentRecord {
		name: "plan.pdf".to_string(),
		tags: vec![],
		permissions: Permissions::owned_by([OWNER]),
	}
}

#[tokio::test]
async fn create_requires_update_rights_on_property() {
	let app = setup().await;
	let cases = [
		(Actor::anonymous(), false),
		(Actor::new("property updater", OWNER), true),
		(Actor::new("property reader", VIEWER), false),
		(Actor::new("document writer", WRITER), false),
		(Actor::new("stranger", STRANGER), false),
	];
	for (actor, allowed) in cases {
		let client = app.client(actor.requester.as_ref());
		assert_outcome(
			client
				.add(COLLECTION, new_document().to_document().unwrap())
				.await,
			allowed,
			actor.name,
		);
	}
}

#[tokio::test]
async fn create_under_missing_property_is_denied() {
	let app = setup().await;
	let client = app.client(Actor::new("owner", OWNER).requester.as_ref());
	assert_denied(
		client
			.add(
				"properties/absent/documents",
				new_document().to_document().unwrap(),
			)
			.await,
		"missing parent",
	);
}

#[tokio::test]
async fn create_with_empty_name_is_allowed() {
	let app = setup().await;
	let client = app.client(Actor::new("owner", OWNER).requester.as_ref());
	let mut record = new_document();
	record.name = String::new();
	assert_allowed(
		client.add(COLLECTION, record.to_document().unwrap()).await,
		"empty name",
	);
}

#[tokio::test]
async fn create_shape_is_enforced() {
	let app = setup().await;
	let client = app.client(Actor::new("owner", OWNER).requester.as_ref());
	let base = new_document().to_document().unwrap();

	for field in ["name", "tags", "permissions", "permissions.read", "permissions.update"] {
		assert_denied(
			client.add(COLLECTION, without_field(base.clone(), field)).await,
			&format!("create without {field}"),
		);
	}
	for field in ["custom_field", "permissions.custom_field"] {
		assert_denied(
			client
				.add(
					COLLECTION,
					with_field(base.clone(), field, Value::from("custom_data")),
				)
				.await,
			&format!("create with {field}"),
		);
	}
	assert_denied(
		client
			.add(
				COLLECTION,
				with_field(base.clone(), "tags", Value::Array(vec![Value::from(true)])),
			)
			.await,
		"non-string tag",
	);
}

#[tokio::test]
async fn get_follows_document_permissions() {
	let app = setup().await;
	let cases = [
		(Actor::anonymous(), false),
		(Actor::new("owner", OWNER), true),
		(Actor::new("document reader", READER), true),
		(Actor::new("document writer", WRITER), true),
		(Actor::new("property reader only", VIEWER), false),
		(Actor::new("stranger", STRANGER), false),
	];
	for (actor, allowed) in cases {
		let client = app.client(actor.requester.as_ref());
		assert_outcome(client.get(DOCUMENT).await, allowed, actor.name);
	}
}

#[tokio::test]
async fn list_must_filter_on_own_read_membership() {
	let app = setup().await;
	let reader = app.client(Actor::new("reader", READER).requester.as_ref());

	let own = Query::new().where_array_contains("permissions.read", READER);
	let found = assert_allowed(reader.query(COLLECTION, &own).await, "own filter");
	assert_eq!(found.len(), 1);

	let eq = Query::new().where_eq("permissions.read", Value::strings([OWNER, READER]));
	assert_allowed(reader.query(COLLECTION, &eq).await, "equality with own uid");

	assert_denied(reader.query(COLLECTION, &Query::new()).await, "unfiltered");
	assert_denied(
		reader
			.query(
				COLLECTION,
				&Query::new().where_array_contains("tags", "building_registration"),
			)
			.await,
		"filter on tags only",
	);
}

#[tokio::test]
async fn tags_and_permissions_are_mutable_by_writers() {
	let app = setup().await;
	let cases = [
		(Actor::anonymous(), false),
		(Actor::new("document reader", READER), false),
		(Actor::new("property reader", VIEWER), false),
		(Actor::new("document writer", WRITER), true),
		(Actor::new("owner", OWNER), true),
	];
	for (i, (actor, allowed)) in cases.into_iter().enumerate() {
		let client = app.client(actor.requester.as_ref());
		let patch = Patch::new()
			.array_union("tags", vec![Value::from(format!("tag{i}"))])
			.array_union("permissions.read", vec![Value::from(format!("uid{i}"))]);
		assert_outcome(client.update(DOCUMENT, &patch).await, allowed, actor.name);
	}

	let stored = app.admin.get(DOCUMENT).await.unwrap().unwrap();
	let record = DocumentRecord::from_document(&stored).unwrap();
	assert_eq!(record.tags, vec!["building_registration", "tag3", "tag4"]);
}

#[tokio::test]
async fn name_is_immutable() {
	let app = setup().await;
	for uid in [OWNER, WRITER] {
		let client = app.client(Actor::new("writer", uid).requester.as_ref());
		assert_denied(
			client
				.update(DOCUMENT, &Patch::new().set("name", "renamed.pdf"))
				.await,
			"rename",
		);
		assert_denied(
			client.update(DOCUMENT, &Patch::new().delete("name")).await,
			"delete name",
		);
		// Writing the same value back is not a change.
		assert_allowed(
			client
				.update(DOCUMENT, &Patch::new().set("name", "registration.pdf"))
				.await,
			"same name",
		);
	}
}

#[tokio::test]
async fn update_shape_is_enforced() {
	let app = setup().await;
	let client = app.client(Actor::new("owner", OWNER).requester.as_ref());
	for field in ["tags", "permissions", "permissions.read", "permissions.update"] {
		assert_denied(
			client.update(DOCUMENT, &Patch::new().delete(field)).await,
			&format!("delete {field}"),
		);
	}
	for field in ["custom_field", "permissions.custom_field"] {
		assert_denied(
			client
				.update(DOCUMENT, &Patch::new().set(field, "custom_data"))
				.await,
			&format!("add {field}"),
		);
	}
}

/// A declared document field and the value kinds it accepts.
struct FieldCase {
	field: &'static str,
	valid: &'static [&'static str],
}

const FIELDS: &[FieldCase] = &[
	FieldCase {
		field: "name",
		valid: &["string", "empty string"],
	},
	FieldCase {
		field: "tags",
		valid: &["array", "empty array"],
	},
	FieldCase {
		field: "permissions",
		valid: &["map"],
	},
	FieldCase {
		field: "permissions.read",
		valid: &["array", "empty array"],
	},
	FieldCase {
		field: "permissions.update",
		valid: &["array", "empty array"],
	},
];

fn everyone() -> Vec<Actor> {
	vec![
		Actor::anonymous(),
		Actor::new("owner", OWNER),
		Actor::new("document writer", WRITER),
		Actor::new("document reader", READER),
		Actor::new("property reader", VIEWER),
		Actor::new("stranger", STRANGER),
	]
}

#[tokio::test]
async fn create_with_wrong_type_is_denied() {
	let app = setup().await;
	let base = new_document().to_document().unwrap();
	for case in FIELDS {
		for (kind, value) in invalid_values(case.valid) {
			for actor in everyone() {
				let client = app.client(actor.requester.as_ref());
				assert_denied(
					client
						.add(COLLECTION, with_field(base.clone(), case.field, value.clone()))
						.await,
					&format!("{} creates with {} as {kind}", actor.name, case.field),
				);
			}
		}
	}
}

#[tokio::test]
async fn update_with_wrong_type_is_denied() {
	let app = setup().await;
	for case in FIELDS {
		for (kind, value) in invalid_values(case.valid) {
			for actor in everyone() {
				let client = app.client(actor.requester.as_ref());
				assert_denied(
					client
						.update(DOCUMENT, &Patch::new().set(case.field, value.clone()))
						.await,
					&format!("{} sets {} to {kind}", actor.name, case.field),
				);
			}
		}
	}
	let stored = app.admin.get(DOCUMENT).await.unwrap().unwrap();
	assert_eq!(
		DocumentRecord::from_document(&stored).unwrap().name,
		"registration.pdf"
	);
}

#[tokio::test]
async fn valid_type_updates_follow_document_permissions() {
	let app = setup().await;
	let cases = [
		(Actor::anonymous(), false),
		(Actor::new("document reader", READER), false),
		(Actor::new("stranger", STRANGER), false),
		(Actor::new("document writer", WRITER), true),
		(Actor::new("owner", OWNER), true),
	];
	for (actor, allowed) in cases {
		let client = app.client(actor.requester.as_ref());
		let cleared = client
			.update(DOCUMENT, &Patch::new().set("tags", Value::Array(vec![])))
			.await;
		assert_outcome(cleared, allowed, actor.name);
	}
}

#[tokio::test]
async fn delete_is_denied_to_everyone() {
	let app = setup().await;
	for uid in [OWNER, READER, WRITER, STRANGER] {
		let client = app.client(Actor::new("user", uid).requester.as_ref());
		assert_denied(client.delete(DOCUMENT).await, uid);
	}
	assert_denied(app.client(None).delete(DOCUMENT).await, "unauthenticated");
	assert!(app.admin.get(DOCUMENT).await.unwrap().is_some());
}

#[tokio::test]
async fn unmatched_collections_are_closed() {
	let app = setup().await;
	app.seed(
		"inspectionApplications/a1",
		json!({ "customerName": "customer" }),
	)
	.await;
	let client = app.client(Actor::new("owner", OWNER).requester.as_ref());
	assert_denied(client.get("inspectionApplications/a1").await, "get");
	assert_denied(
		client
			.add("inspectionApplications", json_doc(json!({ "customerName": "x" })))
			.await,
		"create",
	);
	assert_denied(client.delete("inspectionApplications/a1").await, "delete");
}

fn json_doc(value: serde_json::Value) -> estate_rules::DocumentData {
	estate_rules::DocumentData::from_json(value).unwrap()
}
