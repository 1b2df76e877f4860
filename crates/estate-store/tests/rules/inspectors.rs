// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `inspectors` is readable by any signed-in user and writable by none.

use estate_rules::{Query, Value};
use estate_store::{Acceptable, InspectorRecord, Patch, Record};

use super::support::{assert_allowed, assert_denied, assert_outcome, Actor, TestPlatform};

const SIMPLE: &str = "simple01";
const FLAT35: &str = "flat35x02";

async fn setup() -> TestPlatform {
	let app = TestPlatform::new();
	let simple = InspectorRecord {
		acceptables: vec![Acceptable::InspectionSimple],
	};
	let flat35 = InspectorRecord {
		acceptables: vec![Acceptable::Flat35Used, Acceptable::InspectionSimple],
	};
	app.admin
		.set(&format!("inspectors/{SIMPLE}"), simple.to_document().unwrap())
		.await
		.unwrap();
	app.admin
		.set(&format!("inspectors/{FLAT35}"), flat35.to_document().unwrap())
		.await
		.unwrap();
	app
}

fn actors() -> Vec<(Actor, bool)> {
	vec![
		(Actor::anonymous(), false),
		(Actor::new("signed-in user", "user0003"), true),
		(Actor::new("simple inspector", SIMPLE), true),
		(Actor::new("flat35 inspector", FLAT35), true),
	]
}

#[tokio::test]
async fn get_requires_sign_in() {
	let app = setup().await;
	for (actor, allowed) in actors() {
		let client = app.client(actor.requester.as_ref());
		assert_outcome(
			client.get(&format!("inspectors/{SIMPLE}")).await,
			allowed,
			actor.name,
		);
	}
}

#[tokio::test]
async fn list_requires_sign_in() {
	let app = setup().await;
	let query = Query::new().where_array_contains("acceptables", "flat35_used");
	for (actor, allowed) in actors() {
		let client = app.client(actor.requester.as_ref());
		let result = client.query("inspectors", &query).await;
		if allowed {
			let found = assert_allowed(result, actor.name);
			assert_eq!(found.len(), 1);
			assert_eq!(found[0].path.id(), FLAT35);
		} else {
			assert_denied(result, actor.name);
		}
	}
}

#[tokio::test]
async fn no_client_can_write_inspectors() {
	let app = setup().await;
	let path = format!("inspectors/{SIMPLE}");
	let record = InspectorRecord {
		acceptables: vec![Acceptable::InspectionSimple],
	};

	for (actor, _) in actors() {
		let client = app.client(actor.requester.as_ref());
		let case = |op: &str| format!("{} {op}", actor.name);

		assert_denied(
			client
				.add("inspectors", record.to_document().unwrap())
				.await,
			&case("create"),
		);
		assert_denied(client.delete(&path).await, &case("delete"));
		assert_denied(
			client
				.update(
					&path,
					&Patch::new().array_union("acceptables", vec![Value::from("flat35_used")]),
				)
				.await,
			&case("extend acceptables"),
		);
		assert_denied(
			client
				.update(&path, &Patch::new().delete("acceptables"))
				.await,
			&case("delete acceptables"),
		);
		assert_denied(
			client
				.update(&path, &Patch::new().set("custom_field", "custom_data"))
				.await,
			&case("add custom field"),
		);
	}

	let stored = app.admin.get(&path).await.unwrap().unwrap();
	assert_eq!(InspectorRecord::from_document(&stored).unwrap(), record);
}
