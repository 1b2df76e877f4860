// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt::Debug;

use chrono::{TimeZone, Utc};
use estate_rules::{DocumentData, FieldPath, Fields, Requester, Value};
use estate_store::{AdminClient, Client, Platform, Result};
use serde_json::json;

pub struct TestPlatform {
	pub platform: Platform,
	pub admin: AdminClient,
}

impl TestPlatform {
	pub fn new() -> Self {
		let platform = Platform::default();
		let admin = platform.admin();
		Self { platform, admin }
	}

	pub fn client(&self, requester: Option<&Requester>) -> Client {
		match requester {
			Some(requester) => self.platform.client(requester.clone()),
			None => self.platform.anonymous(),
		}
	}

	pub async fn seed(&self, path: &str, data: serde_json::Value) {
		let data = DocumentData::from_json(data).expect("fixture must be an object");
		self.admin.set(path, data).await.expect("seeding failed");
	}
}

/// A named requester, `None` for the unauthenticated case.
pub struct Actor {
	pub name: &'static str,
	pub requester: Option<Requester>,
}

impl Actor {
	pub fn new(name: &'static str, uid: &str) -> Self {
		Self {
			name,
			requester: Some(Requester::new(uid)),
		}
	}

	pub fn anonymous() -> Self {
		Self {
			name: "unauthenticated",
			requester: None,
		}
	}
}

pub fn assert_allowed<T: Debug>(result: Result<T>, case: &str) -> T {
	match result {
		Ok(value) => value,
		Err(err) => panic!("Case '{case}': expected success, got {err}"),
	}
}

pub fn assert_denied<T: Debug>(result: Result<T>, case: &str) {
	match result {
		Err(err) if err.is_permission_denied() => {}
		other => panic!("Case '{case}': expected permission denied, got {other:?}"),
	}
}

pub fn assert_outcome<T: Debug>(result: Result<T>, allowed: bool, case: &str) {
	if allowed {
		assert_allowed(result, case);
	} else {
		assert_denied(result, case);
	}
}

/// One generator per value kind. Shape tests substitute every kind except
/// the one a field declares.
pub fn value_generators() -> Vec<(&'static str, Value)> {
	vec![
		("string", Value::from("abcdefgh")),
		("empty string", Value::from("")),
		("number", Value::from(1_i64)),
		("array", Value::strings(["rstuvwxyz"])),
		("empty array", Value::Array(vec![])),
		("boolean", Value::from(true)),
		("map", Value::Map(Fields::new())),
		(
			"timestamp",
			Value::from(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
		),
		("null", Value::Null),
	]
}

pub fn invalid_values(valid: &[&str]) -> Vec<(&'static str, Value)> {
	value_generators()
		.into_iter()
		.filter(|(kind, _)| !valid.contains(kind))
		.collect()
}

pub fn property_fixture(uid: Option<&str>) -> DocumentData {
	let members: Vec<&str> = uid.into_iter().collect();
	DocumentData::from_json(json!({
		"name": "new property",
		"permissions": { "read": members, "update": members },
	}))
	.expect("fixture must be an object")
}

pub fn with_field(mut data: DocumentData, field: &str, value: Value) -> DocumentData {
	data.set(&FieldPath::from(field), value);
	data
}

pub fn without_field(mut data: DocumentData, field: &str) -> DocumentData {
	data.remove(&FieldPath::from(field));
	data
}
