// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Membership checks against a document's `permissions` lists.

use serde::{Deserialize, Serialize};

use crate::types::Uid;
use crate::value::{DocumentData, FieldPath, Value};

/// A capability granted by one of the `permissions` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
	Read,
	Update,
}

impl Capability {
	pub fn field(self) -> &'static str {
		match self {
			Capability::Read => "read",
			Capability::Update => "update",
		}
	}

	/// Dotted path of the list, e.g. `permissions.read`.
	pub fn field_path(self) -> FieldPath {
		FieldPath::from(["permissions", self.field()].join(".").as_str())
	}
}

/// Returns true if `uid` appears in the document's list for `capability`.
///
/// A missing or malformed list grants nothing.
pub fn grants(document: &DocumentData, capability: Capability, uid: &Uid) -> bool {
	document
		.get(&capability.field_path())
		.and_then(Value::as_array)
		.map(|members| members.iter().any(|m| m.as_str() == Some(uid.as_str())))
		.unwrap_or(false)
}

/// Returns true if `uid` may read the document: it appears in either list.
pub fn can_read(document: &DocumentData, uid: &Uid) -> bool {
	grants(document, Capability::Read, uid) || grants(document, Capability::Update, uid)
}

/// Returns true if `uid` may update the document.
pub fn can_update(document: &DocumentData, uid: &Uid) -> bool {
	grants(document, Capability::Update, uid)
}
