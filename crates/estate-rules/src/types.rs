// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for policy evaluation.
//!
//! - [`Requester`]: the authenticated caller (absent for anonymous clients)
//! - [`Operation`]: what the caller is attempting
//! - [`Request`]: everything a policy needs, preloaded by the caller
//! - [`Decision`]: the binary outcome
//!
//! Policies never touch storage. The store resolves the existing document,
//! the merged result of an update and the parent property before asking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::{CollectionPath, DocumentPath};
use crate::query::Query;
use crate::value::DocumentData;

/// An authenticated user id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
	pub fn new(uid: impl Into<String>) -> Self {
		Self(uid.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Uid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Uid {
	fn from(uid: &str) -> Self {
		Self(uid.to_string())
	}
}

impl From<String> for Uid {
	fn from(uid: String) -> Self {
		Self(uid)
	}
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
	pub uid: Uid,
	/// Carried from the token's `admin` claim. No collection rule grants
	/// anything on it; administrative access bypasses the engine instead.
	#[serde(default)]
	pub admin: bool,
}

impl Requester {
	pub fn new(uid: impl Into<Uid>) -> Self {
		Self {
			uid: uid.into(),
			admin: false,
		}
	}

	/// Builder: set the admin claim.
	pub fn with_admin_claim(mut self, admin: bool) -> Self {
		self.admin = admin;
		self
	}
}

/// Operations a client can attempt on a document or collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	Get,
	List,
	Create,
	Update,
	Delete,
}

impl Operation {
	pub fn is_read(self) -> bool {
		matches!(self, Operation::Get | Operation::List)
	}

	pub fn is_write(self) -> bool {
		!self.is_read()
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Operation::Get => "get",
			Operation::List => "list",
			Operation::Create => "create",
			Operation::Update => "update",
			Operation::Delete => "delete",
		};
		f.write_str(name)
	}
}

/// The outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
	Allow,
	Deny,
}

impl Decision {
	pub fn is_allowed(self) -> bool {
		matches!(self, Decision::Allow)
	}
}

impl From<bool> for Decision {
	fn from(allowed: bool) -> Self {
		if allowed {
			Decision::Allow
		} else {
			Decision::Deny
		}
	}
}

/// A single request presented to the engine.
#[derive(Debug, Clone)]
pub struct Request<'a> {
	pub requester: Option<&'a Requester>,
	pub operation: Operation,
	pub collection: &'a CollectionPath,
	/// Target document id. `None` for list queries.
	pub document_id: Option<&'a str>,
	/// The stored document, if it exists.
	pub existing: Option<&'a DocumentData>,
	/// The document as it would be after a create or update.
	pub incoming: Option<&'a DocumentData>,
	/// The stored parent document for nested collections.
	pub parent: Option<&'a DocumentData>,
	pub query: Option<&'a Query>,
}

impl<'a> Request<'a> {
	fn on_document(operation: Operation, path: &'a DocumentPath) -> Self {
		Self {
			requester: None,
			operation,
			collection: path.collection(),
			document_id: Some(path.id()),
			existing: None,
			incoming: None,
			parent: None,
			query: None,
		}
	}

	pub fn get(path: &'a DocumentPath, existing: Option<&'a DocumentData>) -> Self {
		Self {
			existing,
			..Self::on_document(Operation::Get, path)
		}
	}

	pub fn list(collection: &'a CollectionPath, query: &'a Query) -> Self {
		Self {
			requester: None,
			operation: Operation::List,
			collection,
			document_id: None,
			existing: None,
			incoming: None,
			parent: None,
			query: Some(query),
		}
	}

	pub fn create(path: &'a DocumentPath, incoming: &'a DocumentData) -> Self {
		Self {
			incoming: Some(incoming),
			..Self::on_document(Operation::Create, path)
		}
	}

	pub fn update(
		path: &'a DocumentPath,
		existing: &'a DocumentData,
		incoming: &'a DocumentData,
	) -> Self {
		Self {
			existing: Some(existing),
			incoming: Some(incoming),
			..Self::on_document(Operation::Update, path)
		}
	}

	pub fn delete(path: &'a DocumentPath, existing: Option<&'a DocumentData>) -> Self {
		Self {
			existing,
			..Self::on_document(Operation::Delete, path)
		}
	}

	/// Builder: set the caller.
	pub fn by(mut self, requester: Option<&'a Requester>) -> Self {
		self.requester = requester;
		self
	}

	/// Builder: set the preloaded parent document.
	pub fn with_parent(mut self, parent: Option<&'a DocumentData>) -> Self {
		self.parent = parent;
		self
	}

	/// The caller's uid, if authenticated.
	pub fn uid(&self) -> Option<&'a Uid> {
		self.requester.map(|r| &r.uid)
	}
}
