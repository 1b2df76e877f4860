// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object-store authorization.
//!
//! Stored objects carry no permissions of their own. An object at
//! `property_documents/{propertyId}/{documentId}/{filename}` is governed by the
//! document at `properties/{propertyId}/documents/{documentId}`: the document
//! must exist, its `name` must equal `filename`, and its permission lists
//! decide who may upload or download. Listing is never allowed.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::PathError;
use crate::path::{CollectionPath, DocumentPath, DOCUMENTS, PROPERTIES};
use crate::permissions::{can_read, can_update};
use crate::types::{Decision, Requester};
use crate::value::{DocumentData, Value};

/// Top-level namespace for property document objects.
pub const OBJECT_NAMESPACE: &str = "property_documents";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectOperation {
	Upload,
	Download,
	List,
	Delete,
}

impl fmt::Display for ObjectOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ObjectOperation::Upload => "upload",
			ObjectOperation::Download => "download",
			ObjectOperation::List => "list",
			ObjectOperation::Delete => "delete",
		};
		f.write_str(name)
	}
}

/// A parsed `property_documents/{propertyId}/{documentId}/{filename}` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath {
	pub property_id: String,
	pub document_id: String,
	pub filename: String,
}

impl ObjectPath {
	pub fn parse(key: &str) -> Result<Self, PathError> {
		match key.split('/').collect::<Vec<_>>().as_slice() {
			[namespace, property_id, document_id, filename]
				if *namespace == OBJECT_NAMESPACE
					&& !property_id.is_empty()
					&& !document_id.is_empty()
					&& !filename.is_empty() =>
			{
				Ok(Self {
					property_id: property_id.to_string(),
					document_id: document_id.to_string(),
					filename: filename.to_string(),
				})
			}
			_ => Err(PathError::NotAnObject(key.to_string(), OBJECT_NAMESPACE)),
		}
	}

	/// The document this object belongs to.
	pub fn document_path(&self) -> DocumentPath {
		CollectionPath::root(PROPERTIES)
			.doc(self.property_id.clone())
			.child(DOCUMENTS)
			.doc(self.document_id.clone())
	}

	pub fn key(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for ObjectPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{OBJECT_NAMESPACE}/{}/{}/{}",
			self.property_id, self.document_id, self.filename
		)
	}
}

/// Decides an object request given the resolved sibling document.
///
/// `document` is the stored document at [`ObjectPath::document_path`], and
/// `object_exists` whether an object is already stored at the path.
pub fn evaluate_object(
	requester: Option<&Requester>,
	operation: ObjectOperation,
	path: &ObjectPath,
	document: Option<&DocumentData>,
	object_exists: bool,
) -> Decision {
	let Some(uid) = requester.map(|r| &r.uid) else {
		return Decision::Deny;
	};
	let Some(document) = document else {
		return Decision::Deny;
	};
	let name_matches =
		document.fields().get("name").and_then(Value::as_str) == Some(path.filename.as_str());
	if !name_matches {
		return Decision::Deny;
	}

	let allowed = match operation {
		ObjectOperation::Upload => !object_exists && can_update(document, uid),
		ObjectOperation::Download => can_read(document, uid),
		ObjectOperation::List | ObjectOperation::Delete => false,
	};
	Decision::from(allowed)
}

/// Read-through access to stored documents.
#[async_trait]
pub trait DocumentLookup: Send + Sync {
	async fn lookup(&self, path: &DocumentPath) -> Option<DocumentData>;
}

#[async_trait]
impl<T: DocumentLookup + ?Sized> DocumentLookup for std::sync::Arc<T> {
	async fn lookup(&self, path: &DocumentPath) -> Option<DocumentData> {
		(**self).lookup(path).await
	}
}

/// Authorizes object requests by resolving the sibling document first.
pub struct ObjectAuthorizer<L> {
	lookup: L,
}

impl<L: DocumentLookup> ObjectAuthorizer<L> {
	pub fn new(lookup: L) -> Self {
		Self { lookup }
	}

	/// Decides a request against the raw object key.
	///
	/// Listing is denied before any lookup, whatever the prefix. Keys that are
	/// not well-formed object paths are denied.
	#[instrument(
        level = "debug",
        skip(self, requester),
        fields(uid = requester.map(|r| r.uid.as_str()).unwrap_or("<anonymous>"))
    )]
	pub async fn authorize(
		&self,
		requester: Option<&Requester>,
		operation: ObjectOperation,
		key: &str,
		object_exists: bool,
	) -> Decision {
		if operation == ObjectOperation::List {
			debug!("object listing denied");
			return Decision::Deny;
		}

		let Ok(path) = ObjectPath::parse(key) else {
			debug!("not an object path");
			return Decision::Deny;
		};

		let document = self.lookup.lookup(&path.document_path()).await;
		let decision = evaluate_object(requester, operation, &path, document.as_ref(), object_exists);
		debug!(?decision, document_found = document.is_some(), "object request evaluated");
		decision
	}
}
