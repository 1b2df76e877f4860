// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rule-enforcing client.
//!
//! A [`Client`] acts for one requester (or anonymously). Every document call
//! goes through the policy engine and every object call through the
//! [`ObjectAuthorizer`]; denials surface as [`StoreError::PermissionDenied`].

use std::sync::Arc;

use bytes::Bytes;
use estate_rules::{
	CollectionPath, DocumentData, DocumentPath, ObjectAuthorizer, ObjectOperation, Query, Requester,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::documents::{Access, DocumentStore, Snapshot};
use crate::error::{Result, StoreError};
use crate::objects::ObjectStore;
use crate::patch::Patch;

/// Generates a document id for [`Client::add`] and `AdminClient::add`.
pub(crate) fn auto_id() -> String {
	Uuid::new_v4().simple().to_string()
}

#[derive(Clone)]
pub struct Client {
	requester: Option<Requester>,
	documents: Arc<DocumentStore>,
	objects: Arc<dyn ObjectStore>,
	authorizer: Arc<ObjectAuthorizer<Arc<DocumentStore>>>,
}

impl Client {
	pub(crate) fn new(
		requester: Option<Requester>,
		documents: Arc<DocumentStore>,
		objects: Arc<dyn ObjectStore>,
	) -> Self {
		let authorizer = Arc::new(ObjectAuthorizer::new(Arc::clone(&documents)));
		Self {
			requester,
			documents,
			objects,
			authorizer,
		}
	}

	pub fn requester(&self) -> Option<&Requester> {
		self.requester.as_ref()
	}

	fn access(&self) -> Access<'_> {
		Access::Rules(self.requester.as_ref())
	}

	pub async fn get(&self, path: &str) -> Result<Option<DocumentData>> {
		let path = DocumentPath::parse(path)?;
		self.documents.get(self.access(), &path).await
	}

	/// Creates a document with a generated id and returns its path.
	pub async fn add(&self, collection: &str, data: DocumentData) -> Result<DocumentPath> {
		let path = CollectionPath::parse(collection)?.doc(auto_id());
		self.documents.create(self.access(), &path, data).await?;
		Ok(path)
	}

	/// Writes a document at an explicit path.
	pub async fn set(&self, path: &str, data: DocumentData) -> Result<()> {
		let path = DocumentPath::parse(path)?;
		self.documents.set(self.access(), &path, data).await
	}

	pub async fn update(&self, path: &str, patch: &Patch) -> Result<DocumentData> {
		let path = DocumentPath::parse(path)?;
		self.documents.update(self.access(), &path, patch).await
	}

	pub async fn delete(&self, path: &str) -> Result<bool> {
		let path = DocumentPath::parse(path)?;
		self.documents.delete(self.access(), &path).await
	}

	pub async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Snapshot>> {
		let collection = CollectionPath::parse(collection)?;
		self.documents.query(self.access(), &collection, query).await
	}

	/// Uploads an object. Never overwrites: a second upload to the same key
	/// is denied, for every requester.
	#[instrument(level = "debug", skip(self, data), fields(size = data.len()))]
	pub async fn upload(&self, key: &str, data: Bytes) -> Result<()> {
		let exists = self.objects.exists(key).await?;
		self.authorize(ObjectOperation::Upload, key, exists).await?;

		// A concurrent upload may have landed since the check.
		if !self.objects.put_if_absent(key, data).await? {
			debug!("object appeared during upload");
			return Err(StoreError::denied(ObjectOperation::Upload, key));
		}
		Ok(())
	}

	#[instrument(level = "debug", skip(self))]
	pub async fn download(&self, key: &str) -> Result<Bytes> {
		let exists = self.objects.exists(key).await?;
		self.authorize(ObjectOperation::Download, key, exists).await?;
		self.objects
			.get(key)
			.await?
			.ok_or_else(|| StoreError::NotFound(key.to_string()))
	}

	/// Listing objects is never allowed to clients.
	pub async fn list_objects(&self, prefix: &str) -> Result<Vec<String>> {
		self.authorize(ObjectOperation::List, prefix, false).await?;
		self.objects.list(prefix).await
	}

	/// Deleting objects is never allowed to clients.
	pub async fn delete_object(&self, key: &str) -> Result<bool> {
		let exists = self.objects.exists(key).await?;
		self.authorize(ObjectOperation::Delete, key, exists).await?;
		self.objects.delete(key).await
	}

	async fn authorize(&self, operation: ObjectOperation, key: &str, exists: bool) -> Result<()> {
		let decision = self
			.authorizer
			.authorize(self.requester.as_ref(), operation, key, exists)
			.await;
		if decision.is_allowed() {
			Ok(())
		} else {
			Err(StoreError::denied(operation, key))
		}
	}
}
