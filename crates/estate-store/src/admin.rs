// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Administrative client. Bypasses the policy engine entirely.

use std::sync::Arc;

use bytes::Bytes;
use estate_rules::{CollectionPath, DocumentData, DocumentPath, Query};
use tracing::{info, instrument};

use crate::client::auto_id;
use crate::documents::{Access, DocumentStore, Snapshot};
use crate::error::{Result, StoreError};
use crate::objects::ObjectStore;
use crate::patch::Patch;

#[derive(Clone)]
pub struct AdminClient {
	documents: Arc<DocumentStore>,
	objects: Arc<dyn ObjectStore>,
}

impl AdminClient {
	pub(crate) fn new(documents: Arc<DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
		Self { documents, objects }
	}

	pub async fn get(&self, path: &str) -> Result<Option<DocumentData>> {
		let path = DocumentPath::parse(path)?;
		self.documents.get(Access::Admin, &path).await
	}

	pub async fn add(&self, collection: &str, data: DocumentData) -> Result<DocumentPath> {
		let path = CollectionPath::parse(collection)?.doc(auto_id());
		self.documents.create(Access::Admin, &path, data).await?;
		Ok(path)
	}

	pub async fn set(&self, path: &str, data: DocumentData) -> Result<()> {
		let path = DocumentPath::parse(path)?;
		self.documents.set(Access::Admin, &path, data).await
	}

	pub async fn update(&self, path: &str, patch: &Patch) -> Result<DocumentData> {
		let path = DocumentPath::parse(path)?;
		self.documents.update(Access::Admin, &path, patch).await
	}

	/// Deletes a document and publishes a deletion event to subscribers.
	#[instrument(level = "debug", skip(self))]
	pub async fn delete(&self, path: &str) -> Result<bool> {
		let path = DocumentPath::parse(path)?;
		let removed = self.documents.delete(Access::Admin, &path).await?;
		if removed {
			info!(path = %path, "document deleted by admin");
		}
		Ok(removed)
	}

	pub async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Snapshot>> {
		let collection = CollectionPath::parse(collection)?;
		self.documents.query(Access::Admin, &collection, query).await
	}

	/// Stores an object, replacing any existing one.
	pub async fn upload(&self, key: &str, data: Bytes) -> Result<()> {
		self.objects.put(key, data).await
	}

	pub async fn download(&self, key: &str) -> Result<Bytes> {
		self.objects
			.get(key)
			.await?
			.ok_or_else(|| StoreError::NotFound(key.to_string()))
	}

	pub async fn list_objects(&self, prefix: &str) -> Result<Vec<String>> {
		self.objects.list(prefix).await
	}

	pub async fn delete_object(&self, key: &str) -> Result<bool> {
		self.objects.delete(key).await
	}
}
