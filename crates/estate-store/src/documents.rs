// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory document store.
//!
//! Each operation takes the store lock once and evaluates the policy against
//! the snapshot it holds, so the decision and the write see the same data.

use std::collections::BTreeMap;

use async_trait::async_trait;
use estate_rules::{
	evaluate, CollectionPath, DocumentData, DocumentLookup, DocumentPath, Query, Request, Requester,
};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, instrument};

use crate::error::{Result, StoreError};
use crate::events::{ChangeKind, DocumentEvent};
use crate::patch::Patch;

/// How a call is authorized.
#[derive(Debug, Clone, Copy)]
pub enum Access<'a> {
	/// Evaluate the policy engine for this caller (`None` = anonymous).
	Rules(Option<&'a Requester>),
	/// Bypass the policy engine.
	Admin,
}

/// A document and where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
	pub path: DocumentPath,
	pub data: DocumentData,
}

fn check(access: Access<'_>, request: Request<'_>) -> Result<()> {
	let Access::Rules(requester) = access else {
		return Ok(());
	};
	let request = request.by(requester);
	if evaluate(&request).is_allowed() {
		return Ok(());
	}
	let path = match request.document_id {
		Some(id) => format!("{}/{id}", request.collection),
		None => request.collection.to_string(),
	};
	Err(StoreError::denied(request.operation, path))
}

pub struct DocumentStore {
	docs: RwLock<BTreeMap<DocumentPath, DocumentData>>,
	events: broadcast::Sender<DocumentEvent>,
}

impl DocumentStore {
	/// Creates an empty store whose change feed buffers `event_capacity`
	/// events per subscriber.
	pub fn new(event_capacity: usize) -> Self {
		let (events, _) = broadcast::channel(event_capacity.max(1));
		Self {
			docs: RwLock::new(BTreeMap::new()),
			events,
		}
	}

	/// Subscribes to committed changes.
	pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
		self.events.subscribe()
	}

	/// Callers publish while still holding the write guard, so subscribers
	/// see events in commit order.
	fn publish(&self, kind: ChangeKind, path: &DocumentPath, data: &DocumentData) {
		// No subscribers is not an error.
		let _ = self.events.send(DocumentEvent {
			kind,
			path: path.clone(),
			data: data.clone(),
		});
	}

	#[instrument(level = "debug", skip(self, access), fields(path = %path))]
	pub async fn get(&self, access: Access<'_>, path: &DocumentPath) -> Result<Option<DocumentData>> {
		let docs = self.docs.read().await;
		let existing = docs.get(path);
		check(access, Request::get(path, existing))?;
		Ok(existing.cloned())
	}

	/// Creates a document, failing if one already exists at `path`.
	#[instrument(level = "debug", skip(self, access, data), fields(path = %path))]
	pub async fn create(
		&self,
		access: Access<'_>,
		path: &DocumentPath,
		data: DocumentData,
	) -> Result<()> {
		let mut docs = self.docs.write().await;
		let parent = path.parent().and_then(|p| docs.get(&p));
		check(access, Request::create(path, &data).with_parent(parent))?;
		if docs.contains_key(path) {
			return Err(StoreError::AlreadyExists(path.to_string()));
		}
		docs.insert(path.clone(), data.clone());
		debug!("document created");
		self.publish(ChangeKind::Created, path, &data);
		Ok(())
	}

	/// Writes the whole document: a create if absent, otherwise an update
	/// replacing every field.
	#[instrument(level = "debug", skip(self, access, data), fields(path = %path))]
	pub async fn set(&self, access: Access<'_>, path: &DocumentPath, data: DocumentData) -> Result<()> {
		let mut docs = self.docs.write().await;
		let kind = match docs.get(path) {
			Some(existing) => {
				check(access, Request::update(path, existing, &data))?;
				ChangeKind::Updated
			}
			None => {
				let parent = path.parent().and_then(|p| docs.get(&p));
				check(access, Request::create(path, &data).with_parent(parent))?;
				ChangeKind::Created
			}
		};
		docs.insert(path.clone(), data.clone());
		self.publish(kind, path, &data);
		Ok(())
	}

	/// Applies `patch` to an existing document and returns the result.
	#[instrument(level = "debug", skip(self, access, patch), fields(path = %path))]
	pub async fn update(
		&self,
		access: Access<'_>,
		path: &DocumentPath,
		patch: &Patch,
	) -> Result<DocumentData> {
		let mut docs = self.docs.write().await;
		let Some(existing) = docs.get(path) else {
			return Err(match access {
				Access::Admin => StoreError::NotFound(path.to_string()),
				Access::Rules(_) => StoreError::denied("update", path),
			});
		};
		let merged = patch.apply(existing)?;
		check(access, Request::update(path, existing, &merged))?;
		docs.insert(path.clone(), merged.clone());
		self.publish(ChangeKind::Updated, path, &merged);
		Ok(merged)
	}

	/// Deletes a document. Returns whether anything was removed; deleting an
	/// absent document is not an error.
	#[instrument(level = "debug", skip(self, access), fields(path = %path))]
	pub async fn delete(&self, access: Access<'_>, path: &DocumentPath) -> Result<bool> {
		let mut docs = self.docs.write().await;
		check(access, Request::delete(path, docs.get(path)))?;
		let removed = docs.remove(path);
		match removed {
			Some(data) => {
				debug!("document deleted");
				self.publish(ChangeKind::Deleted, path, &data);
				Ok(true)
			}
			None => Ok(false),
		}
	}

	/// Runs `query` over the documents directly inside `collection`.
	#[instrument(level = "debug", skip(self, access, query), fields(collection = %collection))]
	pub async fn query(
		&self,
		access: Access<'_>,
		collection: &CollectionPath,
		query: &Query,
	) -> Result<Vec<Snapshot>> {
		check(access, Request::list(collection, query))?;
		let docs = self.docs.read().await;
		let matches = docs
			.iter()
			.filter(|(path, data)| path.collection() == collection && query.matches(data))
			.map(|(path, data)| Snapshot {
				path: path.clone(),
				data: data.clone(),
			});
		Ok(match query.limit {
			Some(limit) => matches.take(limit).collect(),
			None => matches.collect(),
		})
	}

	pub async fn len(&self) -> usize {
		self.docs.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.docs.read().await.is_empty()
	}
}

impl Default for DocumentStore {
	fn default() -> Self {
		Self::new(256)
	}
}

#[async_trait]
impl DocumentLookup for DocumentStore {
	async fn lookup(&self, path: &DocumentPath) -> Option<DocumentData> {
		self.docs.read().await.get(path).cloned()
	}
}
