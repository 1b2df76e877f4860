// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use estate_rules::Requester;
use tokio::sync::broadcast;

use crate::admin::AdminClient;
use crate::client::Client;
use crate::documents::DocumentStore;
use crate::events::DocumentEvent;
use crate::objects::{MemoryObjectStore, ObjectStore};

/// Project id used when none is configured.
pub const DEFAULT_PROJECT_ID: &str = "local";

/// The document store and object store of one project, shared by every
/// client handed out.
#[derive(Clone)]
pub struct Platform {
	project_id: Arc<str>,
	documents: Arc<DocumentStore>,
	objects: Arc<dyn ObjectStore>,
}

impl Platform {
	/// In-memory platform with the given change-feed buffer.
	pub fn in_memory(event_capacity: usize) -> Self {
		Self::new(
			DEFAULT_PROJECT_ID,
			Arc::new(DocumentStore::new(event_capacity)),
			Arc::new(MemoryObjectStore::new()),
		)
	}

	/// In-memory platform for `project_id`, storing objects in `bucket`.
	pub fn in_memory_for(project_id: &str, bucket: &str, event_capacity: usize) -> Self {
		Self::new(
			project_id,
			Arc::new(DocumentStore::new(event_capacity)),
			Arc::new(MemoryObjectStore::with_bucket(bucket)),
		)
	}

	pub fn new(
		project_id: &str,
		documents: Arc<DocumentStore>,
		objects: Arc<dyn ObjectStore>,
	) -> Self {
		Self {
			project_id: Arc::from(project_id),
			documents,
			objects,
		}
	}

	pub fn project_id(&self) -> &str {
		&self.project_id
	}

	pub fn bucket(&self) -> &str {
		self.objects.bucket()
	}

	/// A client acting as `requester`.
	pub fn client(&self, requester: Requester) -> Client {
		Client::new(
			Some(requester),
			Arc::clone(&self.documents),
			Arc::clone(&self.objects),
		)
	}

	/// A client with no identity.
	pub fn anonymous(&self) -> Client {
		Client::new(None, Arc::clone(&self.documents), Arc::clone(&self.objects))
	}

	pub fn admin(&self) -> AdminClient {
		AdminClient::new(Arc::clone(&self.documents), Arc::clone(&self.objects))
	}

	pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
		self.documents.subscribe()
	}

	pub fn documents(&self) -> &Arc<DocumentStore> {
		&self.documents
	}

	pub fn objects(&self) -> &Arc<dyn ObjectStore> {
		&self.objects
	}
}

impl Default for Platform {
	fn default() -> Self {
		Self::in_memory(256)
	}
}
