// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object storage backends.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::Result;

/// A flat key/bytes object store.
///
/// Keys are `/`-separated but the store itself has no notion of folders;
/// prefix operations match on the raw key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
	/// Name of the bucket the keys live in.
	fn bucket(&self) -> &str;

	/// Stores `data` only if nothing is stored at `key`. Returns `false` and
	/// leaves the existing object untouched otherwise.
	async fn put_if_absent(&self, key: &str, data: Bytes) -> Result<bool>;

	/// Stores `data`, replacing any existing object.
	async fn put(&self, key: &str, data: Bytes) -> Result<()>;

	async fn get(&self, key: &str) -> Result<Option<Bytes>>;

	async fn exists(&self, key: &str) -> Result<bool>;

	/// Keys starting with `prefix`, in lexical order.
	async fn list(&self, prefix: &str) -> Result<Vec<String>>;

	/// Returns whether an object was removed.
	async fn delete(&self, key: &str) -> Result<bool>;

	/// Deletes every object under `prefix` and returns how many were removed.
	async fn delete_prefix(&self, prefix: &str) -> Result<usize>;
}

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "local";

pub struct MemoryObjectStore {
	bucket: String,
	objects: RwLock<BTreeMap<String, Bytes>>,
}

impl MemoryObjectStore {
	pub fn new() -> Self {
		Self::with_bucket(DEFAULT_BUCKET)
	}

	pub fn with_bucket(bucket: impl Into<String>) -> Self {
		Self {
			bucket: bucket.into(),
			objects: RwLock::new(BTreeMap::new()),
		}
	}

	pub async fn len(&self) -> usize {
		self.objects.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.objects.read().await.is_empty()
	}
}

impl Default for MemoryObjectStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
	fn bucket(&self) -> &str {
		&self.bucket
	}

	async fn put_if_absent(&self, key: &str, data: Bytes) -> Result<bool> {
		let mut objects = self.objects.write().await;
		if objects.contains_key(key) {
			return Ok(false);
		}
		objects.insert(key.to_string(), data);
		Ok(true)
	}

	async fn put(&self, key: &str, data: Bytes) -> Result<()> {
		self.objects.write().await.insert(key.to_string(), data);
		Ok(())
	}

	async fn get(&self, key: &str) -> Result<Option<Bytes>> {
		Ok(self.objects.read().await.get(key).cloned())
	}

	async fn exists(&self, key: &str) -> Result<bool> {
		Ok(self.objects.read().await.contains_key(key))
	}

	async fn list(&self, prefix: &str) -> Result<Vec<String>> {
		let objects = self.objects.read().await;
		Ok(objects
			.range(prefix.to_string()..)
			.take_while(|(key, _)| key.starts_with(prefix))
			.map(|(key, _)| key.clone())
			.collect())
	}

	async fn delete(&self, key: &str) -> Result<bool> {
		Ok(self.objects.write().await.remove(key).is_some())
	}

	#[instrument(level = "debug", skip(self), fields(bucket = %self.bucket))]
	async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
		let mut objects = self.objects.write().await;
		let before = objects.len();
		objects.retain(|key, _| !key.starts_with(prefix));
		let removed = before - objects.len();
		debug!(removed, "deleted objects under prefix");
		Ok(removed)
	}
}
