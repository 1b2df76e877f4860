// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed views of the stored collections, and seed fixtures.

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use estate_rules::DocumentData;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::admin::AdminClient;
use crate::error::{Result, StoreError};

/// A struct with a fixed document layout.
pub trait Record: Serialize + DeserializeOwned {
	fn to_document(&self) -> Result<DocumentData> {
		let json = serde_json::to_value(self)?;
		DocumentData::from_json(json)
			.ok_or_else(|| StoreError::InvalidData("record is not a JSON object".to_string()))
	}

	fn from_document(document: &DocumentData) -> Result<Self> {
		Ok(serde_json::from_value(document.to_json())?)
	}
}

/// Inspection kinds an inspector accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Acceptable {
	#[serde(rename = "inspection_simple")]
	InspectionSimple,
	#[serde(rename = "flat35_used")]
	Flat35Used,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
	pub read: Vec<String>,
	pub update: Vec<String>,
}

impl Permissions {
	/// Both lists set to `uids`.
	pub fn owned_by<I, S>(uids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let uids: Vec<String> = uids.into_iter().map(Into::into).collect();
		Self {
			read: uids.clone(),
			update: uids,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
	pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorRecord {
	pub acceptables: Vec<Acceptable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
	pub name: String,
	pub permissions: Permissions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
	pub name: String,
	pub tags: Vec<String>,
	pub permissions: Permissions,
}

impl Record for UserRecord {}
impl Record for InspectorRecord {}
impl Record for PropertyRecord {}
impl Record for DocumentRecord {}

/// Seed data written through the admin client at startup.
///
/// ```json
/// {
///   "documents": { "users/u1": { "email": "u1@example.com" } },
///   "objects": { "inspectionApplications/a1/photo.jpg": "raw text" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
	#[serde(default)]
	pub documents: BTreeMap<String, serde_json::Value>,
	#[serde(default)]
	pub objects: BTreeMap<String, String>,
}

impl Fixtures {
	pub async fn load(path: &Path) -> Result<Self> {
		let content = tokio::fs::read_to_string(path).await?;
		Ok(serde_json::from_str(&content)?)
	}

	/// Writes every fixture, replacing anything already stored at the same
	/// paths. Returns the number of documents and objects written.
	#[instrument(level = "debug", skip_all)]
	pub async fn apply(&self, admin: &AdminClient) -> Result<(usize, usize)> {
		for (path, json) in &self.documents {
			let data = DocumentData::from_json(json.clone()).ok_or_else(|| {
				StoreError::InvalidData(format!("fixture {path} is not a JSON object"))
			})?;
			admin.set(path, data).await?;
			debug!(%path, "seeded document");
		}
		for (key, content) in &self.objects {
			admin
				.upload(key, Bytes::copy_from_slice(content.as_bytes()))
				.await?;
		}
		info!(
			documents = self.documents.len(),
			objects = self.objects.len(),
			"fixtures applied"
		);
		Ok((self.documents.len(), self.objects.len()))
	}
}
