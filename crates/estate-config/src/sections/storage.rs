// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object storage configuration section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfigLayer {
	pub bucket: Option<String>,
}

impl StorageConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.bucket.is_some() {
			self.bucket = other.bucket;
		}
	}

	/// The bucket defaults to the project's `{project_id}.appspot.com`.
	pub fn finalize(self, project_id: &str) -> StorageConfig {
		StorageConfig {
			bucket: self
				.bucket
				.unwrap_or_else(|| format!("{project_id}.appspot.com")),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
	pub bucket: String,
}
