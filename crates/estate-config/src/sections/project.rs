// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project configuration section.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_ID: &str = "min-nano-test";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfigLayer {
	pub project_id: Option<String>,
}

impl ProjectConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.project_id.is_some() {
			self.project_id = other.project_id;
		}
	}

	pub fn finalize(self) -> ProjectConfig {
		ProjectConfig {
			project_id: self
				.project_id
				.unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string()),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
	pub project_id: String,
}

impl Default for ProjectConfig {
	fn default() -> Self {
		Self {
			project_id: DEFAULT_PROJECT_ID.to_string(),
		}
	}
}
