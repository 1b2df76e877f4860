// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Seed fixtures configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FixturesConfigLayer {
	pub path: Option<PathBuf>,
}

impl FixturesConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.path.is_some() {
			self.path = other.path;
		}
	}

	pub fn finalize(self) -> FixturesConfig {
		FixturesConfig { path: self.path }
	}
}

/// Seeding is skipped when `path` is unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FixturesConfig {
	pub path: Option<PathBuf>,
}
