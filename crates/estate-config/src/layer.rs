// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::sections::{
	CleanupConfigLayer, FixturesConfigLayer, LoggingConfigLayer, ProjectConfigLayer,
	StorageConfigLayer,
};

/// One source's partial view of the configuration. Unset sections and
/// fields leave lower-precedence values in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EstateConfigLayer {
	pub project: Option<ProjectConfigLayer>,
	pub storage: Option<StorageConfigLayer>,
	pub cleanup: Option<CleanupConfigLayer>,
	pub fixtures: Option<FixturesConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	let Some(incoming) = other else {
		return;
	};
	if let Some(existing) = base.as_mut() {
		merge(existing, incoming);
	} else {
		*base = Some(incoming);
	}
}

impl EstateConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.project, other.project, ProjectConfigLayer::merge);
		merge_section(&mut self.storage, other.storage, StorageConfigLayer::merge);
		merge_section(&mut self.cleanup, other.cleanup, CleanupConfigLayer::merge);
		merge_section(&mut self.fixtures, other.fixtures, FixturesConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}
