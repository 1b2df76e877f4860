// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cleanup handler configuration section.

use std::fmt;
use std::str::FromStr;

use estate_cleanup::{rules_for, CleanupError, CleanupRule, DEFAULT_TRIGGER};
use serde::{Deserialize, Serialize};

/// Which cleanup front-end(s) to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupMode {
	#[default]
	Event,
	Legacy,
	Both,
}

impl CleanupMode {
	pub fn runs_event(self) -> bool {
		matches!(self, CleanupMode::Event | CleanupMode::Both)
	}

	pub fn runs_legacy(self) -> bool {
		matches!(self, CleanupMode::Legacy | CleanupMode::Both)
	}
}

impl FromStr for CleanupMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"event" => Ok(CleanupMode::Event),
			"legacy" => Ok(CleanupMode::Legacy),
			"both" => Ok(CleanupMode::Both),
			other => Err(format!("unknown cleanup mode '{other}'")),
		}
	}
}

impl fmt::Display for CleanupMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			CleanupMode::Event => "event",
			CleanupMode::Legacy => "legacy",
			CleanupMode::Both => "both",
		})
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CleanupConfigLayer {
	pub enabled: Option<bool>,
	pub mode: Option<CleanupMode>,
	pub trigger: Option<String>,
	pub cascade: Option<bool>,
	pub event_buffer: Option<usize>,
}

impl CleanupConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.mode.is_some() {
			self.mode = other.mode;
		}
		if other.trigger.is_some() {
			self.trigger = other.trigger;
		}
		if other.cascade.is_some() {
			self.cascade = other.cascade;
		}
		if other.event_buffer.is_some() {
			self.event_buffer = other.event_buffer;
		}
	}

	pub fn finalize(self) -> CleanupConfig {
		let defaults = CleanupConfig::default();
		CleanupConfig {
			enabled: self.enabled.unwrap_or(defaults.enabled),
			mode: self.mode.unwrap_or(defaults.mode),
			trigger: self.trigger.unwrap_or(defaults.trigger),
			cascade: self.cascade.unwrap_or(defaults.cascade),
			event_buffer: self.event_buffer.unwrap_or(defaults.event_buffer),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanupConfig {
	pub enabled: bool,
	pub mode: CleanupMode,
	/// Trigger whose deletions purge the objects under the document's path.
	pub trigger: String,
	/// Also purge `property_documents/` when a property or one of its
	/// documents is deleted.
	pub cascade: bool,
	pub event_buffer: usize,
}

impl CleanupConfig {
	/// The cleanup rules this configuration enables.
	pub fn rules(&self) -> Result<Vec<CleanupRule>, CleanupError> {
		rules_for(&self.trigger, self.cascade)
	}
}

impl Default for CleanupConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			mode: CleanupMode::Event,
			trigger: DEFAULT_TRIGGER.to_string(),
			cascade: true,
			event_buffer: 256,
		}
	}
}
