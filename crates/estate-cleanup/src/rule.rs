// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cleanup rules: which deletions purge which object prefix.

use estate_rules::DocumentPath;

use crate::error::{CleanupError, Result};
use crate::trigger::{TriggerMatch, TriggerPattern};

/// Uploads owned by an inspection application live under its own path.
pub const DEFAULT_TRIGGER: &str = "inspectionApplications/{applicationId}";

pub const PROPERTY_TRIGGER: &str = "properties/{propertyId}";
pub const PROPERTY_PREFIX: &str = "property_documents/{propertyId}/";

pub const DOCUMENT_TRIGGER: &str = "properties/{propertyId}/documents/{documentId}";
pub const DOCUMENT_PREFIX: &str = "property_documents/{propertyId}/{documentId}/";

/// A trigger and the object prefix purged when a matching document is
/// deleted. The prefix is a template over the trigger's wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupRule {
	trigger: TriggerPattern,
	prefix: String,
}

impl CleanupRule {
	/// A rule purging `prefix`, with `{name}` placeholders filled from the
	/// trigger's captures. Every placeholder must name a trigger wildcard and
	/// the prefix must end in `/`.
	pub fn new(trigger: &str, prefix: &str) -> Result<Self> {
		let trigger = TriggerPattern::parse(trigger)?;
		let invalid = |reason| CleanupError::InvalidPrefix {
			prefix: prefix.to_string(),
			reason,
		};

		if !prefix.ends_with('/') || prefix.starts_with('/') {
			return Err(invalid("prefix must be relative and end in '/'"));
		}
		let wildcards = trigger.wildcards();
		for placeholder in placeholders(prefix).ok_or_else(|| invalid("malformed placeholder"))? {
			if !wildcards.contains(&placeholder) {
				return Err(invalid("placeholder is not a trigger wildcard"));
			}
		}

		Ok(Self {
			prefix: prefix.to_string(),
			trigger,
		})
	}

	/// A rule purging the objects stored under the deleted document's own
	/// path.
	pub fn same_path(trigger: &str) -> Result<Self> {
		Self::new(trigger, &format!("{trigger}/"))
	}

	pub fn trigger(&self) -> &TriggerPattern {
		&self.trigger
	}

	pub fn prefix_template(&self) -> &str {
		&self.prefix
	}

	/// The prefix to purge for a deleted `path`, if the trigger matches.
	pub fn prefix_for(&self, path: &DocumentPath) -> Option<String> {
		self.trigger.matches(path).map(|m| self.render(&m))
	}

	/// Fills the prefix template from captured wildcards.
	pub fn render(&self, matched: &TriggerMatch) -> String {
		let mut prefix = self.prefix.clone();
		for (name, value) in matched.params() {
			prefix = prefix.replace(&format!("{{{name}}}"), value);
		}
		prefix
	}
}

/// Names of the `{placeholders}` in `template`, or `None` if braces are
/// unbalanced.
fn placeholders(template: &str) -> Option<Vec<&str>> {
	let mut names = Vec::new();
	let mut rest = template;
	while let Some(start) = rest.find('{') {
		if rest[..start].contains('}') {
			return None;
		}
		let end = rest[start..].find('}')? + start;
		let name = &rest[start + 1..end];
		if name.is_empty() || name.contains('{') {
			return None;
		}
		names.push(name);
		rest = &rest[end + 1..];
	}
	if rest.contains('}') {
		return None;
	}
	Some(names)
}

/// Rules purging a property's stored objects when the property or one of
/// its documents is deleted.
pub fn property_rules() -> Vec<CleanupRule> {
	[(PROPERTY_TRIGGER, PROPERTY_PREFIX), (DOCUMENT_TRIGGER, DOCUMENT_PREFIX)]
		.into_iter()
		.filter_map(|(trigger, prefix)| CleanupRule::new(trigger, prefix).ok())
		.collect()
}

/// The rule set for an application trigger, optionally with the property
/// cascade.
pub fn rules_for(trigger: &str, cascade: bool) -> Result<Vec<CleanupRule>> {
	let mut rules = vec![CleanupRule::same_path(trigger)?];
	if cascade {
		rules.extend(property_rules());
	}
	Ok(rules)
}
