// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document path patterns such as `inspectionApplications/{applicationId}`.

use std::collections::BTreeMap;
use std::fmt;

use estate_rules::DocumentPath;

use crate::error::{CleanupError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Wildcard(String),
}

/// A document path pattern. Each segment is either a literal or a
/// `{name}` wildcard matching exactly one path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerPattern {
	raw: String,
	segments: Vec<Segment>,
}

/// Wildcard values captured by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerMatch {
	params: BTreeMap<String, String>,
}

impl TriggerMatch {
	pub fn get(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	pub fn params(&self) -> &BTreeMap<String, String> {
		&self.params
	}
}

impl TriggerPattern {
	pub fn parse(pattern: &str) -> Result<Self> {
		let invalid = |reason| CleanupError::InvalidTrigger {
			pattern: pattern.to_string(),
			reason,
		};

		let mut segments = Vec::new();
		for raw in pattern.split('/') {
			if raw.is_empty() {
				return Err(invalid("empty segment"));
			}
			let segment = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
				Some(name) if name.is_empty() || name.contains(['{', '}']) => {
					return Err(invalid("malformed wildcard"));
				}
				Some(name) => {
					if segments.contains(&Segment::Wildcard(name.to_string())) {
						return Err(invalid("duplicate wildcard"));
					}
					Segment::Wildcard(name.to_string())
				}
				None if raw.contains(['{', '}']) => return Err(invalid("malformed wildcard")),
				None => Segment::Literal(raw.to_string()),
			};
			segments.push(segment);
		}

		if segments.len() % 2 != 0 {
			return Err(invalid("pattern must name a document, not a collection"));
		}

		Ok(Self {
			raw: pattern.to_string(),
			segments,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Names of the wildcards, in path order.
	pub fn wildcards(&self) -> Vec<&str> {
		self.segments
			.iter()
			.filter_map(|s| match s {
				Segment::Wildcard(name) => Some(name.as_str()),
				Segment::Literal(_) => None,
			})
			.collect()
	}

	/// The wildcard naming the document id, if the last segment is one.
	pub fn document_wildcard(&self) -> Option<&str> {
		match self.segments.last() {
			Some(Segment::Wildcard(name)) => Some(name),
			_ => None,
		}
	}

	pub fn matches(&self, path: &DocumentPath) -> Option<TriggerMatch> {
		let mut parts = path.collection().segments().to_vec();
		parts.push(path.id().to_string());
		if parts.len() != self.segments.len() {
			return None;
		}

		let mut params = BTreeMap::new();
		for (segment, part) in self.segments.iter().zip(parts) {
			match segment {
				Segment::Literal(literal) if *literal == part => {}
				Segment::Literal(_) => return None,
				Segment::Wildcard(name) => {
					params.insert(name.clone(), part);
				}
			}
		}
		Some(TriggerMatch { params })
	}
}

impl fmt::Display for TriggerPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}
