// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document and collection paths, and the routes the engine dispatches on.

use std::fmt;

use crate::error::{PathError, Result};

pub const USERS: &str = "users";
pub const INSPECTORS: &str = "inspectors";
pub const PROPERTIES: &str = "properties";
pub const DOCUMENTS: &str = "documents";

fn split(path: &str) -> Result<Vec<String>> {
	let trimmed = path.trim_matches('/');
	if trimmed.is_empty() {
		return Err(PathError::Empty);
	}
	let segments: Vec<String> = trimmed.split('/').map(str::to_string).collect();
	if segments.iter().any(String::is_empty) {
		return Err(PathError::EmptySegment(path.to_string()));
	}
	Ok(segments)
}

/// Path to a collection: `properties` or `properties/{id}/documents`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionPath {
	segments: Vec<String>,
}

impl CollectionPath {
	pub fn parse(path: &str) -> Result<Self> {
		let segments = split(path)?;
		if segments.len() % 2 == 0 {
			return Err(PathError::NotACollection(path.to_string()));
		}
		Ok(Self { segments })
	}

	/// A top-level collection.
	pub fn root(collection_id: impl Into<String>) -> Self {
		Self {
			segments: vec![collection_id.into()],
		}
	}

	pub fn collection_id(&self) -> &str {
		&self.segments[self.segments.len() - 1]
	}

	/// The document this collection is nested under, if any.
	pub fn parent(&self) -> Option<DocumentPath> {
		if self.segments.len() < 3 {
			return None;
		}
		let parent_segments = &self.segments[..self.segments.len() - 1];
		let (id, collection) = parent_segments.split_last()?;
		Some(DocumentPath {
			collection: CollectionPath {
				segments: collection.to_vec(),
			},
			id: id.clone(),
		})
	}

	/// The document with the given id in this collection.
	pub fn doc(&self, id: impl Into<String>) -> DocumentPath {
		DocumentPath {
			collection: self.clone(),
			id: id.into(),
		}
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}
}

impl fmt::Display for CollectionPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.segments.join("/"))
	}
}

/// Path to a single document: `properties/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentPath {
	collection: CollectionPath,
	id: String,
}

impl DocumentPath {
	pub fn parse(path: &str) -> Result<Self> {
		let mut segments = split(path)?;
		if segments.len() % 2 != 0 {
			return Err(PathError::NotADocument(path.to_string()));
		}
		let id = segments.pop().ok_or(PathError::Empty)?;
		Ok(Self {
			collection: CollectionPath { segments },
			id,
		})
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn collection(&self) -> &CollectionPath {
		&self.collection
	}

	/// The document this one is nested under, if any.
	pub fn parent(&self) -> Option<DocumentPath> {
		self.collection.parent()
	}

	/// A sub-collection of this document.
	pub fn child(&self, collection_id: impl Into<String>) -> CollectionPath {
		let mut segments = self.collection.segments.clone();
		segments.push(self.id.clone());
		segments.push(collection_id.into());
		CollectionPath { segments }
	}
}

impl fmt::Display for DocumentPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.collection, self.id)
	}
}

/// The rule set a collection falls under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
	Users,
	Inspectors,
	Properties,
	PropertyDocuments { property_id: String },
	Unmatched,
}

impl Route {
	pub fn classify(collection: &CollectionPath) -> Self {
		match collection.segments() {
			[c] if c == USERS => Route::Users,
			[c] if c == INSPECTORS => Route::Inspectors,
			[c] if c == PROPERTIES => Route::Properties,
			[p, property_id, d] if p == PROPERTIES && d == DOCUMENTS => Route::PropertyDocuments {
				property_id: property_id.clone(),
			},
			_ => Route::Unmatched,
		}
	}
}
