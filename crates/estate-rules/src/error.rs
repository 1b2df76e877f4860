// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors raised while parsing document, collection, field or object paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
	#[error("path is empty")]
	Empty,

	#[error("path '{0}' contains an empty segment")]
	EmptySegment(String),

	#[error("'{0}' is not a document path (expected an even number of segments)")]
	NotADocument(String),

	#[error("'{0}' is not a collection path (expected an odd number of segments)")]
	NotACollection(String),

	#[error("'{0}' is not an object path under '{1}'")]
	NotAnObject(String, &'static str),
}

pub type Result<T> = std::result::Result<T, PathError>;
