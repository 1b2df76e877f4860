// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use estate_rules::PathError;

/// Store errors.
///
/// Every policy denial is reported as [`StoreError::PermissionDenied`] with
/// no reason attached: a missing target, a malformed document and a missing
/// grant look the same to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("Permission denied: {operation} {path}")]
	PermissionDenied { operation: String, path: String },

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Already exists: {0}")]
	AlreadyExists(String),

	#[error("Invalid path: {0}")]
	InvalidPath(#[from] PathError),

	#[error("Invalid data: {0}")]
	InvalidData(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl StoreError {
	pub(crate) fn denied(operation: impl ToString, path: impl ToString) -> Self {
		StoreError::PermissionDenied {
			operation: operation.to_string(),
			path: path.to_string(),
		}
	}

	pub fn is_permission_denied(&self) -> bool {
		matches!(self, StoreError::PermissionDenied { .. })
	}
}

pub type Result<T> = std::result::Result<T, StoreError>;
