// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document change events, published after each successful write.

use estate_rules::{DocumentData, DocumentPath};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
	Created,
	Updated,
	Deleted,
}

/// A committed change to one document.
#[derive(Debug, Clone)]
pub struct DocumentEvent {
	pub kind: ChangeKind,
	pub path: DocumentPath,
	/// The document after the change, or the last state before deletion.
	pub data: DocumentData,
}

impl DocumentEvent {
	pub fn is_delete(&self) -> bool {
		self.kind == ChangeKind::Deleted
	}
}
