// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-collection policies and the small checks they are built from.

pub mod documents;
pub mod inspectors;
pub mod properties;
pub mod users;

use tracing::debug;

use crate::permissions::Capability;
use crate::shape::Shape;
use crate::types::{Request, Uid};
use crate::value::DocumentData;

/// Passes if `document` is present and conforms to `shape`.
pub(crate) fn conforms(shape: &Shape, document: Option<&DocumentData>) -> bool {
	let Some(document) = document else {
		return false;
	};
	match shape.validate(document.fields()) {
		Ok(()) => true,
		Err(violation) => {
			debug!(%violation, "document rejected by shape validator");
			false
		}
	}
}

/// Passes if the top-level `field` is the same before and after the write.
pub(crate) fn unchanged(existing: &DocumentData, incoming: &DocumentData, field: &str) -> bool {
	!existing.diff_keys(incoming).contains(field)
}

/// Passes if the list query provably returns only documents `uid` may read.
pub(crate) fn scoped_to_reader(request: &Request<'_>, uid: &Uid) -> bool {
	request
		.query
		.map(|q| q.binds_member(&Capability::Read.field_path(), uid))
		.unwrap_or(false)
}
