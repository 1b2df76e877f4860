// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `properties/{id}/documents/{docId}` policy.
//!
//! Creating a document needs update rights on the parent property; after
//! that the document's own lists govern it. `name` is fixed at creation
//! because stored objects are keyed by it.

use crate::permissions::{can_read, can_update};
use crate::policies::{conforms, scoped_to_reader, unchanged};
use crate::shape::DOCUMENT_SHAPE;
use crate::types::{Operation, Request};

pub fn evaluate(request: &Request<'_>) -> bool {
	let Some(uid) = request.uid() else {
		return false;
	};

	match request.operation {
		Operation::Get => request.existing.is_some_and(|doc| can_read(doc, uid)),
		Operation::List => scoped_to_reader(request, uid),
		Operation::Create => {
			request.parent.is_some_and(|property| can_update(property, uid))
				&& conforms(&DOCUMENT_SHAPE, request.incoming)
		}
		Operation::Update => match (request.existing, request.incoming) {
			(Some(existing), Some(incoming)) => {
				can_update(existing, uid)
					&& unchanged(existing, incoming, "name")
					&& conforms(&DOCUMENT_SHAPE, Some(incoming))
			}
			_ => false,
		},
		Operation::Delete => false,
	}
}
