// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `properties/{id}` policy.

use crate::permissions::{can_read, can_update};
use crate::policies::{conforms, scoped_to_reader};
use crate::shape::PROPERTY_SHAPE;
use crate::types::{Operation, Request};

pub fn evaluate(request: &Request<'_>) -> bool {
	let Some(uid) = request.uid() else {
		return false;
	};

	match request.operation {
		Operation::Get => request.existing.is_some_and(|doc| can_read(doc, uid)),
		Operation::List => scoped_to_reader(request, uid),
		// The creator is expected to list themselves in `permissions`; nothing
		// here enforces it.
		Operation::Create => conforms(&PROPERTY_SHAPE, request.incoming),
		Operation::Update => {
			request.existing.is_some_and(|doc| can_update(doc, uid))
				&& conforms(&PROPERTY_SHAPE, request.incoming)
		}
		Operation::Delete => false,
	}
}
