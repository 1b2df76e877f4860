// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `inspectors/{uid}` policy: readable and searchable by any signed-in user,
//! never writable.

use crate::types::{Operation, Request};

pub fn evaluate(request: &Request<'_>) -> bool {
	match request.operation {
		Operation::Get | Operation::List => request.requester.is_some(),
		Operation::Create | Operation::Update | Operation::Delete => false,
	}
}
