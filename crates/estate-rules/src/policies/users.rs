// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `users/{uid}` policy.
//!
//! Profiles are seeded administratively. No client operation is granted,
//! including reads of one's own profile and requests carrying an admin claim.

use crate::types::Request;

pub fn evaluate(_request: &Request<'_>) -> bool {
	false
}
