// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy evaluation entry point.
//!
//! [`evaluate`] classifies the request's collection into a [`Route`] and
//! delegates to that collection's policy. Unrouted collections are denied.

use tracing::{debug, instrument};

use crate::path::Route;
use crate::policies::{documents, inspectors, properties, users};
use crate::types::{Decision, Request};

/// Evaluates a document or collection request.
///
/// # Tracing
///
/// Instrumented at debug level with the caller, operation and target. The
/// decision itself is logged at debug level; denials carry no reason.
#[instrument(
    level = "debug",
    skip(request),
    fields(
        uid = request.uid().map(|u| u.as_str()).unwrap_or("<anonymous>"),
        operation = %request.operation,
        collection = %request.collection,
        document_id = request.document_id.unwrap_or(""),
    )
)]
pub fn evaluate(request: &Request<'_>) -> Decision {
	let allowed = match Route::classify(request.collection) {
		Route::Users => users::evaluate(request),
		Route::Inspectors => inspectors::evaluate(request),
		Route::Properties => properties::evaluate(request),
		Route::PropertyDocuments { .. } => documents::evaluate(request),
		Route::Unmatched => false,
	};

	let decision = Decision::from(allowed);
	debug!(?decision, "policy evaluated");
	decision
}
