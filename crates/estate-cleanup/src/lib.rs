// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object cleanup on document deletion.
//!
//! Each [`CleanupRule`] pairs a trigger with an object prefix. Deleting
//! `inspectionApplications/{applicationId}` removes every object under
//! `inspectionApplications/{applicationId}/`; deleting `properties/{propertyId}`
//! removes everything under `property_documents/{propertyId}/`, and a nested
//! document its own `property_documents/{propertyId}/{documentId}/`.
//!
//! Two front-ends drive the same purge: [`TriggerRegistry`] with
//! per-pattern callbacks, and [`CleanupHandler`] consuming the change feed
//! directly. Both are fire-and-forget; failures are logged and dropped.

pub mod error;
pub mod handler;
pub mod legacy;
pub mod purge;
pub mod rule;
pub mod trigger;
pub mod worker;

pub use error::{CleanupError, Result};
pub use handler::CleanupHandler;
pub use legacy::{delete_rule_objects, CallbackFuture, DeleteContext, TriggerRegistry};
pub use purge::purge_prefix;
pub use rule::{
	property_rules, rules_for, CleanupRule, DEFAULT_TRIGGER, DOCUMENT_PREFIX, DOCUMENT_TRIGGER,
	PROPERTY_PREFIX, PROPERTY_TRIGGER,
};
pub use trigger::{TriggerMatch, TriggerPattern};
pub use worker::WorkerHandle;
