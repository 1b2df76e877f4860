// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document and object storage with access control.
//!
//! [`Platform`] bundles an in-memory [`DocumentStore`] and an [`ObjectStore`].
//! Clients obtained from it enforce the `estate-rules` policies; the
//! [`AdminClient`] bypasses them and is used for seeding and cleanup.
//! Committed document changes are broadcast as [`DocumentEvent`]s.

pub mod admin;
pub mod client;
pub mod documents;
pub mod error;
pub mod events;
pub mod objects;
pub mod patch;
pub mod platform;
pub mod records;

pub use admin::AdminClient;
pub use client::Client;
pub use documents::{Access, DocumentStore, Snapshot};
pub use error::{Result, StoreError};
pub use events::{ChangeKind, DocumentEvent};
pub use objects::{MemoryObjectStore, ObjectStore, DEFAULT_BUCKET};
pub use patch::{FieldTransform, Patch};
pub use platform::{Platform, DEFAULT_PROJECT_ID};
pub use records::{
	Acceptable, DocumentRecord, Fixtures, InspectorRecord, Permissions, PropertyRecord, Record,
	UserRecord,
};
