// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access-control policy engine for the estate document and object stores.
//!
//! Every client read or write is turned into a [`Request`] and handed to
//! [`evaluate`], which returns a binary [`Decision`]. Evaluation is pure: the
//! caller preloads the existing document, the incoming (merged) document and,
//! for nested documents, the parent property. Object-store requests go through
//! [`storage::ObjectAuthorizer`], which resolves the sibling document before
//! deciding.
//!
//! # Collections
//!
//! | Path                                 | Policy                                  |
//! |--------------------------------------|-----------------------------------------|
//! | `users/{uid}`                        | [`policies::users`]                     |
//! | `inspectors/{uid}`                   | [`policies::inspectors`]                |
//! | `properties/{id}`                    | [`policies::properties`]                |
//! | `properties/{id}/documents/{docId}`  | [`policies::documents`]                 |
//!
//! Anything else is denied.

pub mod engine;
pub mod error;
pub mod path;
pub mod permissions;
pub mod policies;
pub mod query;
pub mod shape;
pub mod storage;
pub mod types;
pub mod value;

pub use engine::evaluate;
pub use error::{PathError, Result};
pub use path::{CollectionPath, DocumentPath, Route};
pub use permissions::Capability;
pub use query::{Filter, FilterOp, Query};
pub use shape::{Shape, ShapeViolation, DOCUMENT_SHAPE, PERMISSIONS_SHAPE, PROPERTY_SHAPE};
pub use storage::{
	evaluate_object, DocumentLookup, ObjectAuthorizer, ObjectOperation, ObjectPath,
	OBJECT_NAMESPACE,
};
pub use types::{Decision, Operation, Request, Requester, Uid};
pub use value::{DocumentData, FieldPath, Fields, Value, ValueType};
