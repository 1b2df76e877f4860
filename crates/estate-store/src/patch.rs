// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial document updates.
//!
//! A [`Patch`] is an ordered list of field transforms applied to the stored
//! document. The merged result is what the policy engine validates, so a
//! deleted field is simply absent from it.

use estate_rules::{DocumentData, FieldPath, Value};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldTransform {
	Set(Value),
	Delete,
	/// Appends values not already present. A missing or non-array field
	/// becomes an array of the given values.
	ArrayUnion(Vec<Value>),
	/// Removes every occurrence of the values. A missing or non-array field
	/// becomes an empty array.
	ArrayRemove(Vec<Value>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
	transforms: Vec<(String, FieldTransform)>,
}

impl Patch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
		self.transforms
			.push((field.to_string(), FieldTransform::Set(value.into())));
		self
	}

	pub fn delete(mut self, field: &str) -> Self {
		self.transforms.push((field.to_string(), FieldTransform::Delete));
		self
	}

	pub fn array_union(mut self, field: &str, values: Vec<Value>) -> Self {
		self.transforms
			.push((field.to_string(), FieldTransform::ArrayUnion(values)));
		self
	}

	pub fn array_remove(mut self, field: &str, values: Vec<Value>) -> Self {
		self.transforms
			.push((field.to_string(), FieldTransform::ArrayRemove(values)));
		self
	}

	pub fn is_empty(&self) -> bool {
		self.transforms.is_empty()
	}

	/// Applies the patch to `base`, returning the merged document.
	///
	/// Fails if any field path is malformed.
	pub fn apply(&self, base: &DocumentData) -> Result<DocumentData> {
		let mut merged = base.clone();
		for (raw, transform) in &self.transforms {
			let field = FieldPath::parse(raw)?;
			match transform {
				FieldTransform::Set(value) => merged.set(&field, value.clone()),
				FieldTransform::Delete => {
					merged.remove(&field);
				}
				FieldTransform::ArrayUnion(values) => {
					let mut items = current_array(&merged, &field);
					for value in values {
						if !items.contains(value) {
							items.push(value.clone());
						}
					}
					merged.set(&field, Value::Array(items));
				}
				FieldTransform::ArrayRemove(values) => {
					let mut items = current_array(&merged, &field);
					items.retain(|item| !values.contains(item));
					merged.set(&field, Value::Array(items));
				}
			}
		}
		Ok(merged)
	}
}

fn current_array(document: &DocumentData, field: &FieldPath) -> Vec<Value> {
	document
		.get(field)
		.and_then(Value::as_array)
		.map(<[Value]>::to_vec)
		.unwrap_or_default()
}
