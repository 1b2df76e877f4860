// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shape validators for stored documents.
//!
//! A [`Shape`] declares the exact set of fields a document (or nested map)
//! may hold. Every declared field is required, undeclared fields are rejected
//! at every nesting level, and each value must match its declared type.

use std::fmt;

use crate::value::{Fields, Value, ValueType};

/// The declared type of a single field.
#[derive(Debug, Clone, Copy)]
pub enum FieldShape {
	/// A string. `non_empty` forbids `""`.
	String { non_empty: bool },
	/// An array whose elements are all strings (possibly empty).
	StringArray,
	/// A nested map with its own shape.
	Map(&'static Shape),
}

impl FieldShape {
	fn value_type(&self) -> ValueType {
		match self {
			FieldShape::String { .. } => ValueType::String,
			FieldShape::StringArray => ValueType::Array,
			FieldShape::Map(_) => ValueType::Map,
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
	pub name: &'static str,
	pub shape: FieldShape,
}

/// A closed set of required fields.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
	pub fields: &'static [FieldSpec],
}

/// `permissions.{read,update}`: lists of uids.
pub const PERMISSIONS_SHAPE: Shape = Shape {
	fields: &[
		FieldSpec {
			name: "read",
			shape: FieldShape::StringArray,
		},
		FieldSpec {
			name: "update",
			shape: FieldShape::StringArray,
		},
	],
};

/// `properties/{id}`.
pub const PROPERTY_SHAPE: Shape = Shape {
	fields: &[
		FieldSpec {
			name: "name",
			shape: FieldShape::String { non_empty: true },
		},
		FieldSpec {
			name: "permissions",
			shape: FieldShape::Map(&PERMISSIONS_SHAPE),
		},
	],
};

/// `properties/{id}/documents/{docId}`.
pub const DOCUMENT_SHAPE: Shape = Shape {
	fields: &[
		FieldSpec {
			name: "name",
			shape: FieldShape::String { non_empty: false },
		},
		FieldSpec {
			name: "tags",
			shape: FieldShape::StringArray,
		},
		FieldSpec {
			name: "permissions",
			shape: FieldShape::Map(&PERMISSIONS_SHAPE),
		},
	],
};

/// Why a document failed validation. Only used for diagnostics; callers see
/// a plain denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeViolation {
	Missing(String),
	Unexpected(String),
	WrongType {
		field: String,
		expected: ValueType,
		found: ValueType,
	},
	Empty(String),
	NonStringElement(String),
}

impl fmt::Display for ShapeViolation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ShapeViolation::Missing(field) => write!(f, "missing field '{field}'"),
			ShapeViolation::Unexpected(field) => write!(f, "undeclared field '{field}'"),
			ShapeViolation::WrongType {
				field,
				expected,
				found,
			} => write!(f, "field '{field}' must be {expected}, found {found}"),
			ShapeViolation::Empty(field) => write!(f, "field '{field}' must not be empty"),
			ShapeViolation::NonStringElement(field) => {
				write!(f, "field '{field}' must only contain strings")
			}
		}
	}
}

fn qualified(prefix: &str, name: &str) -> String {
	if prefix.is_empty() {
		name.to_string()
	} else {
		format!("{prefix}.{name}")
	}
}

impl Shape {
	/// Validates `fields` against this shape, reporting the first violation.
	pub fn validate(&self, fields: &Fields) -> Result<(), ShapeViolation> {
		self.validate_at("", fields)
	}

	pub fn is_valid(&self, fields: &Fields) -> bool {
		self.validate(fields).is_ok()
	}

	fn validate_at(&self, prefix: &str, fields: &Fields) -> Result<(), ShapeViolation> {
		if let Some(extra) = fields
			.keys()
			.find(|k| !self.fields.iter().any(|spec| spec.name == k.as_str()))
		{
			return Err(ShapeViolation::Unexpected(qualified(prefix, extra)));
		}

		for spec in self.fields {
			let name = qualified(prefix, spec.name);
			let value = fields
				.get(spec.name)
				.ok_or_else(|| ShapeViolation::Missing(name.clone()))?;
			check_field(&name, &spec.shape, value)?;
		}
		Ok(())
	}
}

fn check_field(name: &str, shape: &FieldShape, value: &Value) -> Result<(), ShapeViolation> {
	match (shape, value) {
		(FieldShape::String { non_empty }, Value::String(s)) => {
			if *non_empty && s.is_empty() {
				return Err(ShapeViolation::Empty(name.to_string()));
			}
			Ok(())
		}
		(FieldShape::StringArray, Value::Array(items)) => {
			if items.iter().any(|item| !matches!(item, Value::String(_))) {
				return Err(ShapeViolation::NonStringElement(name.to_string()));
			}
			Ok(())
		}
		(FieldShape::Map(nested), Value::Map(fields)) => nested.validate_at(name, fields),
		_ => Err(ShapeViolation::WrongType {
			field: name.to_string(),
			expected: shape.value_type(),
			found: value.value_type(),
		}),
	}
}
