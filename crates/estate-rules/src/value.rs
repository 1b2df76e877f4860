// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed document values.
//!
//! Shape validation depends on telling apart every value type the store can
//! hold, so [`Value`] keeps integers, doubles, timestamps and null distinct
//! instead of collapsing them into JSON.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::error::PathError;

/// Field name to value mapping used for documents and nested maps.
pub type Fields = BTreeMap<String, Value>;

/// A single document field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Boolean(bool),
	Integer(i64),
	Double(f64),
	Timestamp(DateTime<Utc>),
	String(String),
	Array(Vec<Value>),
	Map(Fields),
}

/// Type tags compared by the shape validators.
///
/// Integers and doubles are both [`ValueType::Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	Null,
	Boolean,
	Number,
	Timestamp,
	String,
	Array,
	Map,
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ValueType::Null => "null",
			ValueType::Boolean => "boolean",
			ValueType::Number => "number",
			ValueType::Timestamp => "timestamp",
			ValueType::String => "string",
			ValueType::Array => "array",
			ValueType::Map => "map",
		};
		f.write_str(name)
	}
}

impl Value {
	pub fn value_type(&self) -> ValueType {
		match self {
			Value::Null => ValueType::Null,
			Value::Boolean(_) => ValueType::Boolean,
			Value::Integer(_) | Value::Double(_) => ValueType::Number,
			Value::Timestamp(_) => ValueType::Timestamp,
			Value::String(_) => ValueType::String,
			Value::Array(_) => ValueType::Array,
			Value::Map(_) => ValueType::Map,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Value::Array(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&Fields> {
		match self {
			Value::Map(fields) => Some(fields),
			_ => None,
		}
	}

	/// Builds an array of strings.
	pub fn strings<I, S>(items: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Value::Array(items.into_iter().map(|s| Value::String(s.into())).collect())
	}

	/// Converts to plain JSON. Timestamps become RFC 3339 strings.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Null => serde_json::Value::Null,
			Value::Boolean(b) => serde_json::Value::Bool(*b),
			Value::Integer(i) => serde_json::Value::from(*i),
			Value::Double(d) => serde_json::Number::from_f64(*d)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Value::Timestamp(ts) => {
				serde_json::Value::String(ts.to_rfc3339_opts(SecondsFormat::Micros, true))
			}
			Value::String(s) => serde_json::Value::String(s.clone()),
			Value::Array(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
			Value::Map(fields) => serde_json::Value::Object(
				fields
					.iter()
					.map(|(k, v)| (k.clone(), v.to_json()))
					.collect(),
			),
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_json().serialize(serializer)
	}
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Boolean(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => Value::Integer(i),
				None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
			},
			serde_json::Value::String(s) => Value::String(s),
			serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
			serde_json::Value::Object(map) => {
				Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
			}
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Boolean(b)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Value::Integer(i)
	}
}

impl From<f64> for Value {
	fn from(d: f64) -> Self {
		Value::Double(d)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(ts: DateTime<Utc>) -> Self {
		Value::Timestamp(ts)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Value::Array(items)
	}
}

impl From<Fields> for Value {
	fn from(fields: Fields) -> Self {
		Value::Map(fields)
	}
}

/// Dotted path to a (possibly nested) field, e.g. `permissions.read`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
	/// Parses a dotted field path, rejecting empty segments.
	pub fn parse(path: &str) -> Result<Self, PathError> {
		if path.is_empty() {
			return Err(PathError::Empty);
		}
		let segments: Vec<String> = path.split('.').map(str::to_string).collect();
		if segments.iter().any(String::is_empty) {
			return Err(PathError::EmptySegment(path.to_string()));
		}
		Ok(Self(segments))
	}

	pub fn segments(&self) -> &[String] {
		&self.0
	}

	/// The top-level field this path starts at.
	pub fn root(&self) -> &str {
		&self.0[0]
	}
}

impl From<&str> for FieldPath {
	/// Splits on `.` without validation; use [`FieldPath::parse`] for
	/// untrusted input.
	fn from(path: &str) -> Self {
		Self(path.split('.').map(str::to_string).collect())
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join("."))
	}
}

/// The data stored in a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DocumentData(Fields);

impl DocumentData {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fields(&self) -> &Fields {
		&self.0
	}

	pub fn into_fields(self) -> Fields {
		self.0
	}

	/// Builder: set a top-level field.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(name.into(), value.into());
		self
	}

	/// Converts a JSON object into document data. Non-objects yield `None`.
	pub fn from_json(json: serde_json::Value) -> Option<Self> {
		match Value::from(json) {
			Value::Map(fields) => Some(Self(fields)),
			_ => None,
		}
	}

	pub fn to_json(&self) -> serde_json::Value {
		Value::Map(self.0.clone()).to_json()
	}

	/// Looks up a nested field.
	pub fn get(&self, path: &FieldPath) -> Option<&Value> {
		let (first, rest) = path.segments().split_first()?;
		let mut current = self.0.get(first)?;
		for segment in rest {
			current = current.as_map()?.get(segment)?;
		}
		Some(current)
	}

	/// Sets a nested field, creating (or replacing non-map values with)
	/// intermediate maps.
	pub fn set(&mut self, path: &FieldPath, value: Value) {
		let Some((last, parents)) = path.segments().split_last() else {
			return;
		};
		let mut current = &mut self.0;
		for segment in parents {
			let entry = current
				.entry(segment.clone())
				.or_insert_with(|| Value::Map(Fields::new()));
			if !matches!(entry, Value::Map(_)) {
				*entry = Value::Map(Fields::new());
			}
			current = match entry {
				Value::Map(next) => next,
				_ => return,
			};
		}
		current.insert(last.clone(), value);
	}

	/// Removes a nested field, returning its previous value.
	pub fn remove(&mut self, path: &FieldPath) -> Option<Value> {
		let (last, parents) = path.segments().split_last()?;
		let mut current = &mut self.0;
		for segment in parents {
			match current.get_mut(segment)? {
				Value::Map(next) => current = next,
				_ => return None,
			}
		}
		current.remove(last)
	}

	/// Top-level keys whose value was added, removed or changed between
	/// `self` and `other`.
	pub fn diff_keys(&self, other: &DocumentData) -> BTreeSet<String> {
		let keys: BTreeSet<&String> = self.0.keys().chain(other.0.keys()).collect();
		keys
			.into_iter()
			.filter(|k| self.0.get(*k) != other.0.get(*k))
			.cloned()
			.collect()
	}
}

impl From<Fields> for DocumentData {
	fn from(fields: Fields) -> Self {
		Self(fields)
	}
}
