// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Collection queries.
//!
//! The store executes queries with [`Query::matches`]. Policies never look at
//! the result set; they decide from the filters alone whether every document
//! the query could return is readable (see [`Query::binds_member`]).

use serde::Serialize;

use crate::types::Uid;
use crate::value::{DocumentData, FieldPath, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
	Equal,
	ArrayContains,
	ArrayContainsAny,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
	pub field: FieldPath,
	pub op: FilterOp,
	pub value: Value,
}

impl Filter {
	pub fn matches(&self, document: &DocumentData) -> bool {
		let Some(actual) = document.get(&self.field) else {
			return false;
		};
		match self.op {
			FilterOp::Equal => actual == &self.value,
			FilterOp::ArrayContains => actual
				.as_array()
				.map(|items| items.contains(&self.value))
				.unwrap_or(false),
			FilterOp::ArrayContainsAny => match (actual.as_array(), self.value.as_array()) {
				(Some(items), Some(wanted)) => wanted.iter().any(|w| items.contains(w)),
				_ => false,
			},
		}
	}

	/// True if every document matching this filter has `uid` in the array at
	/// `field`.
	fn binds_member(&self, field: &FieldPath, uid: &Uid) -> bool {
		if &self.field != field {
			return false;
		}
		let uid = Value::from(uid.as_str());
		match self.op {
			FilterOp::ArrayContains => self.value == uid,
			FilterOp::ArrayContainsAny => self
				.value
				.as_array()
				.map(|wanted| !wanted.is_empty() && wanted.iter().all(|w| w == &uid))
				.unwrap_or(false),
			FilterOp::Equal => self
				.value
				.as_array()
				.map(|items| items.contains(&uid))
				.unwrap_or(false),
		}
	}
}

/// A conjunction of filters with an optional result limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
	pub filters: Vec<Filter>,
	pub limit: Option<usize>,
}

impl Query {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder: add a filter.
	pub fn filter(mut self, field: &str, op: FilterOp, value: impl Into<Value>) -> Self {
		self.filters.push(Filter {
			field: FieldPath::from(field),
			op,
			value: value.into(),
		});
		self
	}

	pub fn where_eq(self, field: &str, value: impl Into<Value>) -> Self {
		self.filter(field, FilterOp::Equal, value)
	}

	pub fn where_array_contains(self, field: &str, value: impl Into<Value>) -> Self {
		self.filter(field, FilterOp::ArrayContains, value)
	}

	pub fn where_array_contains_any(self, field: &str, values: Vec<Value>) -> Self {
		self.filter(field, FilterOp::ArrayContainsAny, Value::Array(values))
	}

	/// Builder: cap the number of results.
	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn matches(&self, document: &DocumentData) -> bool {
		self.filters.iter().all(|f| f.matches(document))
	}

	/// True if some filter guarantees every result lists `uid` at `field`.
	pub fn binds_member(&self, field: &FieldPath, uid: &Uid) -> bool {
		self.filters.iter().any(|f| f.binds_member(field, uid))
	}
}
