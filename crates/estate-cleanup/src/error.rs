// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum CleanupError {
	#[error("Invalid trigger pattern {pattern:?}: {reason}")]
	InvalidTrigger {
		pattern: String,
		reason: &'static str,
	},

	#[error("Invalid cleanup prefix {prefix:?}: {reason}")]
	InvalidPrefix {
		prefix: String,
		reason: &'static str,
	},
}

pub type Result<T> = std::result::Result<T, CleanupError>;
