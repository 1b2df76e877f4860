// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, a TOML file and environment
//! variables.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::EstateConfigLayer;
use crate::sections::{
	CleanupConfigLayer, CleanupMode, FixturesConfigLayer, LoggingConfigLayer, ProjectConfigLayer,
	StorageConfigLayer,
};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "estate.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<EstateConfigLayer, ConfigError>;
}

pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<EstateConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(EstateConfigLayer::default())
	}
}

/// TOML file source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn working_dir() -> Self {
		Self::new(DEFAULT_CONFIG_FILE)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<EstateConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(EstateConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: EstateConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: ESTATE_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<EstateConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_with(|name| std::env::var(name).ok())
	}
}

/// Builds a layer from a variable lookup. Empty values count as unset.
pub(crate) fn load_with<F>(lookup: F) -> Result<EstateConfigLayer, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
	let bool_var = |name: &str| var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1");

	Ok(EstateConfigLayer {
		project: Some(ProjectConfigLayer {
			project_id: var("ESTATE_PROJECT_ID"),
		}),
		storage: Some(StorageConfigLayer {
			bucket: var("ESTATE_STORAGE_BUCKET"),
		}),
		cleanup: Some(CleanupConfigLayer {
			enabled: bool_var("ESTATE_CLEANUP_ENABLED"),
			mode: parsed::<CleanupMode>("ESTATE_CLEANUP_MODE", var("ESTATE_CLEANUP_MODE"))?,
			trigger: var("ESTATE_CLEANUP_TRIGGER"),
			cascade: bool_var("ESTATE_CLEANUP_CASCADE"),
			event_buffer: parsed::<usize>(
				"ESTATE_CLEANUP_EVENT_BUFFER",
				var("ESTATE_CLEANUP_EVENT_BUFFER"),
			)?,
		}),
		fixtures: Some(FixturesConfigLayer {
			path: var("ESTATE_FIXTURES_PATH").map(PathBuf::from),
		}),
		logging: Some(LoggingConfigLayer {
			level: var("ESTATE_LOG_LEVEL"),
		}),
	})
}

fn parsed<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	match value {
		Some(v) => v.parse().map(Some).map_err(|e| ConfigError::InvalidValue {
			key: key.to_string(),
			message: format!("invalid value '{v}': {e}"),
		}),
		None => Ok(None),
	}
}
