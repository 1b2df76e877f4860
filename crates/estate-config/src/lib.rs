// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the estate emulator.
//!
//! Layered from built-in defaults, a TOML file and `ESTATE_*` environment
//! variables, in increasing precedence.
//!
//! ```toml
//! [project]
//! project_id = "min-nano-test"
//!
//! [cleanup]
//! mode = "both"
//! trigger = "inspectionApplications/{applicationId}"
//! cascade = true
//!
//! [fixtures]
//! path = "fixtures/seed.json"
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::EstateConfigLayer;
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource, DEFAULT_CONFIG_FILE,
};

use estate_cleanup::TriggerPattern;
use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EstateConfig {
	pub project: ProjectConfig,
	pub storage: StorageConfig,
	pub cleanup: CleanupConfig,
	pub fixtures: FixturesConfig,
	pub logging: LoggingConfig,
}

/// Loads configuration with `estate.toml` from the working directory.
pub fn load_config() -> Result<EstateConfig, ConfigError> {
	load_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::working_dir()),
		Box::new(EnvSource),
	])
}

/// Loads configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<EstateConfig, ConfigError> {
	load_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<EstateConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = EstateConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Resolves a merged layer, applying defaults and validating the result.
pub fn finalize(layer: EstateConfigLayer) -> Result<EstateConfig, ConfigError> {
	let project = layer.project.unwrap_or_default().finalize();
	let storage = layer
		.storage
		.unwrap_or_default()
		.finalize(&project.project_id);
	let cleanup = layer.cleanup.unwrap_or_default().finalize();
	let fixtures = layer.fixtures.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_cleanup(&cleanup)?;

	info!(
		project_id = %project.project_id,
		bucket = %storage.bucket,
		cleanup_enabled = cleanup.enabled,
		cleanup_mode = %cleanup.mode,
		cleanup_cascade = cleanup.cascade,
		fixtures_configured = fixtures.path.is_some(),
		"Configuration loaded"
	);

	Ok(EstateConfig {
		project,
		storage,
		cleanup,
		fixtures,
		logging,
	})
}

fn validate_cleanup(cleanup: &CleanupConfig) -> Result<(), ConfigError> {
	if cleanup.event_buffer == 0 {
		return Err(ConfigError::Validation(
			"cleanup.event_buffer must be greater than 0".to_string(),
		));
	}

	let trigger = TriggerPattern::parse(&cleanup.trigger)
		.map_err(|e| ConfigError::Validation(e.to_string()))?;
	if trigger.wildcards().len() != 1 || trigger.document_wildcard().is_none() {
		return Err(ConfigError::Validation(format!(
			"cleanup.trigger {:?} must end in its only {{wildcard}} segment",
			cleanup.trigger
		)));
	}
	cleanup
		.rules()
		.map_err(|e| ConfigError::Validation(e.to_string()))?;

	Ok(())
}
