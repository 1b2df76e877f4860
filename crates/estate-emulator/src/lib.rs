// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wires a configured [`Platform`] together with its cleanup workers.

use std::sync::Arc;

use anyhow::Context;
use estate_cleanup::{CleanupHandler, TriggerRegistry, WorkerHandle};
use estate_config::EstateConfig;
use estate_store::{Fixtures, Platform};
use tracing::{info, instrument};

/// A running emulator: the in-memory platform plus whichever cleanup
/// workers the configuration enables.
pub struct Emulator {
	platform: Platform,
	workers: Vec<WorkerHandle>,
}

impl Emulator {
	/// Builds the platform, seeds fixtures and starts cleanup workers.
	///
	/// Workers subscribe before fixtures are written, so a fixture load never
	/// races the first delete.
	#[instrument(level = "debug", skip_all, fields(project_id = %config.project.project_id))]
	pub async fn start(config: &EstateConfig) -> anyhow::Result<Self> {
		let platform = Platform::in_memory_for(
			&config.project.project_id,
			&config.storage.bucket,
			config.cleanup.event_buffer,
		);
		let workers = start_cleanup(config, &platform)?;

		if let Some(path) = &config.fixtures.path {
			let fixtures = Fixtures::load(path)
				.await
				.with_context(|| format!("loading fixtures from {}", path.display()))?;
			fixtures
				.apply(&platform.admin())
				.await
				.context("applying fixtures")?;
		}

		info!(
			project_id = %platform.project_id(),
			bucket = %platform.bucket(),
			workers = workers.len(),
			"emulator started"
		);
		Ok(Self { platform, workers })
	}

	pub fn platform(&self) -> &Platform {
		&self.platform
	}

	/// Names of the running cleanup workers.
	pub fn workers(&self) -> Vec<&'static str> {
		self.workers.iter().map(WorkerHandle::name).collect()
	}

	pub async fn shutdown(self) {
		for worker in self.workers {
			info!(worker = worker.name(), "stopping cleanup worker");
			worker.shutdown().await;
		}
	}
}

fn start_cleanup(config: &EstateConfig, platform: &Platform) -> anyhow::Result<Vec<WorkerHandle>> {
	let cleanup = &config.cleanup;
	if !cleanup.enabled {
		info!("cleanup disabled");
		return Ok(Vec::new());
	}

	let rules = cleanup.rules()?;
	let mut workers = Vec::new();
	if cleanup.mode.runs_event() {
		let handler = CleanupHandler::new(rules.clone(), Arc::clone(platform.objects()));
		workers.push(handler.spawn(platform.subscribe()));
	}
	if cleanup.mode.runs_legacy() {
		let mut registry = TriggerRegistry::new();
		for rule in rules.iter().cloned() {
			registry.on_delete_purge(rule, Arc::clone(platform.objects()))?;
		}
		workers.push(registry.listen(platform.subscribe()));
	}

	info!(
		mode = %cleanup.mode,
		trigger = %cleanup.trigger,
		cascade = cleanup.cascade,
		rules = rules.len(),
		"cleanup workers started"
	);
	Ok(workers)
}
