// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event-style cleanup: one task consuming the document change feed.

use std::sync::Arc;

use estate_store::{DocumentEvent, ObjectStore};
use tokio::sync::broadcast;
use tracing::debug;

use crate::purge::purge_prefix;
use crate::rule::CleanupRule;
use crate::worker::{self, WorkerHandle};

#[derive(Clone)]
pub struct CleanupHandler {
	rules: Vec<CleanupRule>,
	objects: Arc<dyn ObjectStore>,
}

impl CleanupHandler {
	pub fn new(rules: Vec<CleanupRule>, objects: Arc<dyn ObjectStore>) -> Self {
		Self { rules, objects }
	}

	pub fn rules(&self) -> &[CleanupRule] {
		&self.rules
	}

	/// Handles one event. Returns the number of objects removed, or `None`
	/// if the event is not a deletion matching any rule.
	pub async fn handle(&self, event: &DocumentEvent) -> Option<usize> {
		if !event.is_delete() {
			return None;
		}
		let mut removed = None;
		for rule in &self.rules {
			let Some(prefix) = rule.prefix_for(&event.path) else {
				continue;
			};
			debug!(path = %event.path, trigger = %rule.trigger(), %prefix, "deletion matched cleanup rule");
			let purged = purge_prefix(self.objects.as_ref(), &prefix).await;
			removed = Some(removed.unwrap_or(0) + purged);
		}
		removed
	}

	/// Runs the handler on a spawned loop. Each matching event is handled on
	/// its own task, unordered with respect to other events.
	pub fn spawn(self, events: broadcast::Receiver<DocumentEvent>) -> WorkerHandle {
		let handler = Arc::new(self);
		worker::spawn("event", events, move |event| {
			let handler = Arc::clone(&handler);
			tokio::spawn(async move {
				handler.handle(&event).await;
			});
		})
	}
}
