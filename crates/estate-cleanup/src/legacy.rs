// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Callback-style triggers.
//!
//! Callbacks are registered against a [`TriggerPattern`] and invoked once per
//! matching deletion, each on its own spawned task. Nothing observes their
//! completion.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use estate_rules::{DocumentData, DocumentPath};
use estate_store::{DocumentEvent, ObjectStore};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::Result;
use crate::purge::purge_prefix;
use crate::rule::CleanupRule;
use crate::trigger::{TriggerMatch, TriggerPattern};
use crate::worker::{self, WorkerHandle};

pub type CallbackFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

type Callback = Arc<dyn Fn(DeleteContext) -> CallbackFuture + Send + Sync>;

/// What a delete callback receives.
#[derive(Debug, Clone)]
pub struct DeleteContext {
	pub path: DocumentPath,
	pub params: TriggerMatch,
	/// The document as it was before deletion.
	pub snapshot: DocumentData,
}

#[derive(Default, Clone)]
pub struct TriggerRegistry {
	callbacks: Vec<(TriggerPattern, Callback)>,
}

impl TriggerRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `callback` for deletions of documents matching `pattern`.
	pub fn on_delete<F, Fut>(&mut self, pattern: &str, callback: F) -> Result<()>
	where
		F: Fn(DeleteContext) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		let trigger = TriggerPattern::parse(pattern)?;
		let callback: Callback =
			Arc::new(move |ctx| -> CallbackFuture { Box::pin(callback(ctx)) });
		self.callbacks.push((trigger, callback));
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.callbacks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty()
	}

	/// Spawns every callback whose pattern matches a deletion event and
	/// returns how many were started.
	pub fn dispatch(&self, event: &DocumentEvent) -> usize {
		if !event.is_delete() {
			return 0;
		}
		let mut started = 0;
		for (trigger, callback) in &self.callbacks {
			let Some(params) = trigger.matches(&event.path) else {
				continue;
			};
			debug!(trigger = %trigger, path = %event.path, "invoking delete callback");
			let ctx = DeleteContext {
				path: event.path.clone(),
				params,
				snapshot: event.data.clone(),
			};
			tokio::spawn(callback(ctx));
			started += 1;
		}
		started
	}

	/// Dispatches the change feed to the registered callbacks until shutdown.
	pub fn listen(self, events: broadcast::Receiver<DocumentEvent>) -> WorkerHandle {
		worker::spawn("legacy", events, move |event| {
			self.dispatch(&event);
		})
	}

	/// Registers a callback purging `rule`'s prefix on each matching
	/// deletion.
	pub fn on_delete_purge(
		&mut self,
		rule: CleanupRule,
		objects: Arc<dyn ObjectStore>,
	) -> Result<()> {
		let pattern = rule.trigger().as_str().to_string();
		self.on_delete(&pattern, delete_rule_objects(rule, objects))
	}
}

/// A delete callback removing every object under the rule's prefix, filled
/// from the callback's captured wildcards.
pub fn delete_rule_objects(
	rule: CleanupRule,
	objects: Arc<dyn ObjectStore>,
) -> impl Fn(DeleteContext) -> CallbackFuture + Send + Sync + 'static {
	move |ctx: DeleteContext| -> CallbackFuture {
		let objects = Arc::clone(&objects);
		let prefix = rule.render(&ctx.params);
		Box::pin(async move {
			purge_prefix(objects.as_ref(), &prefix).await;
		})
	}
}
