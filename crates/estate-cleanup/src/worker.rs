// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use estate_store::DocumentEvent;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A running event loop. The loop ends on [`WorkerHandle::shutdown`], when
/// the handle is dropped, or when the event feed closes.
pub struct WorkerHandle {
	name: &'static str,
	shutdown_tx: broadcast::Sender<()>,
	handle: JoinHandle<()>,
}

impl WorkerHandle {
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn is_finished(&self) -> bool {
		self.handle.is_finished()
	}

	/// Stops taking new events and waits for the loop to exit. Work already
	/// spawned for earlier events is not cancelled.
	pub async fn shutdown(self) {
		let _ = self.shutdown_tx.send(());
		let _ = self.handle.await;
		info!(worker = self.name, "cleanup worker shut down");
	}
}

/// Spawns a loop feeding each event to `on_event` until shutdown or until
/// the feed closes.
pub(crate) fn spawn<F>(
	name: &'static str,
	mut events: broadcast::Receiver<DocumentEvent>,
	on_event: F,
) -> WorkerHandle
where
	F: Fn(DocumentEvent) + Send + 'static,
{
	let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

	let handle = tokio::spawn(async move {
		loop {
			tokio::select! {
				_ = shutdown_rx.recv() => break,
				received = events.recv() => match received {
					Ok(event) => on_event(event),
					Err(broadcast::error::RecvError::Lagged(skipped)) => {
						warn!(worker = name, skipped, "cleanup worker fell behind; events dropped");
					}
					Err(broadcast::error::RecvError::Closed) => {
						info!(worker = name, "event feed closed");
						break;
					}
				},
			}
		}
	});

	info!(worker = name, "cleanup worker started");
	WorkerHandle {
		name,
		shutdown_tx,
		handle,
	}
}
