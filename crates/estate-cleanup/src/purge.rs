// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use estate_store::ObjectStore;
use tracing::{info, instrument, warn};

/// Deletes every object under `prefix`.
///
/// Failures are logged and swallowed; there is no retry. Running it again
/// for the same prefix is harmless.
#[instrument(level = "debug", skip(objects), fields(bucket = %objects.bucket()))]
pub async fn purge_prefix(objects: &dyn ObjectStore, prefix: &str) -> usize {
	match objects.delete_prefix(prefix).await {
		Ok(removed) => {
			info!(%prefix, removed, "deleted objects of removed document");
			removed
		}
		Err(err) => {
			warn!(%prefix, error = %err, "object cleanup failed");
			0
		}
	}
}
