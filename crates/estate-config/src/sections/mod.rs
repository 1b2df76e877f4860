// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod cleanup;
mod fixtures;
mod logging;
mod project;
mod storage;

pub use cleanup::{CleanupConfig, CleanupConfigLayer, CleanupMode};
pub use fixtures::{FixturesConfig, FixturesConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use project::{ProjectConfig, ProjectConfigLayer, DEFAULT_PROJECT_ID};
pub use storage::{StorageConfig, StorageConfigLayer};
