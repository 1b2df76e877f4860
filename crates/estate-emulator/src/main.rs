// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Estate emulator binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use estate_emulator::Emulator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Estate emulator - in-memory documents, objects and cleanup handlers.
#[derive(Parser, Debug)]
#[command(name = "estate-emulator", about = "Estate record emulator", version)]
struct Args {
	/// Path to the TOML config file
	#[arg(long, env = "ESTATE_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

fn format_version_info() -> String {
	format!(
		"estate-emulator version: {}\n\
         Platform:                {}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH,
	)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", format_version_info());
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => estate_config::load_config_with_file(path)?,
		None => estate_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		project_id = %config.project.project_id,
		bucket = %config.storage.bucket,
		"starting estate-emulator"
	);

	let emulator = Emulator::start(&config).await?;

	tokio::signal::ctrl_c().await?;
	tracing::info!("Received shutdown signal");
	emulator.shutdown().await;

	tracing::info!("Emulator shutdown complete");
	Ok(())
}
