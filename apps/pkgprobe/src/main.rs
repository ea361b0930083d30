//! pkgprobe - package existence verification for the application catalog
//!
//! The CLI wires configuration, the result store, and the verifier
//! registry into an operations context, then dispatches one command
//! through the ops crate.

mod cli;
mod display;
mod error;
mod events;
mod setup;

use crate::cli::{CatalogCommands, Cli, Commands, FlaggedCommands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::setup::SystemSetup;
use clap::Parser;
use pkgprobe_catalog::Catalog;
use pkgprobe_config::Config;
use pkgprobe_ops::{OperationResult, SweepOptions, VerifyOptions};
use std::process;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

fn init_tracing(json_mode: bool, debug: bool) {
    let default_directive = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    if json_mode {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = Config::load_or_default(&cli.global.config).await?;
    config.merge_env()?;

    let setup = SystemSetup::new(config, cli.global.catalog.clone());
    let renderer = OutputRenderer::new(cli.global.json);

    // Catalog-only commands never touch the store or the network
    if let Commands::Catalog {
        command: CatalogCommands::Check,
    } = &cli.command
    {
        let catalog = Catalog::load(&setup.catalog_path()).await?;
        let result = OperationResult::CatalogReport {
            applications: catalog.applications.len() as u64,
            targets: catalog.target_count(),
        };
        return renderer.render(&result);
    }

    let needs_catalog = matches!(
        &cli.command,
        Commands::Sweep { .. }
            | Commands::Verify {
                package: None,
                ..
            }
    );

    let (tx, rx) = pkgprobe_events::channel();
    let drain = tokio::spawn(events::drain_events(rx));

    let ctx = setup.build_context(tx, needs_catalog).await?;

    let outcome = dispatch(&ctx, &cli.command).await;

    // Close the channel so the drain task can finish logging
    drop(ctx);
    let _ = drain.await;

    renderer.render(&outcome?)
}

async fn dispatch(
    ctx: &pkgprobe_ops::OpsCtx,
    command: &Commands,
) -> Result<OperationResult, CliError> {
    match command {
        Commands::Verify {
            app_id,
            manager,
            package,
            no_store,
        } => {
            let options = VerifyOptions {
                persist: !no_store,
            };
            let result = match package {
                Some(package_name) => {
                    pkgprobe_ops::verify_package(ctx, app_id, *manager, package_name, &options)
                        .await?
                }
                None => {
                    pkgprobe_ops::verify_app_target(ctx, app_id, *manager, &options).await?
                }
            };
            Ok(OperationResult::Verification(result))
        }

        Commands::Sweep {
            pacing_ms,
            no_store,
        } => {
            let options = SweepOptions {
                pacing_delay: pacing_ms.map(Duration::from_millis),
                verify: VerifyOptions {
                    persist: !no_store,
                },
            };
            let summary = pkgprobe_ops::verify_all(ctx, &options).await?;
            Ok(OperationResult::Sweep(summary))
        }

        Commands::Flagged { command } => match command {
            FlaggedCommands::List { manager, sort_by } => {
                let results =
                    pkgprobe_ops::list_flagged(ctx, *manager, (*sort_by).into()).await?;
                Ok(OperationResult::FlaggedList(results))
            }
            FlaggedCommands::Clear { app_id, manager } => {
                let cleared = pkgprobe_ops::clear_review_flag(ctx, app_id, *manager).await?;
                Ok(OperationResult::FlagCleared {
                    app_id: app_id.clone(),
                    manager: *manager,
                    cleared,
                })
            }
        },

        Commands::Catalog { .. } => unreachable!("handled before context construction"),
    }
}
