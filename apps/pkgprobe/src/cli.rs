//! Command line interface definition

use clap::{Parser, Subcommand, ValueEnum};
use pkgprobe_state::FlaggedSort;
use pkgprobe_types::PackageManager;
use std::path::PathBuf;

/// pkgprobe - package existence verification for the application catalog
#[derive(Parser)]
#[command(name = "pkgprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify catalog packages against their remote registries")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use alternate catalog file
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Verify one application's package target against its registry
    #[command(alias = "v")]
    Verify {
        /// Catalog application id
        app_id: String,

        /// Package manager to check
        manager: PackageManager,

        /// Override the catalog package name
        #[arg(long, value_name = "NAME")]
        package: Option<String>,

        /// Do not persist the result
        #[arg(long)]
        no_store: bool,
    },

    /// Verify every declared package target in the catalog
    Sweep {
        /// Pacing delay between outbound requests, in milliseconds
        #[arg(long, value_name = "MS")]
        pacing_ms: Option<u64>,

        /// Do not persist results
        #[arg(long)]
        no_store: bool,
    },

    /// Inspect and acknowledge flagged regressions
    Flagged {
        #[command(subcommand)]
        command: FlaggedCommands,
    },

    /// Catalog inspection
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

/// Review-queue subcommands
#[derive(Subcommand)]
pub enum FlaggedCommands {
    /// List results flagged for manual review
    List {
        /// Restrict to one package manager
        #[arg(long)]
        manager: Option<PackageManager>,

        /// Sort order
        #[arg(long, value_enum, default_value = "timestamp")]
        sort_by: SortBy,
    },

    /// Clear the review flag for an (application, manager) pairing
    Clear {
        /// Catalog application id
        app_id: String,

        /// Package manager
        manager: PackageManager,
    },
}

/// Catalog subcommands
#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Load and validate the catalog, reporting its size
    Check,
}

/// Review queue sort order
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortBy {
    /// Newest first
    Timestamp,
    /// By application id
    App,
}

impl From<SortBy> for FlaggedSort {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Timestamp => Self::Timestamp,
            SortBy::App => Self::App,
        }
    }
}
