#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level verification operations for pkgprobe
//!
//! This crate is the orchestration layer between the CLI (or any other
//! caller) and the leaf crates: it routes single verifications through
//! the registry and retry executor, runs full catalog sweeps, and exposes
//! the administrative operations on flagged results.

mod context;
mod flagged;
mod sweep;
mod types;
mod verify;

pub use context::{OpsContextBuilder, OpsCtx};
pub use flagged::{clear_review_flag, list_flagged};
pub use sweep::{verify_all, SweepOptions};
pub use types::OperationResult;
pub use verify::{verify_app_target, verify_package, VerifyOptions};
