//! Output rendering for operation results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use console::style;
use pkgprobe_ops::OperationResult;
use pkgprobe_types::{format_timestamp, VerificationResult, VerifyStatus};

use crate::error::CliError;

/// Renders operation results as tables or JSON
pub struct OutputRenderer {
    json: bool,
}

impl OutputRenderer {
    #[must_use]
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Render one operation result to stdout
    pub fn render(&self, result: &OperationResult) -> Result<(), CliError> {
        if self.json {
            println!("{}", result.to_json()?);
            return Ok(());
        }

        match result {
            OperationResult::Verification(result) => Self::render_verification(result),
            OperationResult::Sweep(summary) => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL_CONDENSED);
                table.set_header(vec!["total", "verified", "failed", "errors", "unverifiable"]);
                table.add_row(vec![
                    Cell::new(summary.total),
                    Cell::new(summary.verified),
                    Cell::new(summary.failed),
                    Cell::new(summary.errors),
                    Cell::new(summary.unverifiable),
                ]);
                println!("{table}");
            }
            OperationResult::FlaggedList(results) => {
                if results.is_empty() {
                    println!("No results are flagged for review.");
                    return Ok(());
                }
                let mut table = Table::new();
                table.load_preset(UTF8_FULL_CONDENSED);
                table.set_header(vec!["app", "manager", "package", "checked", "error"]);
                for result in results {
                    table.add_row(vec![
                        Cell::new(&result.app_id),
                        Cell::new(result.package_manager_id),
                        Cell::new(&result.package_name),
                        Cell::new(format_timestamp(&result.timestamp)),
                        Cell::new(result.error_message.as_deref().unwrap_or("-")),
                    ]);
                }
                println!("{table}");
            }
            OperationResult::FlagCleared {
                app_id,
                manager,
                cleared,
            } => {
                if *cleared {
                    println!("Cleared review flag for {app_id}/{manager}.");
                } else {
                    println!("No flagged record for {app_id}/{manager}.");
                }
            }
            OperationResult::CatalogReport {
                applications,
                targets,
            } => {
                println!("Catalog OK: {applications} applications, {targets} package targets.");
            }
            OperationResult::Success(message) => println!("{message}"),
        }

        Ok(())
    }

    fn render_verification(result: &VerificationResult) {
        let status = match result.status {
            VerifyStatus::Verified => style(result.status.as_str()).green(),
            VerifyStatus::Failed => style(result.status.as_str()).red(),
            VerifyStatus::Unverifiable => style(result.status.as_str()).yellow(),
            VerifyStatus::Pending => style(result.status.as_str()).dim(),
        };

        println!(
            "{}/{} ({}): {status}",
            result.app_id, result.package_manager_id, result.package_name
        );
        if let Some(message) = &result.error_message {
            println!("  {message}");
        }
        if result.manual_review_flag {
            println!("  {}", style("flagged for manual review").yellow().bold());
        }
    }
}
