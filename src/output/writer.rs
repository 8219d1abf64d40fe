// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where filesystem operations occur,
//! keeping the rest of the codebase pure and testable.

use super::paths::failure_log_path;
use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Delivers the output plan, performing all I/O operations.
pub fn deliver(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::debug!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                let duration_ms = op_start.elapsed().as_millis() as u64;
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms,
                });
            }
            Err(e) => {
                log::error!("Operation failed: {}", e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::debug!(
        "Output plan execution complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    Ok(report)
}

/// Executes a single output operation.
fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::CreateDirectory { path } => {
            fs::create_dir_all(path)?;
            Ok(0)
        }
        DeliveryTarget::AppendLine { path, line } => append_line(path, line),
    }
}

/// Writes content to a file, creating parent directories as needed.
fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

/// Appends one line to a file, creating it (and parents) if absent.
fn append_line(path: &Path, line: &str) -> Result<usize, AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(line.len() + 1)
}

/// Records a failed discussion as `id,url` in the failure log.
///
/// Best effort: a failure to log must not mask the original failure, so
/// errors here are warned about and swallowed.
pub fn log_failure(out_dir: &Path, id: &str, url: &str) {
    let path = failure_log_path(out_dir);
    if let Err(e) = append_line(&path, &format!("{},{}", id, url)) {
        log::warn!("Could not record failure for {}: {}", id, e);
    }
}
