//! Centralized logging utilities for the deployment tool
//!
//! These helpers pair the user-facing terminal output with structured
//! tracing events, so the console stays readable while `RUST_LOG` still
//! exposes the full context.

use crate::cli::output::Display;
use crate::types::{deployment::DeploymentRecord, error::Error};
use tracing::{error, info};

/// Log operation start with structured context
///
/// # Arguments
/// * `operation` - Name of the operation starting
/// * `context` - Additional context for the operation
pub fn operation_start(operation: &str, context: &str) {
	info!(
		operation = operation,
		context = context,
		"Operation started"
	);
}

/// Operation error with both user and developer logging
///
/// # Arguments
/// * `operation` - Name of the operation that failed
/// * `error` - Error that caused the failure
pub fn operation_error(operation: &str, error: &Error) {
	Display::error(&format!("{} failed: {}", operation, error));
	error!(
		operation = operation,
		kind = %error.kind(),
		error = ?error,
		"Operation failed"
	);
}

/// Reports a confirmed deployment on the console and in the trace
///
/// # Arguments
/// * `record` - The confirmed deployment
/// * `explorer_link` - Explorer page for the address, when one is configured
pub fn contract_deployed(record: &DeploymentRecord, explorer_link: Option<&str>) {
	Display::deployed(&record.label, &record.address.to_string());
	if let Some(link) = explorer_link {
		Display::kv("Explorer", link);
	}
	info!(
		contract = %record.contract,
		label = %record.label,
		address = %record.address,
		tx_hash = %record.tx_hash,
		block_number = ?record.block_number,
		gas_used = record.gas_used,
		"Contract deployed"
	);
}

/// Log operation completion with timing information
///
/// # Arguments
/// * `operation` - Name of the completed operation
/// * `duration_ms` - Operation duration in milliseconds
pub fn operation_complete(operation: &str, duration_ms: u64) {
	info!(
		operation = operation,
		duration_ms = duration_ms,
		"Operation completed"
	);
}
