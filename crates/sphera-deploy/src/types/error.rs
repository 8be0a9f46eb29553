//! Error types and result handling for the deployment tool
//!
//! Errors fall into four groups that match the stages of a deployment:
//! configuration (detected when connecting), resolution (finding and
//! encoding a contract factory), submission, and confirmation. None of them
//! are recovered from; they propagate to the single handler in `main`.

use alloy_primitives::B256;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Convenience Result type alias using the local Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Stage of the deployment an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	Configuration,
	Resolution,
	Submission,
	Confirmation,
	Other,
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Configuration => "configuration",
			Self::Resolution => "resolution",
			Self::Submission => "submission",
			Self::Confirmation => "confirmation",
			Self::Other => "other",
		};
		f.write_str(name)
	}
}

/// Error type for all deployment operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
	// Configuration errors
	#[error(transparent)]
	Config(#[from] sphera_config::ConfigError),

	#[error("Network not found: {0}")]
	NetworkNotFound(String),

	#[error("No RPC URL configured for network {0}")]
	MissingRpcUrl(String),

	#[error("No signer configured for network {0}")]
	NoSigner(String),

	#[error("Invalid private key for network {0}")]
	InvalidPrivateKey(String),

	#[error("Chain id mismatch on {network}: expected {expected}, node reports {actual}")]
	ChainMismatch {
		network: String,
		expected: u64,
		actual: u64,
	},

	#[error("RPC connection failed: {0}")]
	RpcError(String),

	// Resolution errors
	#[error("Contract {name} not found in {}", .dir.display())]
	ArtifactNotFound { name: String, dir: PathBuf },

	#[error("Invalid artifact for {name}: {reason}")]
	InvalidArtifact { name: String, reason: String },

	#[error("Invalid constructor arguments for {name}: {reason}")]
	InvalidArguments { name: String, reason: String },

	// Submission errors
	#[error("Deployment transaction rejected: {0}")]
	SubmissionFailed(String),

	#[error("Timed out after {}s submitting {contract}", .timeout.as_secs())]
	SubmissionTimeout { contract: String, timeout: Duration },

	// Confirmation errors
	#[error("Deployment transaction reverted: {0}")]
	Reverted(B256),

	#[error("No contract address in receipt for {0}")]
	MissingContractAddress(B256),

	#[error("Timed out after {}s waiting for {hash}", .timeout.as_secs())]
	ConfirmationTimeout { hash: B256, timeout: Duration },

	#[error("Cancelled while deploying {contract}")]
	Cancelled {
		contract: String,
		/// Set when the transaction was already sent
		tx_hash: Option<B256>,
	},

	#[error("Confirmation failed: {0}")]
	ConfirmationFailed(String),

	// IO errors
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl Error {
	/// Returns the deployment stage this error belongs to
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Config(_)
			| Self::NetworkNotFound(_)
			| Self::MissingRpcUrl(_)
			| Self::NoSigner(_)
			| Self::InvalidPrivateKey(_)
			| Self::ChainMismatch { .. }
			| Self::RpcError(_) => ErrorKind::Configuration,
			Self::ArtifactNotFound { .. }
			| Self::InvalidArtifact { .. }
			| Self::InvalidArguments { .. } => ErrorKind::Resolution,
			Self::SubmissionFailed(_)
			| Self::SubmissionTimeout { .. }
			| Self::Cancelled { tx_hash: None, .. } => ErrorKind::Submission,
			Self::Reverted(_)
			| Self::MissingContractAddress(_)
			| Self::ConfirmationTimeout { .. }
			| Self::Cancelled { .. }
			| Self::ConfirmationFailed(_) => ErrorKind::Confirmation,
			Self::Io(_) | Self::Other(_) => ErrorKind::Other,
		}
	}
}
