//! Records produced by a deployment run
//!
//! These are printed as they are produced and never persisted.

use alloy_primitives::{Address, B256};

/// Receipt fields the orchestrator needs to judge a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReceipt {
	pub tx_hash: B256,
	/// Whether the transaction executed successfully
	pub success: bool,
	pub contract_address: Option<Address>,
	pub block_number: Option<u64>,
	pub gas_used: u64,
}

/// One confirmed contract deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
	/// Contract name as compiled
	pub contract: String,
	/// Name used in log output
	pub label: String,
	pub address: Address,
	pub tx_hash: B256,
	pub block_number: Option<u64>,
	pub gas_used: u64,
}

/// All deployments of a successful run, in deployment order
#[derive(Debug, Clone, Default)]
pub struct DeploymentReport {
	pub network: String,
	pub records: Vec<DeploymentRecord>,
}

impl DeploymentReport {
	/// Deployed addresses in deployment order
	pub fn addresses(&self) -> Vec<Address> {
		self.records.iter().map(|record| record.address).collect()
	}
}
